//! Random boundary ids for multipart bodies.
//!
//! Ids are drawn from `[A-Za-z0-9]` with a non-cryptographic generator.
//! Two submissions may in principle share an id; the upload endpoint only
//! needs the id to be absent from the field values of one body.

use crate::constants::BOUNDARY_ID_LENGTH;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generate a boundary id of `length` alphanumeric characters.
pub fn boundary_id(length: usize) -> String {
    boundary_id_with(&mut rand::thread_rng(), length)
}

/// Generate a boundary id of the default length.
pub fn default_boundary_id() -> String {
    boundary_id(BOUNDARY_ID_LENGTH)
}

/// Generate a boundary id from a caller-supplied generator.
pub fn boundary_id_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
