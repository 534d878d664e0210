//! Multipart form bodies for the legacy Orap upload endpoint.

pub mod boundary;
pub mod builder;
pub mod report_form;

#[cfg(test)]
mod tests;

pub use boundary::{boundary_id, boundary_id_with, default_boundary_id};
pub use builder::{WebForm, content_type, form_end_tag, form_part, optional_form_part};
pub use report_form::observation_report_form;
