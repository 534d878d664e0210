//! WebKit-style `multipart/form-data` bodies.
//!
//! The legacy upload endpoint recognises parts only when they are framed
//! exactly as a WebKit browser frames them, with `\n` line endings.

use crate::constants::webkit_boundary;
use std::fmt::Display;
use tracing::debug;

/// Render one form part, including its trailing newline.
pub fn form_part(boundary_id: &str, name: &str, value: impl Display) -> String {
    format!(
        "--{}\nContent-Disposition: form-data; name=\"{}\"\n\n{}\n",
        webkit_boundary(boundary_id),
        name,
        value
    )
}

/// Render one form part for an optional value. `None` renders as an empty
/// value.
pub fn optional_form_part<T: Display>(boundary_id: &str, name: &str, value: Option<T>) -> String {
    match value {
        Some(value) => form_part(boundary_id, name, value),
        None => form_part(boundary_id, name, ""),
    }
}

/// Closing boundary line. Has no trailing newline.
pub fn form_end_tag(boundary_id: &str) -> String {
    format!("--{}--", webkit_boundary(boundary_id))
}

/// Content-Type header value announcing the boundary.
pub fn content_type(boundary_id: &str) -> String {
    format!("multipart/form-data; boundary={}", webkit_boundary(boundary_id))
}

/// Ordered form fields under a single boundary id.
///
/// Adding a key twice keeps the first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebForm {
    boundary_id: String,
    entries: Vec<(String, String)>,
}

impl WebForm {
    pub fn new(boundary_id: impl Into<String>) -> Self {
        Self {
            boundary_id: boundary_id.into(),
            entries: Vec::new(),
        }
    }

    /// Create a form with a freshly generated boundary id
    pub fn with_random_boundary(length: usize) -> Self {
        Self::new(super::boundary::boundary_id(length))
    }

    pub fn boundary_id(&self) -> &str {
        &self.boundary_id
    }

    /// Insert or overwrite a field
    pub fn add_form_value(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => {
                debug!("Overwriting form field '{}'", key);
                *slot = value;
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Insert or overwrite a field whose value may be absent
    pub fn add_optional_value<T: Display>(&mut self, key: impl Into<String>, value: Option<T>) {
        match value {
            Some(value) => self.add_form_value(key, value),
            None => self.add_form_value(key, ""),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content-Type header for this form's body
    pub fn content_type(&self) -> String {
        content_type(&self.boundary_id)
    }

    /// Serialize all parts followed by the closing boundary line
    pub fn serialize(&self) -> String {
        let mut body = String::new();
        for (key, value) in &self.entries {
            body.push_str(&form_part(&self.boundary_id, key, value));
        }
        body.push_str(&form_end_tag(&self.boundary_id));
        body
    }

    /// Consume the form, yielding its serialized body
    pub fn into_body(self) -> String {
        self.serialize()
    }
}
