//! Tests for the WebForm accumulator

use super::TEST_BOUNDARY;
use crate::form::{WebForm, form_end_tag, form_part};

#[test]
fn test_empty_form_is_only_end_tag() {
    let form = WebForm::new(TEST_BOUNDARY);

    assert!(form.is_empty());
    assert_eq!(form.serialize(), "------WebKitFormBoundaryAbC123xyz--");
    assert_eq!(form.serialize().matches("WebKitFormBoundary").count(), 1);
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let mut form = WebForm::new(TEST_BOUNDARY);
    form.add_form_value("a", "1");
    form.add_form_value("a", "2");

    let body = form.serialize();
    assert_eq!(body.matches("name=\"a\"").count(), 1);
    assert!(body.contains("name=\"a\"\n\n2\n"));
    assert!(!body.contains("\n\n1\n"));
    assert_eq!(form.get("a"), Some("2"));
    assert_eq!(form.len(), 1);
}

#[test]
fn test_overwrite_keeps_insertion_position() {
    let mut form = WebForm::new(TEST_BOUNDARY);
    form.add_form_value("first", "x");
    form.add_form_value("second", "y");
    form.add_form_value("first", "z");

    let body = form.serialize();
    let first = body.find("name=\"first\"").unwrap();
    let second = body.find("name=\"second\"").unwrap();
    assert!(first < second);
}

#[test]
fn test_serialize_concatenates_parts_in_order() {
    let mut form = WebForm::new(TEST_BOUNDARY);
    form.add_form_value("action", "obs_report");
    form.add_form_value("epoch", 1_583_064_000i64);
    form.add_optional_value::<i32>("ice", None);

    let expected = [
        form_part(TEST_BOUNDARY, "action", "obs_report"),
        form_part(TEST_BOUNDARY, "epoch", "1583064000"),
        form_part(TEST_BOUNDARY, "ice", ""),
        form_end_tag(TEST_BOUNDARY),
    ]
    .concat();

    assert_eq!(form.serialize(), expected);
}

#[test]
fn test_multiline_values_are_embedded_verbatim() {
    let mut form = WebForm::new(TEST_BOUNDARY);
    form.add_form_value("message", "line one\nline two\n\n");

    let body = form.into_body();
    assert!(body.contains("name=\"message\"\n\nline one\nline two\n\n\n------WebKitFormBoundary"));
}

#[test]
fn test_random_boundary_form() {
    let form = WebForm::with_random_boundary(12);

    assert_eq!(form.boundary_id().len(), 12);
    assert_eq!(
        form.content_type(),
        format!(
            "multipart/form-data; boundary=----WebKitFormBoundary{}",
            form.boundary_id()
        )
    );
}
