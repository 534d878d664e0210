//! Observation report uploads as multipart forms.

use super::builder::WebForm;
use crate::constants::form_fields;
use crate::models::Observation;
use crate::report::{ReportFormatter, ReportKind, orap_message_tag};

/// Build the upload form for one observation.
///
/// Fields appear in a fixed order: action tag, username, reporting epoch,
/// then the hidden, KL and KL status report texts.
pub fn observation_report_form(
    observation: &Observation,
    formatter: &ReportFormatter,
    boundary_id: impl Into<String>,
) -> WebForm {
    let username = &observation.reporting_username;
    let mut form = WebForm::new(boundary_id);

    form.add_form_value(
        form_fields::ACTION_TAG,
        orap_message_tag(&observation.observed_local(), username),
    );
    form.add_form_value(form_fields::USERNAME, username);
    form.add_form_value(
        form_fields::REPORTING_EPOCH,
        observation.reporting_epoch_seconds,
    );
    form.add_form_value(
        form_fields::HIDDEN_MESSAGE,
        formatter.render(ReportKind::Hidden, observation),
    );
    form.add_form_value(
        form_fields::KL_MESSAGE,
        formatter.render(ReportKind::Kl, observation),
    );
    form.add_form_value(
        form_fields::KL_STATUS,
        formatter.render(ReportKind::KlStatus, observation),
    );

    form
}
