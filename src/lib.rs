//! Orap Reporter Library
//!
//! Tools for field observers reporting marine weather and sea-ice
//! observations to the Orap ingestion system, and for exchanging echogram
//! snap messages with the snap message service.
//!
//! This library provides:
//! - Byte-exact rendering of the legacy hidden, KL and KL status report lines
//! - WebKit-style multipart form bodies with random boundary ids
//! - An async REST client for echogram metadata and snap messages
//! - A per-session result cache backing presentation-layer list views
//! - Layered configuration and the `orap-reporter` command-line interface

pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod models;
pub mod report;
pub mod viewmodel;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use client::{HttpSnapMessageService, OrapUploader, SnapMessageService};
pub use config::ReporterConfig;
pub use error::{ReporterError, Result};
pub use form::WebForm;
pub use models::{EchogramInfo, Observation, SessionId, SnapMessage};
pub use report::{ReportFormatter, ReportKind};
pub use viewmodel::EchogramViewModel;
