//! REST access to the snap message service and the Orap upload endpoint.
//!
//! The service exposes two resources: echogram metadata and snap messages.
//! Orap reports travel separately as WebKit multipart bodies.

use crate::config::ReporterConfig;
use crate::constants::{ECHOGRAM_INFOS_PATH, SNAP_MESSAGES_PATH, WITH_ECHOGRAM_PARAM};
use crate::error::{ReporterError, Result};
use crate::form::WebForm;
use crate::models::{EchogramInfo, SnapMessage};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// Operations offered by the snap message service
#[async_trait]
pub trait SnapMessageService: Send + Sync {
    /// Metadata for all shared echograms
    async fn echogram_infos(&self) -> Result<Vec<EchogramInfo>>;

    /// Snap messages, with embedded echogram metadata when `with_echogram` is set
    async fn snap_messages(&self, with_echogram: bool) -> Result<Vec<SnapMessage>>;

    /// Create a snap message, returning the stored record
    async fn send_snap_message(&self, message: &SnapMessage) -> Result<SnapMessage>;
}

fn build_client(config: &ReporterConfig) -> Result<Client> {
    Ok(Client::builder().timeout(config.request_timeout()).build()?)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    warn!("{} answered with status {}", url, status);
    Err(ReporterError::UnexpectedStatus {
        url,
        status: status.as_u16(),
    })
}

/// `SnapMessageService` over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpSnapMessageService {
    client: Client,
    base: Url,
}

impl HttpSnapMessageService {
    pub fn new(config: &ReporterConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base: config.snap_api_base()?,
        })
    }

    pub fn echogram_infos_url(&self) -> Result<Url> {
        Ok(self.base.join(ECHOGRAM_INFOS_PATH)?)
    }

    pub fn snap_messages_url(&self, with_echogram: Option<bool>) -> Result<Url> {
        let mut url = self.base.join(SNAP_MESSAGES_PATH)?;
        if let Some(flag) = with_echogram {
            url.query_pairs_mut()
                .append_pair(WITH_ECHOGRAM_PARAM, if flag { "true" } else { "false" });
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = check_status(self.client.get(url).send().await?)?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SnapMessageService for HttpSnapMessageService {
    async fn echogram_infos(&self) -> Result<Vec<EchogramInfo>> {
        let infos: Vec<EchogramInfo> = self.get_json(self.echogram_infos_url()?).await?;
        info!("Fetched {} echogram infos", infos.len());
        Ok(infos)
    }

    async fn snap_messages(&self, with_echogram: bool) -> Result<Vec<SnapMessage>> {
        let messages: Vec<SnapMessage> =
            self.get_json(self.snap_messages_url(Some(with_echogram))?).await?;
        info!("Fetched {} snap messages", messages.len());
        Ok(messages)
    }

    async fn send_snap_message(&self, message: &SnapMessage) -> Result<SnapMessage> {
        let url = self.snap_messages_url(None)?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(message).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

/// Posts serialized Orap forms to the observation report endpoint
#[derive(Debug, Clone)]
pub struct OrapUploader {
    client: Client,
    endpoint: Url,
}

impl OrapUploader {
    pub fn new(config: &ReporterConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.obs_report_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit the form and return the response body
    pub async fn submit(&self, form: WebForm) -> Result<String> {
        let content_type = form.content_type();
        let field_count = form.len();
        let body = form.into_body();

        debug!(
            "POST {} ({} fields, {} bytes)",
            self.endpoint,
            field_count,
            body.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let response = check_status(response)?;
        Ok(response.text().await?)
    }
}

/// Referrer URL for Orap form posts, carrying the reporting credentials
pub fn post_request_referrer(
    config: &ReporterConfig,
    username: &str,
    password: &str,
) -> Result<String> {
    let mut url = config.obs_report_url()?;
    url.query_pairs_mut()
        .append_pair("user", username)
        .append_pair("password", password);
    Ok(url.to_string())
}
