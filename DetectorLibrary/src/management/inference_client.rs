use async_trait::async_trait;
use base64::prelude::{Engine, BASE64_STANDARD};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::io::Error as IoError;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use crate::management::utils::raw_prediction::RawPrediction;
use crate::utils::config::Config;
use crate::utils::log_entry::inference::InferenceEntry;
use crate::utils::logging::*;

pub const ROBOFLOW_API_URL: &str = "https://detect.roboflow.com";
pub const ROBOFLOW_MODEL_ID: &str = "military_objects/1";

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Unable to read image file {0}: {1}")]
    ReadImageError(String, IoError),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Service returned status {0}")]
    ServiceStatus(reqwest::StatusCode),
    #[error("Predictions list is not an array")]
    MalformedResponse,
    #[error("Malformed prediction at index {0}: {1}")]
    MalformedPrediction(usize, serde_json::Error),
}

/// Seam between the orchestrator and the remote detection service. Tests
/// substitute a double here without touching the endpoint code.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn infer(&self, image_path: &Path) -> Result<Vec<RawPrediction>, InferenceError>;
}

pub struct RoboflowClient {
    client: reqwest::Client,
    api_url: String,
    model_id: String,
    api_key: String,
}

impl RoboflowClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.inference_timeout))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_url: ROBOFLOW_API_URL.to_string(),
            model_id: ROBOFLOW_MODEL_ID.to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl InferenceProvider for RoboflowClient {
    async fn infer(&self, image_path: &Path) -> Result<Vec<RawPrediction>, InferenceError> {
        let image_data = fs::read(image_path).await
            .map_err(|err| InferenceError::ReadImageError(image_path.display().to_string(), err))?;
        logging_information!(InferenceEntry::RequestSent(image_path.display().to_string()));
        let url = format!("{}/{}?api_key={}", self.api_url, self.model_id, self.api_key);
        let response = self.client.post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(BASE64_STANDARD.encode(&image_data))
            .send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::ServiceStatus(status));
        }
        let body = response.json::<Value>().await?;
        logging_information!(InferenceEntry::ResponseReceived);
        if body.get("predictions").is_none() {
            logging_warning!(InferenceEntry::MissingPredictions);
        }
        parse_predictions(&body)
    }
}

/// Decodes the service response. A missing predictions list is tolerated and
/// treated as empty; a structurally malformed list or entry is an error.
pub fn parse_predictions(body: &Value) -> Result<Vec<RawPrediction>, InferenceError> {
    let entries = match body.get("predictions") {
        Some(predictions) => predictions.as_array().ok_or(InferenceError::MalformedResponse)?,
        None => return Ok(Vec::new()),
    };
    let mut predictions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let prediction = serde_json::from_value::<RawPrediction>(entry.clone())
            .map_err(|err| InferenceError::MalformedPrediction(index, err))?;
        predictions.push(prediction);
    }
    Ok(predictions)
}
