use actix_web::http::StatusCode;
use std::io::Error as IoError;
use thiserror::Error;
use crate::management::inference_client::InferenceError;

/// Everything that can go wrong between a validated upload and a persisted
/// result bundle. The variant, not the message text, decides the HTTP status.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to save uploaded file: {0}")]
    Staging(IoError),
    #[error("Roboflow processing failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("Unable to load image for annotation: {0}")]
    ImageLoad(image::ImageError),
    #[error("Unable to write annotated image: {0}")]
    ImageWrite(image::ImageError),
    #[error("Unable to write object info: {0}")]
    JsonWrite(IoError),
}

impl ProcessError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProcessError::Validation(_) => StatusCode::BAD_REQUEST,
            ProcessError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProcessError::Inference(_) => StatusCode::BAD_GATEWAY,
            ProcessError::ImageLoad(_) => StatusCode::NOT_FOUND,
            ProcessError::ImageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProcessError::JsonWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
