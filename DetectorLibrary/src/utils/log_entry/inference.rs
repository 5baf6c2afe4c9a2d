use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceEntry {
    #[error("Sending inference request for {0}")]
    RequestSent(String),
    #[error("Inference response received")]
    ResponseReceived,
    #[error("Response does not contain a predictions list")]
    MissingPredictions,
}

impl From<InferenceEntry> for String {
    #[inline(always)]
    fn from(value: InferenceEntry) -> Self {
        value.to_string()
    }
}
