use serde::Deserialize;

/// One unfiltered entry of the remote service's predictions list, in
/// center-point form.
#[derive(Deserialize, Debug, Clone)]
pub struct RawPrediction {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f64,
}
