use serde::{Deserialize, Serialize};

/// A filtered detection record as persisted to `object_info.json` and
/// returned inline in the process response. Field order is the wire order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub id: usize,
    #[serde(rename = "type")]
    pub class_name: String,
    pub confidence: f64,
    pub coordinates: Coordinates,
}

/// Top-left corner and size, in image pixels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}
