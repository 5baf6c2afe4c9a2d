use crate::management::utils::detection::{Coordinates, Detection};
use crate::management::utils::draw_box::DrawBox;
use crate::management::utils::raw_prediction::RawPrediction;

/// Converts raw center-form predictions into detection records and drawing
/// instructions, skipping everything below the confidence threshold.
///
/// Detection ids keep the pre-filter index of the prediction as received from
/// the service, so a filtered-out entry leaves a gap in the sequence. The
/// original behaved this way and downstream consumers rely on the response
/// matching the persisted JSON exactly.
pub fn map_predictions(predictions: &[RawPrediction], threshold: f64) -> Vec<(Detection, DrawBox)> {
    let mut mapped = Vec::new();
    for (index, prediction) in predictions.iter().enumerate() {
        if prediction.confidence < threshold {
            continue;
        }
        let x1 = (prediction.x - prediction.width / 2.0).round() as i32;
        let y1 = (prediction.y - prediction.height / 2.0).round() as i32;
        let x2 = (prediction.x + prediction.width / 2.0).round() as i32;
        let y2 = (prediction.y + prediction.height / 2.0).round() as i32;
        let detection = Detection {
            id: index,
            class_name: prediction.class_name.clone(),
            confidence: prediction.confidence,
            coordinates: Coordinates {
                x: x1,
                y: y1,
                width: prediction.width.round() as i32,
                height: prediction.height.round() as i32,
            },
        };
        let draw_box = DrawBox {
            x1,
            y1,
            x2,
            y2,
            label: format!("{} {:.2}", prediction.class_name, prediction.confidence),
        };
        mapped.push((detection, draw_box));
    }
    mapped
}
