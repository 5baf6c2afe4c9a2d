use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use lazy_static::lazy_static;
use std::path::Path;
use crate::management::utils::draw_box::DrawBox;
use crate::management::utils::process_error::ProcessError;

static FONT_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

const BORDER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const BORDER_WIDTH: u32 = 2;
const LABEL_SCALE: f32 = 16.0;

lazy_static! {
    static ref LABEL_FONT: FontRef<'static> = FontRef::try_from_slice(FONT_BYTES)
        .expect("embedded font data is valid");
}

/// Loads the original upload for annotation. Runs before any drawing so a
/// corrupt or missing file fails the request as an image-load error.
pub fn load_image(image_path: &Path) -> Result<RgbImage, ProcessError> {
    let image = image::open(image_path)
        .map_err(ProcessError::ImageLoad)?;
    Ok(image.to_rgb8())
}

/// Draws every box and its label onto a copy of the base image, in input
/// order. Overlapping boxes simply overpaint.
pub fn annotate(base_image: &RgbImage, draw_boxes: &[DrawBox]) -> RgbImage {
    let mut annotated = base_image.clone();
    for draw_box in draw_boxes {
        let width = (draw_box.x2 - draw_box.x1).max(1) as u32;
        let height = (draw_box.y2 - draw_box.y1).max(1) as u32;
        let base_rectangle = Rect::at(draw_box.x1, draw_box.y1).of_size(width, height);
        for i in 0..BORDER_WIDTH {
            let offset_rectangle = Rect::at(base_rectangle.left() - i as i32, base_rectangle.top() - i as i32)
                .of_size(base_rectangle.width() + 2 * i, base_rectangle.height() + 2 * i);
            draw_hollow_rect_mut(&mut annotated, offset_rectangle, BORDER_COLOR);
        }
        let (label_x, label_y) = draw_box.label_position();
        draw_text_mut(&mut annotated, BORDER_COLOR, label_x, label_y, PxScale::from(LABEL_SCALE), &*LABEL_FONT, &draw_box.label);
    }
    annotated
}
