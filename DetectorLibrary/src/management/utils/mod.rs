pub mod detection;
pub mod draw_box;
pub mod process_error;
pub mod raw_prediction;
