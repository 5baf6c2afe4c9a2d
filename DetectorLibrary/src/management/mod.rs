pub mod annotator;
pub mod inference_client;
pub mod prediction_mapper;
pub mod result_repository;
pub mod server;
pub mod utils;
