use actix_web::http::header;
use actix_web::{test, web, App};
use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use DetectorLibrary::management::inference_client::{InferenceError, InferenceProvider};
use DetectorLibrary::management::result_repository::ResultRepository;
use DetectorLibrary::management::utils::raw_prediction::RawPrediction;
use DetectorLibrary::utils::config::Config;
use DetectorLibrary::web::api::{process, results};
use DetectorLibrary::web::utils::app_state::AppState;

const BOUNDARY: &str = "----detector-test-boundary";

struct StaticProvider {
    predictions: Vec<RawPrediction>,
}

#[async_trait]
impl InferenceProvider for StaticProvider {
    async fn infer(&self, _image_path: &Path) -> Result<Vec<RawPrediction>, InferenceError> {
        Ok(self.predictions.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl InferenceProvider for FailingProvider {
    async fn infer(&self, _image_path: &Path) -> Result<Vec<RawPrediction>, InferenceError> {
        Err(InferenceError::ServiceStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

fn test_config() -> Config {
    Config {
        http_server_bind_port: 5000,
        bind_retry_duration: 1,
        inference_timeout: 5,
        confidence_threshold: 0.5,
        api_key: "test-key".to_string(),
    }
}

fn test_state(results_root: &Path, provider: Arc<dyn InferenceProvider>) -> web::Data<AppState> {
    web::Data::new(AppState {
        config: test_config(),
        inference_client: provider,
        repository: ResultRepository::new(results_root),
    })
}

fn jpeg_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(32, 32, image::Rgb([120, 130, 140]));
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

fn multipart_body(field_name: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_text_field(field_name: &str, value: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n{value}\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn content_type_header() -> (header::HeaderName, String) {
    (
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

fn single_run_directory(results_root: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = std::fs::read_dir(results_root)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one run directory");
    entries[0].clone()
}

#[actix_web::test]
async fn detection_above_threshold_produces_artifacts_and_response() {
    let results_root = TempDir::new().unwrap();
    let provider = Arc::new(StaticProvider {
        predictions: vec![RawPrediction {
            x: 16.0,
            y: 16.0,
            width: 10.0,
            height: 8.0,
            class_name: "tank".to_string(),
            confidence: 0.9,
        }],
    });
    let state = test_state(results_root.path(), provider);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(process::initialize())
            .service(results::initialize()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/process_image")
        .insert_header(content_type_header())
        .set_payload(multipart_body("image", "photo.jpg", &jpeg_bytes()))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Image processed successfully with Roboflow.");
    let object_info = body["object_info"].as_array().unwrap();
    assert_eq!(object_info.len(), 1);
    assert_eq!(object_info[0]["id"], 0);
    assert_eq!(object_info[0]["type"], "tank");
    assert_eq!(object_info[0]["coordinates"]["x"], 11);
    assert_eq!(object_info[0]["coordinates"]["y"], 12);
    assert_eq!(object_info[0]["coordinates"]["width"], 10);
    assert_eq!(object_info[0]["coordinates"]["height"], 8);

    let run_directory = single_run_directory(results_root.path());
    let run_name = run_directory.file_name().unwrap().to_str().unwrap();
    assert_eq!(body["results_folder"], run_name);
    let image_url = body["annotated_image_url"].as_str().unwrap();
    assert!(image_url.ends_with(&format!("/results/{run_name}/yolo.jpg")));
    assert!(run_directory.join("yolo.jpg").exists());
    assert!(run_directory.join("object_info.json").exists());
    assert!(!run_directory.join("uploaded_temp.jpg").exists());

    // The persisted JSON is retrievable through the results route.
    let request = test::TestRequest::get()
        .uri(&format!("/results/{run_name}/object_info.json"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);
    let served: Value = test::read_body_json(response).await;
    assert_eq!(served.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn missing_image_field_is_rejected_without_creating_a_run() {
    let results_root = TempDir::new().unwrap();
    let provider = Arc::new(StaticProvider {
        predictions: Vec::new(),
    });
    let state = test_state(results_root.path(), provider);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(process::initialize()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/process_image")
        .insert_header(content_type_header())
        .set_payload(multipart_text_field("comment", "not a file"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "No image provided");
    assert_eq!(std::fs::read_dir(results_root.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn below_threshold_prediction_yields_empty_object_info_but_keeps_the_copy() {
    let results_root = TempDir::new().unwrap();
    let provider = Arc::new(StaticProvider {
        predictions: vec![RawPrediction {
            x: 16.0,
            y: 16.0,
            width: 10.0,
            height: 8.0,
            class_name: "tank".to_string(),
            confidence: 0.3,
        }],
    });
    let state = test_state(results_root.path(), provider);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(process::initialize()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/process_image")
        .insert_header(content_type_header())
        .set_payload(multipart_body("image", "photo.jpg", &jpeg_bytes()))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["object_info"].as_array().unwrap().len(), 0);

    let run_directory = single_run_directory(results_root.path());
    assert!(run_directory.join("yolo.jpg").exists());
    let object_info = std::fs::read_to_string(run_directory.join("object_info.json")).unwrap();
    assert_eq!(object_info, "[]");
}

#[actix_web::test]
async fn inference_failure_maps_to_bad_gateway_and_cleans_the_temp_file() {
    let results_root = TempDir::new().unwrap();
    let state = test_state(results_root.path(), Arc::new(FailingProvider));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(process::initialize()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/process_image")
        .insert_header(content_type_header())
        .set_payload(multipart_body("image", "photo.jpg", &jpeg_bytes()))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 502);
    let body: Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Roboflow processing failed"));

    // The run directory survives the failure but its temp upload does not.
    let run_directory = single_run_directory(results_root.path());
    assert_eq!(std::fs::read_dir(&run_directory).unwrap().count(), 0);
}

#[actix_web::test]
async fn empty_filename_is_rejected() {
    let results_root = TempDir::new().unwrap();
    let provider = Arc::new(StaticProvider {
        predictions: Vec::new(),
    });
    let state = test_state(results_root.path(), provider);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(process::initialize()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/process_image")
        .insert_header(content_type_header())
        .set_payload(multipart_body("image", "", &jpeg_bytes()))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Empty filename");
}

#[actix_web::test]
async fn result_paths_cannot_escape_the_results_root() {
    let results_root = TempDir::new().unwrap();
    let provider = Arc::new(StaticProvider {
        predictions: Vec::new(),
    });
    let state = test_state(results_root.path(), provider);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(results::initialize()),
    )
    .await;

    let request = test::TestRequest::get()
        .uri("/results/..%2Fdetector.toml")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let request = test::TestRequest::get()
        .uri("/results/run_missing/yolo.jpg")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);
}
