use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder, Scope};
use futures::{StreamExt, TryStreamExt};
use sanitize_filename::sanitize;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use crate::management::annotator;
use crate::management::prediction_mapper::map_predictions;
use crate::management::result_repository::{ANNOTATED_IMAGE_FILENAME, OBJECT_INFO_FILENAME};
use crate::management::utils::detection::Detection;
use crate::management::utils::process_error::ProcessError;
use crate::utils::logging::*;
use crate::web::utils::app_state::AppState;

pub fn initialize() -> Scope {
    web::scope("/process_image")
        .service(process_image)
}

#[derive(Serialize)]
struct ProcessResponse {
    message: String,
    results_folder: String,
    annotated_image_url: String,
    object_info_url: String,
    object_info: Vec<Detection>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

struct StagedUpload {
    run_name: String,
    run_directory: PathBuf,
    temp_path: PathBuf,
}

#[post("")]
async fn process_image(req: HttpRequest, mut payload: Multipart, state: web::Data<AppState>) -> impl Responder {
    let staged = match stage_upload(&mut payload, &state).await {
        Ok(staged) => staged,
        Err(error) => return failure_response(error, None, &state).await,
    };
    match run_pipeline(&req, &state, &staged).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => failure_response(error, Some(&staged.temp_path), &state).await,
    }
}

/// Finds the `image` file field and streams it into a fresh run directory,
/// keeping the original file extension. Fields other than the upload are
/// ignored.
async fn stage_upload(payload: &mut Multipart, state: &AppState) -> Result<StagedUpload, ProcessError> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let (field_name, file_name) = match field.content_disposition() {
            Some(content_disposition) => (
                content_disposition.get_name().map(str::to_string),
                content_disposition.get_filename().map(str::to_string),
            ),
            None => continue,
        };
        if field_name.as_deref() != Some("image") {
            continue;
        }
        let Some(file_name) = file_name else { continue };
        if file_name.is_empty() {
            return Err(ProcessError::Validation("Empty filename".to_string()));
        }
        let sanitized_file_name = sanitize(file_name);
        let extension = Path::new(&sanitized_file_name).extension()
            .and_then(OsStr::to_str)
            .map(|extension| format!(".{extension}"))
            .unwrap_or_default();
        let (run_name, run_directory) = state.repository.create_run_directory().await
            .map_err(ProcessError::Staging)?;
        let temp_path = run_directory.join(format!("uploaded_temp{extension}"));
        if let Err(err) = save_field(&temp_path, &mut field).await {
            state.repository.remove_run_directory(&run_directory).await;
            return Err(ProcessError::Staging(err));
        }
        return Ok(StagedUpload {
            run_name,
            run_directory,
            temp_path,
        });
    }
    Err(ProcessError::Validation("No image provided".to_string()))
}

async fn save_field(file_path: &Path, field: &mut Field) -> Result<(), std::io::Error> {
    let mut file = File::create(file_path).await?;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
        file.write_all(&data).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Infer, map, annotate and persist for one staged upload. Any error falls
/// back to `failure_response`; the run directory is kept either way.
async fn run_pipeline(req: &HttpRequest, state: &AppState, staged: &StagedUpload) -> Result<ProcessResponse, ProcessError> {
    let predictions = state.inference_client.infer(&staged.temp_path).await?;
    let base_image = annotator::load_image(&staged.temp_path)?;
    let mapped = map_predictions(&predictions, state.config.confidence_threshold);
    let (detections, draw_boxes): (Vec<_>, Vec<_>) = mapped.into_iter().unzip();
    let annotated_image = annotator::annotate(&base_image, &draw_boxes);
    state.repository.save_annotated_image(&staged.run_directory, &annotated_image)?;
    state.repository.save_object_info(&staged.run_directory, &detections).await?;
    state.repository.remove_temp_file(&staged.temp_path).await;
    let connection_info = req.connection_info();
    let base_url = format!("{}://{}", connection_info.scheme(), connection_info.host());
    let run_name = &staged.run_name;
    Ok(ProcessResponse {
        message: "Image processed successfully with Roboflow.".to_string(),
        results_folder: run_name.clone(),
        annotated_image_url: format!("{base_url}/results/{run_name}/{ANNOTATED_IMAGE_FILENAME}"),
        object_info_url: format!("{base_url}/results/{run_name}/{OBJECT_INFO_FILENAME}"),
        object_info: detections,
    })
}

/// Maps a pipeline failure to its status code and cleans up the temp upload.
/// The run directory is deliberately left in place for inspection.
async fn failure_response(error: ProcessError, temp_path: Option<&Path>, state: &AppState) -> HttpResponse {
    logging_error!(error.to_string());
    if let Some(temp_path) = temp_path {
        if temp_path.exists() {
            state.repository.remove_temp_file(temp_path).await;
        }
    }
    HttpResponse::build(error.status_code()).json(ErrorResponse {
        error: error.to_string(),
    })
}
