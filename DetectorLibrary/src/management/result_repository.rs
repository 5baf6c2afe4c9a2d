use chrono::Local;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;
use crate::management::utils::detection::Detection;
use crate::management::utils::process_error::ProcessError;
use crate::utils::log_entry::io::IOEntry;
use crate::utils::logging::*;

pub const RESULTS_ROOT: &str = "results";
pub const ANNOTATED_IMAGE_FILENAME: &str = "yolo.jpg";
pub const OBJECT_INFO_FILENAME: &str = "object_info.json";

/// Owns the results root and the per-request run directories beneath it.
/// Runs are append-only: nothing here ever rewrites or deletes a completed
/// bundle.
#[derive(Clone)]
pub struct ResultRepository {
    root: PathBuf,
}

impl ResultRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn initialize(&self) {
        if let Err(err) = fs::create_dir_all(&self.root).await {
            logging_critical!(IOEntry::CreateDirectoryError(self.root.display().to_string(), err));
        }
    }

    /// Timestamp plus a short random suffix keeps names unique even for many
    /// requests within the same second.
    pub fn generate_run_name() -> String {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let uid = Uuid::new_v4().simple().to_string();
        format!("run_{}_{}", timestamp, &uid[..6])
    }

    pub async fn create_run_directory(&self) -> Result<(String, PathBuf), std::io::Error> {
        let run_name = Self::generate_run_name();
        let run_directory = self.root.join(&run_name);
        fs::create_dir_all(&run_directory).await?;
        Ok((run_name, run_directory))
    }

    /// Best-effort rollback of a run directory that never received an upload.
    pub async fn remove_run_directory(&self, run_directory: &Path) {
        if let Err(err) = fs::remove_dir(run_directory).await {
            logging_warning!(IOEntry::DeleteDirectoryError(run_directory.display().to_string(), err));
        }
    }

    pub fn save_annotated_image(&self, run_directory: &Path, image: &RgbImage) -> Result<PathBuf, ProcessError> {
        let image_path = run_directory.join(ANNOTATED_IMAGE_FILENAME);
        image.save(&image_path)
            .map_err(ProcessError::ImageWrite)?;
        Ok(image_path)
    }

    pub async fn save_object_info(&self, run_directory: &Path, detections: &[Detection]) -> Result<PathBuf, ProcessError> {
        let json_path = run_directory.join(OBJECT_INFO_FILENAME);
        let json_string = serde_json::to_string_pretty(detections)
            .map_err(|err| ProcessError::JsonWrite(err.into()))?;
        fs::write(&json_path, json_string).await
            .map_err(ProcessError::JsonWrite)?;
        Ok(json_path)
    }

    /// Failure to delete the upload never fails the request; the leftover file
    /// is only noise inside an already unique directory.
    pub async fn remove_temp_file(&self, temp_path: &Path) {
        if let Err(err) = fs::remove_file(temp_path).await {
            logging_warning!(IOEntry::DeleteFileError(temp_path.display().to_string(), err));
        }
    }
}
