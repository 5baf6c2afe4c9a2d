use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder, Scope};
use std::path::{Component, PathBuf};
use crate::web::utils::app_state::AppState;

pub fn initialize() -> Scope {
    web::scope("/results")
        .service(get_result_file)
}

/// Streams a persisted artifact back verbatim. Only plain path components are
/// accepted, which pins every lookup inside the results root.
#[get("/{path_to_file:.*}")]
async fn get_result_file(req: HttpRequest, path_to_file: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let relative_path = PathBuf::from(path_to_file.into_inner());
    let traversal_free = relative_path.components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !traversal_free {
        return HttpResponse::BadRequest().body("Invalid path.");
    }
    let file_path = state.repository.root().join(relative_path);
    match NamedFile::open_async(&file_path).await {
        Ok(named_file) => named_file
            .set_content_type(mime_guess::from_path(&file_path).first_or_octet_stream())
            .into_response(&req),
        Err(_) => HttpResponse::NotFound().finish(),
    }
}
