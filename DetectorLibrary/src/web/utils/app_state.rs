use std::sync::Arc;
use crate::management::inference_client::InferenceProvider;
use crate::management::result_repository::ResultRepository;
use crate::utils::config::Config;

/// Immutable per-process state, built once in `Server::run` and handed to the
/// endpoints through `web::Data`. Request code never reaches for globals.
pub struct AppState {
    pub config: Config,
    pub inference_client: Arc<dyn InferenceProvider>,
    pub repository: ResultRepository,
}
