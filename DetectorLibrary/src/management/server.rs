use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use crate::management::inference_client::{InferenceProvider, RoboflowClient, ROBOFLOW_MODEL_ID};
use crate::management::result_repository::{ResultRepository, RESULTS_ROOT};
use crate::utils::config::Config;
use crate::utils::log_entry::system::SystemEntry;
use crate::utils::logging::*;
use crate::web::api::{process, results};
use crate::web::utils::app_state::AppState;

pub struct Server;

impl Server {
    pub async fn run() {
        let config = Config::new();
        logging_information!(SystemEntry::Initializing);
        let repository = ResultRepository::new(RESULTS_ROOT);
        repository.initialize().await;
        let inference_client: Arc<dyn InferenceProvider> = Arc::new(RoboflowClient::new(&config));
        logging_information!(format!("Roboflow client ready for model {ROBOFLOW_MODEL_ID}"));
        let state = web::Data::new(AppState {
            config: config.clone(),
            inference_client,
            repository,
        });
        logging_information!(SystemEntry::InitializeComplete);
        let http_server = loop {
            let app_state = state.clone();
            let http_server = HttpServer::new(move || {
                App::new()
                    .wrap(Cors::permissive())
                    .app_data(app_state.clone())
                    .service(process::initialize())
                    .service(results::initialize())
            }).bind(format!("0.0.0.0:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(SystemEntry::BindPortError(err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                },
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }
}
