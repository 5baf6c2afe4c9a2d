use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use crate::utils::log_entry::system::SystemEntry;
use crate::utils::logging::*;

pub const API_KEY_ENVIRONMENT_VARIABLE: &str = "ROBOFLOW_API_KEY";

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub inference_timeout: u64, //seconds
    pub confidence_threshold: f64, //fraction
    #[serde(skip)]
    pub api_key: String,
}

impl Config {
    //Seriously, the program must be terminated.
    pub fn new() -> Self {
        let toml_string = match fs::read_to_string("./detector.toml") {
            Ok(toml_string) => toml_string,
            Err(err) => {
                logging_console!(emergency_entry!(SystemEntry::ConfigNotFound, format!("Err: {err}")));
                panic!("Configuration file not found");
            },
        };
        let config_table = match toml::from_str::<ConfigTable>(&toml_string) {
            Ok(config_table) => config_table,
            Err(err) => {
                logging_console!(emergency_entry!(SystemEntry::InvalidConfig, format!("Err: {err}")));
                panic!("Unable to parse configuration file");
            },
        };
        let mut config = config_table.config;
        if !Self::validate(&config) {
            logging_console!(emergency_entry!(SystemEntry::InvalidConfig));
            panic!("Invalid configuration file");
        }
        config.api_key = match env::var(API_KEY_ENVIRONMENT_VARIABLE) {
            Ok(api_key) if !api_key.is_empty() => api_key,
            _ => {
                logging_console!(emergency_entry!(SystemEntry::MissingApiKey));
                panic!("{} environment variable is not set", API_KEY_ENVIRONMENT_VARIABLE);
            },
        };
        config
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_second(config.bind_retry_duration)
            && Config::validate_second(config.inference_timeout)
            && Config::validate_threshold(config.confidence_threshold)
    }

    fn validate_second(second: u64) -> bool {
        second > 0 && second <= 3600
    }

    fn validate_threshold(threshold: f64) -> bool {
        (0.0..=1.0).contains(&threshold)
    }
}
