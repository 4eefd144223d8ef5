pub mod config;

pub use config::{
    config_path, load_config, load_config_from, resolve_credentials, resolve_credentials_with,
    Config, Credentials,
};
