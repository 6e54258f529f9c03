use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] lms_config::ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] lms_store::StoreError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] lms_gateway::GatewayError),

    #[error("State error: {0}")]
    State(#[from] lms_state::StateError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
