use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid timezone {0}")]
    Timezone(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit status: 2 for rejected input, 3 for unknown ids, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Engine(err) if err.is_validation() => 2,
            Self::Engine(err) if err.is_not_found() => 3,
            _ => 1,
        }
    }
}
