use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No shots match the current filters")]
    EmptyResult,

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Heatmap bins must be between 1 and {max}, got {bins}")]
    BinsOutOfRange { bins: usize, max: usize },

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Image encoding error: {0}")]
    ImageError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::CsvError(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError(e.to_string())
    }
}
