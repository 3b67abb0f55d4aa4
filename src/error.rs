use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutopermError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Domain Error: {symbol:?} is not in the alphabet A-Z")]
    Domain { symbol: char },
}

pub type ApResult<T> = Result<T, AutopermError>;
