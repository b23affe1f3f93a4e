use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdssError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown panel: {0}")]
    UnknownPanel(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CdssError>;
