// Crate error type. Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A render configuration field is out of range (caught before any frame).
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed as #rgb / #rrggbb.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
