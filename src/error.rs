use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("palette exhausted: all {capacity} colors are taken, cannot create series `{label}`")]
    PaletteExhausted { capacity: usize, label: String },

    #[error("invalid sample: {0}")]
    InvalidSample(String),

    #[error("chart engine used after destroy")]
    UseAfterDestroy,

    #[error("chart host is not attached")]
    NotAttached,

    #[error("chart host is already attached")]
    AlreadyAttached,
}
