use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum PadError {
    #[error("serial device {device}: {message}")]
    Device { device: String, message: String },
    #[error("malformed frame {line:?}: {reason}")]
    Parse { line: String, reason: String },
    #[error("failed to load archive {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
    #[error("failed to persist archive to {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl PadError {
    pub fn device(device: &str, message: impl ToString) -> Self {
        PadError::Device {
            device: device.to_owned(),
            message: message.to_string(),
        }
    }
    pub fn parse(line: &str, reason: impl ToString) -> Self {
        PadError::Parse {
            line: line.to_owned(),
            reason: reason.to_string(),
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PadError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PadError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PadError {
    fn from(value: image::ImageError) -> Self {
        PadError::Plot(value.to_string())
    }
}
