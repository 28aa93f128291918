use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("missing context variable `{0}`")]
    MissingVariable(String),
    #[error("context variable `{name}` has the wrong type: {source}")]
    VariableType {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid template `{template}`: {reason}")]
    Template { template: String, reason: String },
    #[error("pattern created no layers")]
    NoLayers,
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("invalid font size {0}")]
    InvalidFontSize(f32),
    #[error("invalid font {0}")]
    InvalidFont(String),
    #[error("unsupported pattern document version {0}")]
    UnsupportedVersion(u32),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PatternError>;
