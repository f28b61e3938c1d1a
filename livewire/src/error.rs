use crate::model::AnnotationUid;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LivewireError {
    #[error("image buffer holds {got} values, expected {expected} ({width}x{height}x{channels})")]
    ImageSizeMismatch {
        expected: usize,
        got: usize,
        width: u32,
        height: u32,
        channels: u32,
    },

    #[error("image dimensions {width}x{height} are not supported")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image contains non-finite values")]
    NonFiniteImage,

    #[error("seed ({x}, {y}) is outside the {width}x{height} image")]
    SeedOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("viewport type '{kind}' is not supported for contour drawing")]
    UnsupportedViewport { kind: &'static str },

    #[error("viewport has no image data")]
    MissingImageData,

    #[error("slice transform is singular")]
    SingularTransform,

    #[error("point ({x}, {y}) is not on the path")]
    PointNotOnPath { x: i32, y: i32 },

    #[error("can't find handle {handle} on the contour polyline")]
    HandleNotFound { handle: usize },

    #[error("trying to edit handle {requested} while handle {active} is being edited")]
    HandleMismatch { requested: usize, active: usize },

    #[error("handle index {index} is out of range for {count} handles")]
    HandleOutOfRange { index: usize, count: usize },

    #[error("contour needs at least {min} handles, has {got}")]
    TooFewHandles { min: usize, got: usize },

    #[error("contour {0} is not closed")]
    ContourNotClosed(AnnotationUid),

    #[error("annotation {0} does not exist")]
    UnknownAnnotation(AnnotationUid),

    #[error("a {0} session is already active")]
    SessionBusy(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid annotation document: {0}")]
    Document(String),
}

pub type Result<T> = std::result::Result<T, LivewireError>;
