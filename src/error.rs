use thiserror::Error;

/// Errors raised when building a stroke value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrokeError {
    #[error("a stroke needs at least one point")]
    Empty,
    #[error("stroke width must be a positive finite number, got {0}")]
    InvalidWidth(f32),
}

/// Errors raised when parsing a colour string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("malformed hex colour: {0}")]
    MalformedHex(String),
    #[error("unknown colour name: {0}")]
    UnknownName(String),
}

/// Errors raised by the drawing surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The raster backing store could not be allocated for this size.
    #[error("no paintable surface for {width}x{height}")]
    ContextUnavailable { width: u32, height: u32 },
}

/// Errors raised while exporting the drawing
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("the surface has no pixels to export")]
    EmptySurface,
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write image: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors reported by a notes store
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("note {0} not found")]
    NotFound(uuid::Uuid),
    #[error("notes backend unavailable: {0}")]
    Backend(String),
    #[error("invalid note rows: {0}")]
    Rows(#[from] serde_json::Error),
}

/// Umbrella error for the canvas controller
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error(transparent)]
    Stroke(#[from] StrokeError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
