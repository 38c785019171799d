//! Error type shared by the simulator, configuration and FFI layers.

use thiserror::Error;

/// Errors reported synchronously by simulator operations.
///
/// Every variant is a precondition violation on the caller's side; none of
/// them are transient, so there is nothing to retry.
#[derive(Debug, Error)]
pub enum SimError {
    /// Width, height or depth was below 1, or their product does not fit in memory.
    #[error("invalid grid dimensions {width}x{height}x{depth}")]
    InvalidDimension { width: i32, height: i32, depth: i32 },

    /// A rule parameter value was rejected.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Step or query was requested before any grid was initialized.
    #[error("simulator has no grid; call initialize first")]
    NotInitialized,

    /// Coordinates fall outside the current grid.
    #[error("cell ({x}, {y}, {z}) is outside the grid")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    /// Configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The dedicated step thread pool could not be created.
    #[error("failed to build step thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SimError>;
