//! Error types for sparks.
//!
//! Construction misuse surfaces as [`ConfigError`]; the viewer adds
//! [`GpuError`] and [`AppError`] for adapter, window and event loop failures.
//! The emitter tick itself has no error path.

use std::io;
use std::ops::Range;
use thiserror::Error;

/// Invalid emitter or demo configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The pool must hold at least one slot.
    #[error("Particle capacity must be at least 1")]
    ZeroCapacity,

    /// Lifetime range must satisfy `0 < start < end`.
    #[error("Invalid life range {}..{}: expected 0 < start < end", .0.start, .0.end)]
    InvalidLifeRange(Range<u32>),

    /// `max_alive` must be in `1..=capacity`.
    #[error("Invalid max_alive {max_alive}: expected 1..={capacity}")]
    InvalidMaxAlive { max_alive: u32, capacity: u32 },

    /// A vector or tuning constant is NaN or infinite.
    #[error("Non-finite value for `{0}`")]
    NonFinite(&'static str),

    /// Frame clock interval of zero.
    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    /// MSAA sample count other than 1 or 4.
    #[error("Unsupported sample count {0}: expected 1 or 4")]
    InvalidSampleCount(u32),

    /// Failed to read a config file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON config.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,

    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// The surface reported no usable texture format.
    #[error("Surface has no supported texture format")]
    NoSurfaceFormat,
}

/// Errors that can occur when running the viewer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Emitter or viewer configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for emitter construction and config loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_range_message() {
        let err = ConfigError::InvalidLifeRange(200..30);
        assert_eq!(
            err.to_string(),
            "Invalid life range 200..30: expected 0 < start < end"
        );
    }

    #[test]
    fn test_config_error_wraps_into_app_error() {
        let err: AppError = ConfigError::ZeroCapacity.into();
        assert!(matches!(err, AppError::Config(ConfigError::ZeroCapacity)));
        assert!(err.to_string().contains("capacity"));
    }
}
