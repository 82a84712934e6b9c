//! Render error types

use std::fmt;

/// Error type for GPU setup and frame presentation
#[derive(Debug)]
pub enum RenderError {
    /// Surface creation, acquisition or presentation failed
    Surface(String),
    /// No adapter can present to the window
    AdapterNotFound,
    /// Device request failed
    Device(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Surface(msg) => write!(f, "Surface error: {}", msg),
            RenderError::AdapterNotFound => write!(f, "No suitable GPU adapter found"),
            RenderError::Device(msg) => write!(f, "Device error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        RenderError::Surface(err.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        RenderError::Surface(err.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        RenderError::Device(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let err = RenderError::Surface("lost".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Surface error"));
        assert!(msg.contains("lost"));
    }

    #[test]
    fn test_adapter_not_found_display() {
        assert_eq!(RenderError::AdapterNotFound.to_string(), "No suitable GPU adapter found");
    }

    #[test]
    fn test_device_error_display() {
        let err = RenderError::Device("out of memory".to_string());
        assert!(err.to_string().contains("out of memory"));
    }

    #[test]
    fn test_from_surface_error() {
        let err: RenderError = wgpu::SurfaceError::Timeout.into();
        assert!(matches!(err, RenderError::Surface(_)));
    }
}
