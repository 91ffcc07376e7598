//! Error types for GPU setup

use std::fmt;

/// Errors that can occur while bringing up the GPU context.
#[derive(Debug)]
pub enum RendererError {
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create the GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            RendererError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            RendererError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            RendererError::NoSurfaceFormat => write!(f, "Surface supports no texture formats"),
        }
    }
}

impl std::error::Error for RendererError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RendererError::SurfaceCreation(e) => Some(e),
            RendererError::NoAdapter(e) => Some(e),
            RendererError::DeviceCreation(e) => Some(e),
            RendererError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for RendererError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RendererError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for RendererError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        RendererError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for RendererError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RendererError::DeviceCreation(e)
    }
}
