use thiserror::Error;

/// Fatal initialization failures. Anything here stops startup; the page
/// keeps working without the animated backdrop.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("missing required anchor element #{0}")]
    MissingAnchor(&'static str),
    #[error("#{id} is not a {expected}")]
    WrongElement {
        id: &'static str,
        expected: &'static str,
    },
    #[error("could not create render canvas: {0}")]
    CanvasCreation(String),
    #[error("could not create overlay node: {0}")]
    OverlayNode(String),
    #[error("failed to create WebGPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no WebGPU adapter available")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("request_device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
