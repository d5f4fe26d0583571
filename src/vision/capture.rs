use image::RgbaImage;
use tracing::debug;
use xcap::Monitor;

use crate::error::CaptureError;

/// Source of full-screen frames.
pub trait ScreenSource: Send + Sync {
    fn capture(&self) -> Result<RgbaImage, CaptureError>;
}

/// Captures the first display reported by the platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapScreen;

impl ScreenSource for XcapScreen {
    fn capture(&self) -> Result<RgbaImage, CaptureError> {
        let monitors = Monitor::all().map_err(|e| CaptureError::Platform(e.to_string()))?;
        let monitor = monitors.into_iter().next().ok_or(CaptureError::NoDisplay)?;

        let frame = monitor
            .capture_image()
            .map_err(|e| CaptureError::Platform(e.to_string()))?;
        let (width, height) = (frame.width(), frame.height());
        debug!("Captured {}x{} frame", width, height);

        // Rebuild through raw bytes so xcap's `image` version need not match ours.
        RgbaImage::from_raw(width, height, frame.into_raw())
            .ok_or_else(|| CaptureError::Platform("frame buffer size mismatch".to_string()))
    }
}
