pub mod capture;
pub mod encode;

use std::sync::Arc;

use image::RgbaImage;

pub use capture::{ScreenSource, XcapScreen};
pub use encode::{encode_jpeg_base64, save_png};

use crate::error::CaptureError;

/// Run a capture on the blocking pool so the runtime keeps scheduling.
pub async fn capture_off_thread(screen: Arc<dyn ScreenSource>) -> Result<RgbaImage, CaptureError> {
    tokio::task::spawn_blocking(move || screen.capture())
        .await
        .map_err(|e| CaptureError::Join(e.to_string()))?
}
