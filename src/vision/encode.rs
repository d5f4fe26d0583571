use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::info;
use uuid::Uuid;

use crate::error::EncodeError;

/// Persist a frame as PNG under `dir` and return its path.
pub fn save_png(image: &RgbaImage, dir: &Path) -> Result<PathBuf, EncodeError> {
    std::fs::create_dir_all(dir)?;
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = dir.join(format!("screenshot_{}_{}.png", secs, Uuid::new_v4().simple()));

    image.save_with_format(&path, ImageFormat::Png)?;
    info!("Screenshot saved to {}", path.display());
    Ok(path)
}

/// Lossy JPEG at `quality` (1..=100), base64 encoded. Alpha is dropped.
pub fn encode_jpeg_base64(image: &RgbaImage, quality: u8) -> Result<String, EncodeError> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
        encoder.encode_image(&rgb)?;
    }
    Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
}
