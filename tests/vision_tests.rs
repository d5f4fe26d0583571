use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use labo::vision::{encode_jpeg_base64, save_png};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 3) as u8, (y * 5) as u8, 90, 255]))
}

#[test]
fn test_jpeg_round_trip_keeps_dimensions() {
    let frame = gradient(64, 48);
    let encoded = encode_jpeg_base64(&frame, 30).unwrap();

    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();

    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn test_out_of_range_quality_is_clamped() {
    let frame = gradient(8, 8);
    assert!(encode_jpeg_base64(&frame, 0).is_ok());
    assert!(encode_jpeg_base64(&frame, 255).is_ok());
}

#[test]
fn test_png_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let frame = gradient(20, 10);

    let path = save_png(&frame, dir.path()).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

    let reloaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(reloaded, frame);
}

#[test]
fn test_consecutive_saves_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let frame = gradient(4, 4);

    let a = save_png(&frame, dir.path()).unwrap();
    let b = save_png(&frame, dir.path()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_save_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("captures").join("today");

    let path = save_png(&gradient(2, 2), &nested).unwrap();
    assert!(path.starts_with(&nested));
}
