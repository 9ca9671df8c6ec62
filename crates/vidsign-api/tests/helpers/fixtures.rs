//! Upload fixtures

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// Bytes that start like an ISO BMFF file, padded to `size`.
pub fn fake_mp4(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x18]);
    data.extend_from_slice(b"ftypmp42");
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"mp42isom");
    data.extend((0..size.saturating_sub(data.len())).map(|i| (i % 251) as u8));
    data.truncate(size);
    data
}

pub fn video_part(data: Vec<u8>, filename: &str) -> Part {
    Part::bytes(Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type("video/mp4")
}

/// Signing form with the required metadata fields.
pub fn sign_form(data: Vec<u8>, filename: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("video", video_part(data, filename))
        .add_text("organization", "Acme")
        .add_text("ai_tool", "Veo 3")
}
