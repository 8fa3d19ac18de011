//! Input loading: raw audio and image bytes from the filesystem.
//!
//! The image is additionally exposed as a base64 string (standard alphabet,
//! no line wrapping) for embedding in the reasoning request. No format
//! validation happens here; malformed content only surfaces as a provider
//! error downstream.

use crate::error::{Result, TiresiasError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

/// The two run inputs, loaded up front before any provider call.
#[derive(Debug, Clone)]
pub struct RunInputs {
    /// Raw encoded audio bytes (MP3 or equivalent)
    pub audio: Vec<u8>,
    /// File name of the audio input, forwarded to the transcription provider
    /// so it can infer the container format
    pub audio_filename: String,
    /// Raw image bytes
    pub image: Vec<u8>,
    /// Base64 encoding of the image bytes
    pub image_b64: String,
}

/// Read a file, mapping a missing path to `ResourceNotFound`.
fn read_input(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TiresiasError::ResourceNotFound {
                path: path.display().to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Load the raw audio question bytes.
pub fn load_audio(path: &Path) -> Result<Vec<u8>> {
    read_input(path)
}

/// Load the raw image bytes.
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    read_input(path)
}

/// Encode image bytes as base64 (standard alphabet, no line wrapping).
pub fn encode_image(image: &[u8]) -> String {
    STANDARD.encode(image)
}

/// Load both run inputs. Fails before any provider call is attempted if
/// either path does not resolve to a readable file.
pub fn load_inputs(audio_path: &Path, image_path: &Path) -> Result<RunInputs> {
    let audio = load_audio(audio_path)?;
    let image = load_image(image_path)?;
    let image_b64 = encode_image(&image);

    let audio_filename = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.mp3".to_string());

    Ok(RunInputs {
        audio,
        audio_filename,
        image,
        image_b64,
    })
}
