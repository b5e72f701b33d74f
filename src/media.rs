//! Media attachments for multimodal requests.
//!
//! Attachments are path-backed and lazy: constructing one never touches the
//! filesystem. The file is read once, at encoding time, when the adapter
//! turns the attachment into the base64 payload the API expects.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ImageFormat {
    /// PNG format (default).
    #[default]
    Png,
    /// JPEG format.
    Jpeg,
    /// GIF format.
    Gif,
    /// WebP format.
    Webp,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Detect format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect format from magic bytes (file signature).
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }
        match bytes {
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x47, 0x49, 0x46, 0x38, ..] => Some(Self::Gif),
            [0x52, 0x49, 0x46, 0x46, ..] if bytes.len() >= 12 && &bytes[8..12] == b"WEBP" => {
                Some(Self::Webp)
            }
            _ => None,
        }
    }
}

/// Supported audio formats.
///
/// Groq's chat endpoint accepts the same `input_audio` formats as OpenAI's;
/// the format name rides along with the base64 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AudioFormat {
    /// WAV format (default).
    #[default]
    Wav,
    /// MP3 format.
    Mp3,
    /// OGG format.
    Ogg,
    /// FLAC format.
    Flac,
    /// M4A format.
    M4a,
    /// WebM format.
    Webm,
}

impl AudioFormat {
    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::M4a => "audio/m4a",
            Self::Webm => "audio/webm",
        }
    }

    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Webm => "webm",
        }
    }

    /// Get the format string for API requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.extension()
    }

    /// Detect format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "ogg" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

fn format_from_path<F>(path: &Path, detect: impl Fn(&str) -> Option<F>) -> Option<F> {
    path.extension().and_then(|e| e.to_str()).and_then(detect)
}

/// An image referenced by a local file path.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    path: PathBuf,
    format: ImageFormat,
}

impl ImageAttachment {
    /// Create an attachment from a file path (lazy, no file read).
    ///
    /// The format is guessed from the extension and corrected from the file
    /// signature once the bytes are read.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = format_from_path(&path, ImageFormat::from_extension).unwrap_or_default();
        Self { path, format }
    }

    /// The referenced file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The format guessed for this attachment.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Read the file and encode it as a `data:<mime>;base64,...` URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Media`] if the file cannot be read.
    pub async fn to_data_url(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::media(self.path.display().to_string(), e))?;
        let format = ImageFormat::from_magic_bytes(&bytes).unwrap_or(self.format);
        Ok(format!(
            "data:{};base64,{}",
            format.mime_type(),
            BASE64.encode(bytes)
        ))
    }
}

impl fmt::Display for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Image: {}]", self.path.display())
    }
}

/// Base64-encoded audio ready for an `input_audio` content part.
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    /// Base64 payload.
    pub data: String,
    /// Format the payload is in.
    pub format: AudioFormat,
}

/// An audio clip referenced by a local file path.
#[derive(Debug, Clone)]
pub struct AudioAttachment {
    path: PathBuf,
    format: AudioFormat,
}

impl AudioAttachment {
    /// Create an attachment from a file path (lazy, no file read).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = format_from_path(&path, AudioFormat::from_extension).unwrap_or_default();
        Self { path, format }
    }

    /// The referenced file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The format guessed for this attachment.
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Read the file and base64-encode its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Media`] if the file cannot be read.
    pub async fn encode(&self) -> Result<EncodedAudio> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::media(self.path.display().to_string(), e))?;
        Ok(EncodedAudio {
            data: BASE64.encode(bytes),
            format: self.format,
        })
    }
}

impl fmt::Display for AudioAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Audio: {}]", self.path.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    mod image_format {
        use super::*;

        #[test]
        fn detects_from_magic_bytes() {
            assert_eq!(
                ImageFormat::from_magic_bytes(&PNG_MAGIC),
                Some(ImageFormat::Png)
            );
            assert_eq!(
                ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
                Some(ImageFormat::Jpeg)
            );
            assert_eq!(ImageFormat::from_magic_bytes(&[0x00, 0x01]), None);
        }

        #[test]
        fn detects_from_extension() {
            assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
            assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
            assert_eq!(ImageFormat::from_extension("tiff"), None);
        }

        #[test]
        fn webp_requires_riff_header() {
            let mut webp = Vec::from(*b"RIFF");
            webp.extend_from_slice(&[0, 0, 0, 0]);
            webp.extend_from_slice(b"WEBP");
            assert_eq!(ImageFormat::from_magic_bytes(&webp), Some(ImageFormat::Webp));
            assert_eq!(ImageFormat::from_magic_bytes(b"RIFF"), None);
        }
    }

    mod audio_format {
        use super::*;

        #[test]
        fn api_string_matches_extension() {
            assert_eq!(AudioFormat::Wav.as_str(), "wav");
            assert_eq!(AudioFormat::Mp3.as_str(), "mp3");
        }

        #[test]
        fn detects_from_extension() {
            assert_eq!(AudioFormat::from_extension("M4A"), Some(AudioFormat::M4a));
            assert_eq!(AudioFormat::from_extension("aiff"), None);
        }
    }

    mod image_attachment {
        use super::*;

        #[tokio::test]
        async fn encodes_data_url_from_file() {
            let tmp = assert_fs::TempDir::new().unwrap();
            let file = tmp.child("photo.png");
            file.write_binary(&PNG_MAGIC).unwrap();

            let image = ImageAttachment::from_path(file.path());
            let url = image.to_data_url().await.unwrap();

            assert!(url.starts_with("data:image/png;base64,"));
            assert!(url.ends_with(&BASE64.encode(PNG_MAGIC)));
        }

        #[tokio::test]
        async fn magic_bytes_override_wrong_extension() {
            let tmp = assert_fs::TempDir::new().unwrap();
            // JPEG bytes behind a .png name
            let file = tmp.child("mislabeled.png");
            file.write_binary(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();

            let image = ImageAttachment::from_path(file.path());
            let url = image.to_data_url().await.unwrap();

            assert!(url.starts_with("data:image/jpeg;base64,"));
        }

        #[tokio::test]
        async fn missing_file_is_media_error() {
            let image = ImageAttachment::from_path("/nonexistent/omnichat-test.png");
            let err = image.to_data_url().await.unwrap_err();

            assert!(matches!(err, Error::Media { .. }));
            assert!(err.to_string().contains("omnichat-test.png"));
        }
    }

    mod audio_attachment {
        use super::*;

        #[tokio::test]
        async fn encodes_payload_and_format() {
            let tmp = assert_fs::TempDir::new().unwrap();
            let file = tmp.child("clip.mp3");
            file.write_binary(&[1, 2, 3, 4, 5]).unwrap();

            let audio = AudioAttachment::from_path(file.path());
            let encoded = audio.encode().await.unwrap();

            assert_eq!(encoded.format, AudioFormat::Mp3);
            assert_eq!(encoded.data, BASE64.encode([1, 2, 3, 4, 5]));
        }

        #[test]
        fn unknown_extension_defaults_to_wav() {
            let audio = AudioAttachment::from_path("/tmp/recording.raw");
            assert_eq!(audio.format(), AudioFormat::Wav);
        }

        #[tokio::test]
        async fn missing_file_is_media_error() {
            let audio = AudioAttachment::from_path("/nonexistent/clip.wav");
            assert!(matches!(
                audio.encode().await.unwrap_err(),
                Error::Media { .. }
            ));
        }
    }
}
