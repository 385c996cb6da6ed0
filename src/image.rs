//! Image input classification and loading.

use crate::error::ImageFetchError;
use crate::transport::Transport;
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Where the captcha image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Remote image, downloaded through the solver's transport
    Url(String),
    /// Local file
    Path(PathBuf),
    /// Raw image bytes
    Bytes(Vec<u8>),
    /// Image already encoded as base64 text
    Base64(String),
}

impl ImageInput {
    /// Classify free-form text: URL, then base64, then local path.
    pub fn classify(text: &str) -> Self {
        if is_url(text) {
            ImageInput::Url(text.to_string())
        } else if is_base64(text) {
            ImageInput::Base64(text.to_string())
        } else {
            ImageInput::Path(PathBuf::from(text))
        }
    }

    /// Load the image into raw bytes.
    pub async fn resolve(self, transport: &dyn Transport) -> Result<Vec<u8>, ImageFetchError> {
        match self {
            ImageInput::Url(url) => {
                tracing::debug!(%url, "downloading captcha image");
                transport
                    .get_bytes(&url)
                    .await
                    .map_err(|source| ImageFetchError::Remote { url, source })
            }
            ImageInput::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| ImageFetchError::Io { path, source }),
            ImageInput::Bytes(bytes) => Ok(bytes),
            ImageInput::Base64(text) => Ok(general_purpose::STANDARD.decode(text.as_bytes())?),
        }
    }

    /// Short description for logs; never includes image data.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageInput::Url(_) => "url",
            ImageInput::Path(_) => "path",
            ImageInput::Bytes(_) => "bytes",
            ImageInput::Base64(_) => "base64",
        }
    }
}

impl From<&str> for ImageInput {
    fn from(text: &str) -> Self {
        ImageInput::classify(text)
    }
}

impl From<String> for ImageInput {
    fn from(text: String) -> Self {
        ImageInput::classify(&text)
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageInput {
    fn from(bytes: &[u8]) -> Self {
        ImageInput::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

/// `http://` or `https://` prefix, case-insensitive.
pub fn is_url(text: &str) -> bool {
    let lower = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whole string is padded standard-alphabet base64.
pub fn is_base64(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^([A-Za-z0-9+/]{4})*([A-Za-z0-9+/]{4}|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{2}==)$",
            )
            .expect("static base64 pattern")
        })
        .is_match(text)
}

/// Base64 text sent in the submission body.
pub fn encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedTransport;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com/a.png"));
        assert!(is_url("HTTPS://example.com/a.png"));
        assert!(!is_url("httpdocs/captcha.png"));
        assert!(!is_url("./http.png"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_is_base64() {
        assert!(is_base64("aGVsbG8="));
        assert!(is_base64("aGVsbG8h"));
        assert!(is_base64("aGk="));
        assert!(!is_base64(""));
        assert!(!is_base64("/tmp/captcha.png"));
        assert!(!is_base64("aGVsbG8"));
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(
            ImageInput::classify("https://x.test/c.jpg"),
            ImageInput::Url("https://x.test/c.jpg".into())
        );
        assert_eq!(
            ImageInput::classify("aGVsbG8="),
            ImageInput::Base64("aGVsbG8=".into())
        );
        assert_eq!(
            ImageInput::classify("images/captcha.jpg"),
            ImageInput::Path(PathBuf::from("images/captcha.jpg"))
        );
        assert_eq!(ImageInput::from(vec![1u8, 2]).kind(), "bytes");
    }

    #[tokio::test]
    async fn test_resolve_each_kind() {
        let transport = ScriptedTransport::new().image("http://img.test/a.png", b"remote");

        let bytes = ImageInput::from("http://img.test/a.png")
            .resolve(&transport)
            .await
            .unwrap();
        assert_eq!(bytes, b"remote");

        let bytes = ImageInput::from(encode(b"inline"))
            .resolve(&transport)
            .await
            .unwrap();
        assert_eq!(bytes, b"inline");

        let bytes = ImageInput::from(&b"\x89PNG"[..])
            .resolve(&transport)
            .await
            .unwrap();
        assert_eq!(bytes, b"\x89PNG");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"on disk").unwrap();
        let bytes = ImageInput::from(file.path())
            .resolve(&transport)
            .await
            .unwrap();
        assert_eq!(bytes, b"on disk");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let transport = ScriptedTransport::new();
        let err = ImageInput::from("/definitely/not/here.png")
            .resolve(&transport)
            .await
            .unwrap_err();
        match err {
            ImageFetchError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_url() {
        let transport = ScriptedTransport::new();
        let err = ImageInput::from("http://wrongimage.com/image.jpg")
            .resolve(&transport)
            .await
            .unwrap_err();
        assert!(matches!(err, ImageFetchError::Remote { ref url, .. } if url == "http://wrongimage.com/image.jpg"));
        assert!(err.to_string().contains("wrong url"));
    }
}
