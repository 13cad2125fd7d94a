//! Content negotiation: choosing how a request body is encoded and how a response body is
//! decoded.
//!
//! Both directions dispatch on a closed set of built-in kinds (text, bytes, stream, file) and
//! fall back to the client's [`Serializer`] for everything else, so raw payloads never take a
//! detour through the structured format.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use easyquest_interface::{Body as BodyImpl, StreamReader};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::body::{Body, StructuredContent};
use crate::serializer::Serializer;
use crate::{Error, Result};

/// Encodes a declared request body into its wire form.
///
/// Returns `None` for [`Body::Empty`]. Stream sources are opened through `open_stream`, files are
/// opened here so a missing file is reported before any network I/O.
pub(crate) fn encode_body<S, B>(
    body: &Body<S>,
    serializer: &dyn Serializer,
    open_stream: impl FnOnce(&S) -> io::Result<B>,
) -> Result<Option<BodyImpl<B>>> {
    Ok(Some(match body {
        Body::Empty => return Ok(None),
        Body::Text(text) => BodyImpl::Bytes {
            content: match text {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                Cow::Owned(s) => Cow::Owned(s.clone().into_bytes()),
            },
        },
        Body::Bytes(bytes) => BodyImpl::Bytes {
            content: bytes.clone(),
        },
        Body::Stream(source) => BodyImpl::Stream(StreamReader {
            stream: open_stream(source).map_err(Error::http_io)?,
            content_length: None,
        }),
        Body::File(path) => {
            let (file, content_length) = open_body_file(path)?;
            BodyImpl::File {
                file,
                content_length,
            }
        }
        Body::Structured(content) => BodyImpl::Bytes {
            content: Cow::Owned(render_structured(content, serializer)?.into_bytes()),
        },
    }))
}

fn open_body_file(path: &Path) -> Result<(File, u64)> {
    let not_found = |source| Error::FileNotFound {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(not_found)?;
    let metadata = file.metadata().map_err(not_found)?;
    if !metadata.is_file() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok((file, metadata.len()))
}

fn render_structured(content: &StructuredContent, serializer: &dyn Serializer) -> Result<String> {
    let value = content
        .to_value()
        .map_err(|e| Error::Serialization(e.into()))?;
    serializer.serialize(&value).map_err(Error::Serialization)
}

/// How a response body is turned into the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoder {
    /// The body is not read.
    Discard,
    /// The body is read as UTF-8 text.
    Text,
    /// The body is read as raw bytes.
    Bytes,
    /// The body is handed out as a stream.
    Stream,
    /// The body is written to a file. `None` picks a fresh temporary file.
    File(Option<PathBuf>),
    /// The body is read as text and parsed by the serializer.
    Structured,
}

/// The output of a [`Decoder`]. `R` is the stream type of the blocking or async flavour.
#[derive(Debug)]
pub enum Decoded<R> {
    /// Output of [`Decoder::Discard`].
    Nothing,
    /// Output of [`Decoder::Text`].
    Text(String),
    /// Output of [`Decoder::Bytes`].
    Bytes(Vec<u8>),
    /// Output of [`Decoder::Stream`].
    Stream(R),
    /// Output of [`Decoder::File`], holding the path written to.
    File(PathBuf),
    /// Output of [`Decoder::Structured`]. `None` if the body was blank.
    Structured(Option<Value>),
}

impl<R> Decoded<R> {
    fn kind(&self) -> &'static str {
        match self {
            Decoded::Nothing => "nothing",
            Decoded::Text(_) => "text",
            Decoded::Bytes(_) => "bytes",
            Decoded::Stream(_) => "stream",
            Decoded::File(_) => "file",
            Decoded::Structured(_) => "structured",
        }
    }

    fn mismatch<T>(self, expected: &'static str) -> Result<T> {
        Err(Error::Deserialization(
            format!("expected {expected} body, decoded {}", self.kind()).into(),
        ))
    }
}

/// Types a response body can be decoded into.
///
/// The requested type picks its [`Decoder`]: `()` discards the body, `String` reads text,
/// `Vec<u8>` reads bytes, [`PathBuf`] saves the body to a file and [`Structured<T>`] goes
/// through the serializer. The blocking and async stream handles implement it for their own
/// flavour.
pub trait FromBody<R>: Sized {
    /// The decoder producing this type.
    fn decoder() -> Decoder;

    /// Converts the decoder output.
    fn from_decoded(decoded: Decoded<R>) -> Result<Self>;
}

impl<R> FromBody<R> for () {
    fn decoder() -> Decoder {
        Decoder::Discard
    }

    fn from_decoded(decoded: Decoded<R>) -> Result<Self> {
        match decoded {
            Decoded::Nothing => Ok(()),
            other => other.mismatch("no"),
        }
    }
}

impl<R> FromBody<R> for String {
    fn decoder() -> Decoder {
        Decoder::Text
    }

    fn from_decoded(decoded: Decoded<R>) -> Result<Self> {
        match decoded {
            Decoded::Text(text) => Ok(text),
            other => other.mismatch("text"),
        }
    }
}

impl<R> FromBody<R> for Vec<u8> {
    fn decoder() -> Decoder {
        Decoder::Bytes
    }

    fn from_decoded(decoded: Decoded<R>) -> Result<Self> {
        match decoded {
            Decoded::Bytes(bytes) => Ok(bytes),
            other => other.mismatch("bytes"),
        }
    }
}

impl<R> FromBody<R> for PathBuf {
    fn decoder() -> Decoder {
        Decoder::File(None)
    }

    fn from_decoded(decoded: Decoded<R>) -> Result<Self> {
        match decoded {
            Decoded::File(path) => Ok(path),
            other => other.mismatch("file"),
        }
    }
}

/// A response body decoded by the client's serializer.
///
/// Holds `None` when the response body was empty or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structured<T>(pub Option<T>);

impl<T> Structured<T> {
    /// Unwraps the decoded value.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<R, T: DeserializeOwned> FromBody<R> for Structured<T> {
    fn decoder() -> Decoder {
        Decoder::Structured
    }

    fn from_decoded(decoded: Decoded<R>) -> Result<Self> {
        match decoded {
            Decoded::Structured(None) => Ok(Structured(None)),
            Decoded::Structured(Some(value)) => serde_json::from_value(value)
                .map(|value| Structured(Some(value)))
                .map_err(|e| Error::Deserialization(e.into())),
            other => other.mismatch("structured"),
        }
    }
}

/// Parses a response text with the serializer. Blank text yields `None`.
pub(crate) fn decode_structured(text: &str, serializer: &dyn Serializer) -> Result<Option<Value>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serializer
        .deserialize(text)
        .map(Some)
        .map_err(|e| {
            tracing::warn!("failed to decode structured response body: {e}");
            Error::Deserialization(e)
        })
}

/// The file a [`Decoder::File`] writes to.
///
/// A fresh temporary file is deleted again when dropped before [`ResponseFile::keep`], so a
/// download that fails halfway leaves nothing behind. A caller-chosen file stays either way.
pub(crate) enum ResponseFile {
    Chosen { file: File, path: PathBuf },
    Temporary(NamedTempFile),
}

impl ResponseFile {
    pub(crate) fn create(path: Option<&Path>) -> Result<Self> {
        Self::create_in(path, &std::env::temp_dir())
    }

    fn create_in(path: Option<&Path>, temp_dir: &Path) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::create(path).map_err(Error::http_io)?;
                Ok(Self::Chosen {
                    file,
                    path: path.to_owned(),
                })
            }
            None => tempfile::Builder::new()
                .prefix("easyquest-")
                .suffix(".tmp")
                .tempfile_in(temp_dir)
                .map(Self::Temporary)
                .map_err(Error::http_io),
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> &mut File {
        match self {
            Self::Chosen { file, .. } => file,
            Self::Temporary(file) => file.as_file_mut(),
        }
    }

    /// Closes the file and returns where the body was written.
    pub(crate) fn keep(self) -> Result<PathBuf> {
        match self {
            Self::Chosen { path, .. } => Ok(path),
            Self::Temporary(file) => file
                .keep()
                .map(|(_, path)| path)
                .map_err(|e| Error::http_io(e.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::error::BoxError;
    use crate::serializer::JsonSerializer;

    type TestBody = Body<Arc<str>>;

    fn encode(body: &TestBody) -> Result<Option<BodyImpl<String>>> {
        encode_body(body, &JsonSerializer, |source| Ok(source.to_string()))
    }

    fn wire_bytes(body: Option<BodyImpl<String>>) -> Vec<u8> {
        match body {
            Some(BodyImpl::Bytes { content }) => content.into_owned(),
            other => panic!("expected bytes, got {:?}", other.map(|b| b.kind())),
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        username: String,
    }

    #[test]
    fn test_empty_body_encodes_to_nothing() {
        assert!(encode(&TestBody::empty()).unwrap().is_none());
    }

    #[test]
    fn test_text_and_bytes_bypass_serializer() {
        let text = wire_bytes(encode(&TestBody::text(r#"{"raw": true}"#)).unwrap());
        assert_eq!(text, br#"{"raw": true}"#);
        let bytes = wire_bytes(encode(&TestBody::bytes(vec![0u8, 159, 146, 150])).unwrap());
        assert_eq!(bytes, [0u8, 159, 146, 150]);
    }

    #[test]
    fn test_stream_opened_at_encode_time() {
        let body = TestBody::Stream(Arc::from("opened"));
        match encode(&body).unwrap() {
            Some(BodyImpl::Stream(reader)) => {
                assert_eq!(reader.stream, "opened");
                assert_eq!(reader.content_length, None);
            }
            other => panic!("expected stream, got {:?}", other.map(|b| b.kind())),
        }

        let err = encode_body(&body, &JsonSerializer, |_| -> io::Result<()> {
            Err(io::Error::other("gone"))
        })
        .unwrap_err();
        assert!(matches!(err, Error::HttpCall(_)));
    }

    #[test]
    fn test_structured_goes_through_serializer() {
        let body = TestBody::structured(Sample {
            username: "test".into(),
        });
        let wire = wire_bytes(encode(&body).unwrap());
        assert_eq!(wire, br#"{"username":"test"}"#);
    }

    #[test]
    fn test_structured_serializer_failure() {
        #[derive(Debug)]
        struct Refusing;
        impl Serializer for Refusing {
            fn serialize(&self, _value: &Value) -> std::result::Result<String, BoxError> {
                Err("refused".into())
            }
            fn deserialize(&self, _data: &str) -> std::result::Result<Value, BoxError> {
                Err("refused".into())
            }
        }

        let body = TestBody::structured(1);
        let err = encode_body(&body, &Refusing, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_structured_unrepresentable_value() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str("ok")?;
                Err(serde::ser::Error::custom("broken value"))
            }
        }

        let err = encode(&TestBody::structured(Broken)).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_file_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file content").unwrap();

        match encode(&TestBody::file(file.path())).unwrap() {
            Some(BodyImpl::File { content_length, .. }) => assert_eq!(content_length, 12),
            other => panic!("expected file, got {:?}", other.map(|b| b.kind())),
        }
    }

    #[test]
    fn test_missing_file_body() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        match encode(&TestBody::file(&missing)).unwrap_err() {
            Error::FileNotFound { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            encode(&TestBody::file(dir.path())).unwrap_err(),
            Error::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_decoder_selection() {
        assert_eq!(<() as FromBody<()>>::decoder(), Decoder::Discard);
        assert_eq!(<String as FromBody<()>>::decoder(), Decoder::Text);
        assert_eq!(<Vec<u8> as FromBody<()>>::decoder(), Decoder::Bytes);
        assert_eq!(<PathBuf as FromBody<()>>::decoder(), Decoder::File(None));
        assert_eq!(
            <Structured<Sample> as FromBody<()>>::decoder(),
            Decoder::Structured
        );
    }

    #[test]
    fn test_structured_decoding() {
        let value = decode_structured(r#"{"username": "test"}"#, &JsonSerializer).unwrap();
        let decoded = Structured::<Sample>::from_decoded(Decoded::<()>::Structured(value)).unwrap();
        assert_eq!(
            decoded.into_inner(),
            Some(Sample {
                username: "test".into()
            })
        );
    }

    #[test]
    fn test_blank_structured_body_is_none() {
        assert_eq!(decode_structured("", &JsonSerializer).unwrap(), None);
        assert_eq!(decode_structured(" \n\t", &JsonSerializer).unwrap(), None);
        let decoded = Structured::<Sample>::from_decoded(Decoded::<()>::Structured(None)).unwrap();
        assert_eq!(decoded, Structured(None));
    }

    #[test]
    fn test_structured_decoding_failures() {
        assert!(matches!(
            decode_structured("{not json", &JsonSerializer),
            Err(Error::Deserialization(_))
        ));
        let value = decode_structured(r#"{"user": 1}"#, &JsonSerializer).unwrap();
        assert!(matches!(
            Structured::<Sample>::from_decoded(Decoded::<()>::Structured(value)),
            Err(Error::Deserialization(_))
        ));
    }

    #[test]
    fn test_discard_accepts_only_nothing() {
        assert!(<()>::from_decoded(Decoded::<()>::Nothing).is_ok());
        assert!(<()>::from_decoded(Decoded::<()>::Text("x".into())).is_err());
    }

    #[test]
    fn test_response_file_fresh_temp() {
        let first = ResponseFile::create(None).unwrap().keep().unwrap();
        let second = ResponseFile::create(None).unwrap().keep().unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        std::fs::remove_file(first).unwrap();
        std::fs::remove_file(second).unwrap();
    }

    struct FailingReader {
        remaining: usize,
    }

    impl io::Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::ErrorKind::TimedOut.into());
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(b'x');
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_failed_download_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = ResponseFile::create_in(None, dir.path()).unwrap();
        let err = io::copy(&mut FailingReader { remaining: 100 }, file.as_file_mut()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        drop(file);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_kept_temp_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = ResponseFile::create_in(None, dir.path()).unwrap();
        file.as_file_mut().write_all(b"done").unwrap();
        let path = file.keep().unwrap();

        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("easyquest-") && name.ends_with(".tmp"), "{name}");
        assert_eq!(std::fs::read(&path).unwrap(), b"done");
    }

    #[test]
    fn test_chosen_file_is_truncated_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, "previous longer content").unwrap();

        let mut file = ResponseFile::create_in(Some(&target), dir.path()).unwrap();
        file.as_file_mut().write_all(b"new").unwrap();
        assert_eq!(file.keep().unwrap(), target);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }
}
