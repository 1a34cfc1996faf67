//! Download results produced by file storage backends

use bytes::Bytes;
use futures::stream::BoxStream;
use url::Url;

/// Content type used for package archives
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Folder and file addressing a stored file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileLocation {
    pub folder_name: String,
    pub file_name: String,
}

impl FileLocation {
    pub fn new(folder_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            file_name: file_name.into(),
        }
    }
}

impl std::fmt::Display for FileLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.folder_name, self.file_name)
    }
}

/// Chunked file content read lazily from a backend
pub type FileBodyStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Body of a file served by the gateway
pub enum FileBody {
    /// Content already held in memory
    Buffered(Bytes),
    /// Content read from the backend as the client consumes it
    Streamed(FileBodyStream),
}

impl std::fmt::Debug for FileBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffered(bytes) => f.debug_tuple("Buffered").field(&bytes.len()).finish(),
            Self::Streamed(_) => f.write_str("Streamed"),
        }
    }
}

/// Streamed bodies are never equal, even to themselves.
impl PartialEq for FileBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Buffered(a), Self::Buffered(b)) => a == b,
            _ => false,
        }
    }
}

/// File content served directly by the gateway
#[derive(Debug, PartialEq)]
pub struct FileStream {
    pub file_name: String,
    pub content_type: String,
    pub content_length: u64,
    pub body: FileBody,
}

impl FileStream {
    /// File whose content is already in memory
    pub fn new(file_name: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            file_name: file_name.into(),
            content_type: OCTET_STREAM_CONTENT_TYPE.to_string(),
            content_length: body.len() as u64,
            body: FileBody::Buffered(body),
        }
    }

    /// File read chunk by chunk; `content_length` comes from the backend's metadata
    pub fn streamed(
        file_name: impl Into<String>,
        content_length: u64,
        body: FileBodyStream,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: OCTET_STREAM_CONTENT_TYPE.to_string(),
            content_length,
            body: FileBody::Streamed(body),
        }
    }
}

/// What the storage backend wants the client to receive
#[derive(Debug, PartialEq)]
pub enum DownloadResponse {
    /// Send the client elsewhere (CDN, blob endpoint)
    Redirect { location: Url },
    /// Serve the bytes directly
    Stream(FileStream),
    /// Nothing stored under the requested name
    NotFound(FileLocation),
}

impl DownloadResponse {
    pub fn redirect(location: Url) -> Self {
        Self::Redirect { location }
    }

    pub fn not_found(folder_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::NotFound(FileLocation::new(folder_name, file_name))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redirect { .. } => "redirect",
            Self::Stream(_) => "stream",
            Self::NotFound(_) => "not_found",
        }
    }
}
