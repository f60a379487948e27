//! Magic-byte content sniffing

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected
pub const SNIFF_LEN: u64 = 512;

/// MIME reported for unrecognised content containing NUL bytes
pub const BINARY_MIME: &str = "application/octet-stream";

/// MIME reported for unrecognised content without NUL bytes
pub const TEXT_MIME: &str = "text/plain";

/// Result of sniffing a file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sniffed {
    pub mime: String,
    /// Canonical extension of the detected format, with leading `.`
    pub marker: Option<String>,
    /// Header contains a NUL byte, whether or not the format was recognised
    pub binary: bool,
}

/// Read up to [`SNIFF_LEN`] bytes of `path` and classify them.
///
/// # Errors
/// Returns an `io::Error` if the file cannot be opened or read. A file
/// shorter than the sniff window is not an error.
pub fn sniff_path(path: &Path) -> io::Result<Sniffed> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(sniff_bytes(&header))
}

/// Classify a content header by signature.
#[must_use]
pub fn sniff_bytes(header: &[u8]) -> Sniffed {
    let binary = header.contains(&0);
    if let Some(kind) = infer::get(header) {
        return Sniffed {
            mime: kind.mime_type().to_string(),
            marker: Some(format!(".{}", kind.extension())),
            binary,
        };
    }

    let mime = if binary { BINARY_MIME } else { TEXT_MIME };
    Sniffed {
        mime: mime.to_string(),
        marker: None,
        binary,
    }
}
