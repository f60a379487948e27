//! Testing utilities for prevue
//!
//! Fixtures shared by unit tests: temporary targets, sample file headers
//! with known signatures, and an [`OutputWriter`] that records messages.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::output::{MessageLevel, OutputWriter};
use crate::target::Target;

/// Minimal GIF89a header
pub const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff\x00\x00\x00!\xf9\x04";

/// PNG signature followed by an IHDR chunk start
pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01";

/// ISO base media header with an `isom` brand
pub const MP4_HEADER: &[u8] = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00isomiso2mp41";

/// SQLite 3 database header
pub const SQLITE_HEADER: &[u8] = b"SQLite format 3\x00\x10\x00\x01\x01\x00\x40\x20\x20";

/// ZIP local file header for a stored `docs.txt` entry
pub const ZIP_HEADER: &[u8] = b"PK\x03\x04\x14\x00\x00\x00\x08\x00\x00\x00\x21\x00\
\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x08\x00\x00\x00docs.txt";

/// Write `content` to `name` inside a fresh temporary directory and resolve it.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for the duration of the test.
///
/// # Panics
/// Panics if the directory or file cannot be created.
pub fn write_target(name: &str, content: &[u8]) -> (TempDir, Target) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test target");
    let target = Target::resolve(&path).expect("Failed to resolve test target");
    (dir, target)
}

/// Output writer that keeps every message in memory
#[derive(Default)]
pub struct MemoryWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl MemoryWriter {
    /// Messages written so far, oldest first
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_target_resolves_absolute() {
        let (dir, target) = write_target("sample.txt", b"content");
        assert!(target.path().is_absolute());
        assert_eq!(fs::read(target.path()).unwrap(), b"content");
        assert!(target.path().starts_with(fs::canonicalize(dir.path()).unwrap()));
    }

    #[test]
    fn test_write_target_cleanup() {
        let path = {
            let (_dir, target) = write_target("gone.txt", b"x");
            target.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
