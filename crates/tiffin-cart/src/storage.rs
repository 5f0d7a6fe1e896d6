//! # Cart Storage Seam
//!
//! The cart persists as a single serialized document (a JSON array of cart
//! lines) behind the `CartStorage` trait. The trait keeps the store testable
//! and keeps the document's location a deployment detail.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

/// Durable storage for the one cart document.
///
/// Implementations must be cheap to call repeatedly: the store writes after
/// every mutation.
pub trait CartStorage: Send + Sync {
    /// Reads the stored document, `Ok(None)` when nothing is stored.
    fn read(&self) -> io::Result<Option<String>>;

    /// Writes the document, replacing any previous content.
    fn write(&self, document: &str) -> io::Result<()>;

    /// Deletes the document; deleting an absent document is not an error.
    fn delete(&self) -> io::Result<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage under the platform app-data directory (or an
/// explicit path).
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// Creates storage at the platform default location, e.g.
    /// `~/.local/share/tiffin/cart.json` on Linux.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn in_app_dir() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("app", "tiffin", "tiffin")?;
        Some(FileStorage {
            path: dirs.data_dir().join("cart.json"),
        })
    }

    /// The path of the stored document.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, document)?;
        debug!(path = %self.path.display(), "cart document written");
        Ok(())
    }

    fn delete(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Creates empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a document; used to test recovery
    /// paths.
    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryStorage {
            document: Mutex::new(Some(document.into())),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.document.lock().expect("storage mutex poisoned").clone())
    }

    fn write(&self, document: &str) -> io::Result<()> {
        *self.document.lock().expect("storage mutex poisoned") = Some(document.to_string());
        Ok(())
    }

    fn delete(&self) -> io::Result<()> {
        *self.document.lock().expect("storage mutex poisoned") = None;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);

        storage.write("[]").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));

        storage.delete().unwrap();
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("cart.json"));

        assert_eq!(storage.read().unwrap(), None);

        storage.write("[{\"itemId\":\"x\"}]").unwrap();
        assert_eq!(
            storage.read().unwrap().as_deref(),
            Some("[{\"itemId\":\"x\"}]")
        );

        storage.delete().unwrap();
        assert_eq!(storage.read().unwrap(), None);

        // Deleting again is fine.
        storage.delete().unwrap();
    }
}
