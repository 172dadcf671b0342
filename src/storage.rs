//! Disk storage for uploaded apartment images.
//!
//! The database is the source of truth for which images an apartment has;
//! files on disk are only blobs referenced by public path. Removing a blob is
//! therefore a best-effort cleanup that never fails the caller.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// File received from a client, waiting to be moved into storage.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// File name as sent by the client, used only for its extension.
    pub original_name: Option<String>,
    /// Location of the received bytes.
    pub path: PathBuf,
}

pub trait ImageStorage {
    /// Stores the upload under a generated name and returns its public path.
    fn store(&self, upload: &UploadedImage) -> io::Result<String>;

    /// Best-effort cleanup of a stored image.
    ///
    /// Must not block the caller on file system work and must not report
    /// failure; errors are only logged.
    fn discard(&self, public_path: &str);
}

/// Stores images as plain files inside a single directory.
#[derive(Debug, Clone)]
pub struct FsImageStorage {
    root: PathBuf,
    public_prefix: String,
}

impl FsImageStorage {
    /// `root` is the directory holding the files, `public_prefix` the URL path
    /// they are served under (for example `/uploads/apartments`).
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a public path back to a file inside `root`.
    ///
    /// Only a plain file name directly under the prefix is accepted.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;

        let is_plain_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);

        is_plain_name.then(|| self.root.join(name))
    }

    fn generate_name(original_name: Option<&str>) -> String {
        let extension = original_name
            .map(Path::new)
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
            None => Uuid::new_v4().to_string(),
        }
    }
}

fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

impl ImageStorage for FsImageStorage {
    fn store(&self, upload: &UploadedImage) -> io::Result<String> {
        std::fs::create_dir_all(&self.root)?;

        let name = Self::generate_name(upload.original_name.as_deref());
        std::fs::copy(&upload.path, self.root.join(&name))?;

        Ok(format!("{}/{}", self.public_prefix, name))
    }

    fn discard(&self, public_path: &str) {
        let Some(path) = self.resolve(public_path) else {
            log::warn!("Refusing to delete {public_path}: outside of image storage");
            return;
        };

        std::thread::spawn(move || match remove_file_if_exists(&path) {
            Ok(()) => log::debug!("Deleted image file {}", path.display()),
            Err(e) => log::warn!("Failed to delete image file {}: {e}", path.display()),
        });
    }
}
