//! Filesystem implementation of the `KeyStore` port.
//!
//! Private keys are written atomically (temp file + rename) and restricted
//! to owner-read (`0o400`) before they become visible under their final name.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::KeyStore;
use crate::domain::key_pair::key_file_name;

/// Stores `{name}.pem` files in a single directory.
pub struct FsKeyStore {
    dir: PathBuf,
}

impl FsKeyStore {
    /// Create a store rooted at `dir`. A leading `~/` is expanded to the
    /// home directory.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: expand_home(dir),
        }
    }
}

fn expand_home(dir: &Path) -> PathBuf {
    match (dir.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => dir.to_path_buf(),
    }
}

impl KeyStore for FsKeyStore {
    fn key_path(&self, name: &str) -> PathBuf {
        self.dir.join(key_file_name(name))
    }

    fn exists(&self, name: &str) -> bool {
        self.key_path(name).exists()
    }

    fn write_private_key(&self, name: &str, pem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating directory {}", self.dir.display()))?;
        let path = self.key_path(name);

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
        writeln!(temp, "{pem}").with_context(|| format!("writing {}", temp.path().display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o400))
                .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
        }

        temp.persist(&path)
            .with_context(|| format!("finalizing key file {}", path.display()))?;
        Ok(path)
    }

    fn remove(&self, name: &str) -> Result<bool> {
        let path = self.key_path(name);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        Ok(true)
    }
}
