//! Filesystem collaborator.
//!
//! The combiner only talks to a [`Vault`]: list a folder, read a document,
//! create the output. [`DiskVault`] backs it with a directory on disk.

use crate::app::models::{FileNode, Folder};
use crate::app::scanner;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait Vault: Send + Sync {
    /// Snapshot of the folder at `path` and everything below it.
    async fn folder(&self, path: &str) -> io::Result<Folder>;

    /// Snapshot of the whole vault.
    async fn root(&self) -> io::Result<Folder> {
        self.folder("").await
    }

    async fn read(&self, file: &FileNode) -> io::Result<String>;

    /// Creates a new document. Fails if `path` already exists.
    async fn create(&self, path: &str, content: &str) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct DiskVault {
    root: PathBuf,
}

impl DiskVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault-relative path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            path.split('/').fold(self.root.clone(), |acc, part| acc.join(part))
        }
    }

    fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vault".to_string())
    }
}

#[async_trait]
impl Vault for DiskVault {
    async fn folder(&self, path: &str) -> io::Result<Folder> {
        let base = self.resolve(path);
        let name = match path.rsplit('/').next() {
            Some(last) if !last.is_empty() => last.to_string(),
            _ => self.root_name(),
        };
        let folder_path = path.to_string();

        tokio::task::spawn_blocking(move || scanner::snapshot(&base, &name, &folder_path))
            .await
            .map_err(io::Error::other)?
    }

    async fn read(&self, file: &FileNode) -> io::Result<String> {
        fs::read_to_string(self.resolve(&file.path)).await
    }

    async fn create(&self, path: &str, content: &str) -> io::Result<()> {
        let target = self.resolve(path);
        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await?;

        let written = async {
            handle.write_all(content.as_bytes()).await?;
            handle.flush().await
        }
        .await;

        if let Err(err) = written {
            drop(handle);
            if let Err(cleanup) = fs::remove_file(&target).await {
                log::warn!(
                    "Could not remove partial output {}: {}",
                    target.display(),
                    cleanup
                );
            }
            return Err(err);
        }
        Ok(())
    }
}
