//! # Brain Stores
//!
//! Key-value stores behind the `Brain` trait. The only thing the bot keeps in them is the
//! attention-window expiry per user.
//!
//! - [`MemoryBrain`]: process-local, lost on restart
//! - [`FileBrain`]: a JSON object on disk, rewritten after every mutation
//! - `RedisBrain`: shared store, behind the `redis` feature

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "redis")]
pub use self::redis::RedisBrain;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::config::{BrainBackend, BrainConfig};
use crate::domain::traits::Brain;
use crate::strings::logs;

/// Builds the store selected in the configuration.
pub async fn connect(config: &BrainConfig) -> Result<Arc<dyn Brain>> {
    tracing::info!("{}", logs::brain_backend(&format!("{:?}", config.backend)));
    match config.backend {
        BrainBackend::Memory => Ok(Arc::new(MemoryBrain::default())),
        BrainBackend::File => Ok(Arc::new(FileBrain::open(&config.path).await?)),
        #[cfg(feature = "redis")]
        BrainBackend::Redis => {
            let url = config
                .url
                .as_deref()
                .context("brain.url is required for the redis backend")?;
            Ok(Arc::new(RedisBrain::connect(url).await?))
        }
        #[cfg(not(feature = "redis"))]
        BrainBackend::Redis => {
            anyhow::bail!("The redis brain backend requires building with --features redis")
        }
    }
}

#[derive(Default)]
pub struct MemoryBrain {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl Brain for MemoryBrain {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Brain persisted as a pretty-printed JSON object.
pub struct FileBrain {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileBrain {
    /// Loads `path` if it exists. A missing file starts empty; an unreadable one is an error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse brain file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[async_trait]
impl Brain for FileBrain {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}
