use crate::session::SessionStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use wayfare_core::profile::Profile;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the signed-in profile survives a restart.
#[async_trait]
pub trait ProfileSink: Send + Sync {
    /// `None` means signed out; the stored copy must be dropped.
    async fn save(&self, profile: Option<&Profile>) -> Result<(), StoreError>;

    async fn load(&self) -> Result<Option<Profile>, StoreError>;
}

/// Keeps the profile as a JSON document on disk.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSink for JsonFileSink {
    async fn save(&self, profile: Option<&Profile>) -> Result<(), StoreError> {
        match profile {
            Some(profile) => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                let body = serde_json::to_vec_pretty(profile)?;
                tokio::fs::write(&self.path, body).await?;
                debug!("Profile {} written to {}", profile.id, self.path.display());
            }
            None => match tokio::fs::remove_file(&self.path).await {
                Ok(()) => debug!("Profile file {} removed", self.path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }

    async fn load(&self) -> Result<Option<Profile>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                // A corrupt file is treated as signed out rather than fatal
                warn!("Ignoring unreadable profile file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }
}

/// Mirror every profile change in `store` to `sink` until the store is dropped.
pub fn spawn_persistence(store: Arc<SessionStore>, sink: Arc<dyn ProfileSink>) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    let mut last = rx.borrow_and_update().profile.clone();
    drop(store);

    tokio::spawn(async move {
        info!("Profile persistence started");
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().profile.clone();
            if current == last {
                continue;
            }
            if let Err(e) = sink.save(current.as_ref()).await {
                error!("Failed to persist profile: {}", e);
            }
            last = current;
        }
        info!("Profile persistence stopped");
    })
}
