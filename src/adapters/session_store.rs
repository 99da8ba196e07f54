use crate::core::{Result, Session, SessionStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps the session as a JSON file so it survives between CLI runs.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::anonymous()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for callers that do not persist sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: std::sync::Mutex<Session>,
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Session> {
        Ok(self.session.lock().map(|s| s.clone()).unwrap_or_default())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Ok(mut current) = self.session.lock() {
            *current = session.clone();
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.save(&Session::anonymous()).await
    }
}
