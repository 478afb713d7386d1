use crate::repository::DatasetHandle;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// What consumers can observe about the startup load. There is no partially
/// loaded state.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(DatasetHandle),
    Unavailable(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn handle(&self) -> Option<&DatasetHandle> {
        match self {
            LoadState::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Runs the one-shot dataset load on a background task and publishes the
/// outcome. No retry: a failed load stays `Unavailable`.
pub struct DatasetLoader {
    state: Arc<RwLock<LoadState>>,
    task: JoinHandle<()>,
}

impl DatasetLoader {
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: PathBuf) -> Self {
        let state = Arc::new(RwLock::new(LoadState::Loading));
        let published = Arc::clone(&state);

        let task = tokio::spawn(async move {
            let outcome = match DatasetHandle::initialize(&path).await {
                Ok(handle) => LoadState::Ready(handle),
                Err(e) => LoadState::Unavailable(e.to_string()),
            };
            let mut current = published.write().await;
            *current = outcome;
        });

        Self { state, task }
    }

    pub async fn current(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Wait for the load to finish and return its final state.
    pub async fn wait(self) -> LoadState {
        if let Err(e) = self.task.await {
            tracing::error!("Crop data load task failed: {}", e);
            return LoadState::Unavailable(format!("load task failed: {}", e));
        }
        self.state.read().await.clone()
    }
}
