//! Persistence worker: saves profiles off the simulation thread.
//!
//! The game loop only ever sends; a slow or failing store never stalls a
//! tick. Failures are logged and dropped.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use wavedodge_economy::{PlayerProfile, ProfileStore};

use crate::state::PersistenceRequest;

/// Handle to the persistence worker thread.
pub struct PersistenceWorker {
    tx: mpsc::Sender<PersistenceRequest>,
    handle: Option<JoinHandle<usize>>,
}

impl PersistenceWorker {
    pub fn spawn(store: Arc<dyn ProfileStore>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<PersistenceRequest>();
        let handle = std::thread::Builder::new()
            .name("wavedodge-persistence".into())
            .spawn(move || run_worker(store.as_ref(), rx))?;
        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// Queue a save. Never blocks on the store.
    pub fn save(&self, key: &str, profile: &PlayerProfile) {
        let request = PersistenceRequest::Save {
            key: key.to_string(),
            profile: Box::new(profile.clone()),
        };
        if self.tx.send(request).is_err() {
            warn!(key, "persistence worker gone, save dropped");
        }
    }

    /// Drain outstanding saves and stop the worker. Returns how many saves
    /// succeeded.
    pub fn shutdown(mut self) -> usize {
        self.stop()
    }

    fn stop(&mut self) -> usize {
        let _ = self.tx.send(PersistenceRequest::Shutdown);
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(saved)) => saved,
            Some(Err(_)) => {
                warn!("persistence worker panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(store: &dyn ProfileStore, rx: mpsc::Receiver<PersistenceRequest>) -> usize {
    let mut saved = 0;
    for request in rx {
        match request {
            PersistenceRequest::Save { key, profile } => match store.save(&key, &profile) {
                Ok(()) => {
                    saved += 1;
                    debug!(key = key.as_str(), "profile persisted");
                }
                Err(e) => warn!(key = key.as_str(), error = %e, "profile save failed"),
            },
            PersistenceRequest::Shutdown => break,
        }
    }
    saved
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavedodge_economy::{JsonFileStore, MemoryStore};

    #[test]
    fn test_saves_reach_store() {
        let store = Arc::new(MemoryStore::new());
        let worker = PersistenceWorker::spawn(store.clone()).unwrap();

        let mut profile = PlayerProfile::default();
        profile.coins = 13;
        worker.save("alice", &profile);
        profile.coins = 14;
        worker.save("alice", &profile);
        assert_eq!(worker.shutdown(), 2);

        assert_eq!(store.load("alice").unwrap().unwrap().coins, 14);
    }

    #[test]
    fn test_failed_save_is_absorbed() {
        let store = Arc::new(MemoryStore::new());
        let worker = PersistenceWorker::spawn(store.clone()).unwrap();
        worker.save("not a valid key", &PlayerProfile::default());
        worker.save("ok", &PlayerProfile::default());
        assert_eq!(worker.shutdown(), 1);
        assert_eq!(store.keys().unwrap(), vec!["ok"]);
    }

    #[test]
    fn test_file_store_worker() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path()));
        let worker = PersistenceWorker::spawn(store.clone()).unwrap();
        worker.save("slot1", &PlayerProfile::default());
        drop(worker);
        assert!(dir.path().join("slot1.json").exists());
    }
}
