//! In-memory session store. One resume per session; oldest sessions are
//! evicted once capacity is reached. Nothing is written to disk.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::UploadedResume;

#[derive(Default)]
struct Inner {
    resumes: HashMap<Uuid, Arc<UploadedResume>>,
    /// Insertion order of sessions, oldest first.
    order: VecDeque<Uuid>,
}

#[derive(Clone)]
pub struct ResumeStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl ResumeStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    /// Stores the resume for `session_id`, discarding any earlier upload.
    /// Returns true when a previous resume was replaced.
    pub async fn put(&self, session_id: Uuid, resume: UploadedResume) -> bool {
        let mut inner = self.inner.write().await;
        let replaced = inner.resumes.insert(session_id, Arc::new(resume)).is_some();

        if replaced {
            inner.order.retain(|id| *id != session_id);
        }
        inner.order.push_back(session_id);

        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.resumes.remove(&evicted);
                debug!("Evicted resume session {evicted}");
            }
        }
        replaced
    }

    pub async fn get(&self, session_id: Uuid) -> Option<Arc<UploadedResume>> {
        self.inner.read().await.resumes.get(&session_id).cloned()
    }

    pub async fn remove(&self, session_id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        inner.order.retain(|id| *id != session_id);
        inner.resumes.remove(&session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.resumes.len()
    }
}
