use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A user-facing message ("toast").
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub variant: Variant,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Bounded queue of pending notifications. When full, the oldest entry is
/// dropped.
#[derive(Clone)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notification>>>,
    max_queued: usize,
}

impl Notifier {
    pub fn new(max_queued: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            max_queued: max_queued.max(1),
        }
    }

    pub fn push(&self, n: Notification) {
        warn!(title = %n.title, description = %n.description, "User notification");
        let mut q = self.queue.lock();
        if q.len() >= self.max_queued {
            q.pop_front();
        }
        q.push_back(n);
    }

    /// Remove and return everything queued, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
