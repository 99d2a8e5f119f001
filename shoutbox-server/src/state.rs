//! Application state shared across handlers

use std::sync::Arc;

use shoutbox_store::MessageStore;

/// Shared application state
///
/// The store is `None` when no datastore was configured at startup or the
/// configured one could not be opened; data routes answer 500 in that
/// case while the health route keeps responding.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Option<MessageStore>,
}

impl AppState {
    pub fn new(store: Option<MessageStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> Option<&MessageStore> {
        self.inner.store.as_ref()
    }
}
