use crate::{AuthStatus, SessionState};

use tokio::sync::watch;

/// Read-only view of the session slot.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    receiver: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub(crate) fn new(receiver: watch::Receiver<SessionState>) -> Self {
        Self { receiver }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.receiver.borrow().clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.receiver.borrow().status()
    }

    pub fn is_loading(&self) -> bool {
        self.receiver.borrow().is_loading()
    }

    /// Wait for the next state change.
    ///
    /// Returns false once the bootstrapper has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}
