//! Server state management
//!
//! One client session shared by every request, plus the pixel layout.

use skirmish_core::{ClientSession, Layout, PlayerResponse};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Session plus a counter the renderer polls to know when to redraw
#[derive(Default)]
pub struct ClientHandle {
    pub session: ClientSession<Vec<PlayerResponse>>,
    pub version: u64,
}

impl ClientHandle {
    /// Bump the version if the last operation changed anything
    pub fn sync_version(&mut self) -> u64 {
        if self.session.take_redraw() {
            self.version += 1;
        }
        self.version
    }
}

/// Server-wide shared state
pub struct ServerState {
    client: RwLock<ClientHandle>,
    pub layout: Layout,
}

impl ServerState {
    pub fn new(hex_size: f64) -> Self {
        Self {
            client: RwLock::new(ClientHandle::default()),
            layout: Layout::new(hex_size),
        }
    }

    // Session operations apply one effect or none, so a poisoned lock still
    // guards a consistent session.
    pub fn client(&self) -> RwLockReadGuard<'_, ClientHandle> {
        self.client.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn client_mut(&self) -> RwLockWriteGuard<'_, ClientHandle> {
        self.client.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(Layout::default().hex_size)
    }
}
