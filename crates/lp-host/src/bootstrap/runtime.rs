//! Host runtime handle shared by the command dispatcher and IPC connections.

use std::sync::Arc;

use lp_app::{App, LiveNavigation, ProjectionRuntime};

use crate::adapters::DisplayWindowRegistry;

pub struct HostRuntime {
    app: App,
    windows: Arc<DisplayWindowRegistry>,
}

impl HostRuntime {
    pub fn new(app: App, windows: Arc<DisplayWindowRegistry>) -> Self {
        Self { app, windows }
    }

    pub fn projection(&self) -> &ProjectionRuntime {
        &self.app.runtime
    }

    pub fn navigation(&self) -> &LiveNavigation {
        &self.app.navigation
    }

    pub fn windows(&self) -> &DisplayWindowRegistry {
        &self.windows
    }
}
