//! Display window bookkeeping for the IPC host.
//!
//! Display windows are separate processes that connect over IPC and subscribe
//! as `Display(surface)`. A surface counts as open while at least one display
//! is connected for it, or while an open was requested and not yet withdrawn.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use lp_core::ports::SurfaceWindowPort;
use lp_core::SurfaceKey;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
struct SurfaceSlot {
    requested: bool,
    connected: usize,
}

impl SurfaceSlot {
    fn is_open(&self) -> bool {
        self.requested || self.connected > 0
    }
}

#[derive(Default)]
pub struct DisplayWindowRegistry {
    slots: Mutex<[SurfaceSlot; 3]>,
}

impl DisplayWindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `change` to the slot of `surface`; returns the new open state if it flipped.
    fn update(&self, surface: SurfaceKey, change: impl FnOnce(&mut SurfaceSlot)) -> Option<bool> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let slot = &mut slots[surface.index()];
        let before = slot.is_open();
        change(slot);
        let after = slot.is_open();
        (before != after).then_some(after)
    }

    pub fn display_connected(&self, surface: SurfaceKey) -> Option<bool> {
        self.update(surface, |slot| slot.connected += 1)
    }

    pub fn display_disconnected(&self, surface: SurfaceKey) -> Option<bool> {
        self.update(surface, |slot| slot.connected = slot.connected.saturating_sub(1))
    }

    pub fn connected_displays(&self, surface: SurfaceKey) -> usize {
        self.slots
            .lock()
            .map(|slots| slots[surface.index()].connected)
            .unwrap_or(0)
    }
}

#[async_trait]
impl SurfaceWindowPort for DisplayWindowRegistry {
    async fn open_surface(&self, surface: SurfaceKey) -> Result<()> {
        if self.update(surface, |slot| slot.requested = true).is_some() {
            info!(surface = %surface, "display window requested");
        }
        Ok(())
    }

    async fn close_surface(&self, surface: SurfaceKey) -> Result<()> {
        if self.update(surface, |slot| slot.requested = false).is_some() {
            info!(surface = %surface, "display window released");
        }
        Ok(())
    }

    fn is_surface_open(&self, surface: SurfaceKey) -> bool {
        self.slots
            .lock()
            .map(|slots| slots[surface.index()].is_open())
            .unwrap_or(false)
    }
}
