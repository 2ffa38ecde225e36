//! State-change fan-out to windows.
//!
//! 状态变更推送：控制窗口与各画面的显示窗口。
//!
//! Observers register with a [`WindowRole`] and receive [`ProjectionEvent`]s
//! over their own unbounded channel. Delivery is fire-and-forget: an observer
//! whose receiver is gone is pruned on the next send, never reported as an
//! error. Per-observer ordering equals send order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use lp_core::{LiveState, ProjectionState, SurfaceKey};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Which window an observer stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "surface", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowRole {
    Control,
    Display(SurfaceKey),
}

/// Push notification sent to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProjectionEvent {
    #[serde(rename_all = "camelCase")]
    SurfaceStateChanged {
        surface: SurfaceKey,
        state: ProjectionState,
    },
    #[serde(rename_all = "camelCase")]
    SurfaceWindowChanged { surface: SurfaceKey, is_open: bool },
    LiveStateChanged { state: LiveState },
}

struct Observer {
    id: u64,
    role: WindowRole,
    sender: mpsc::UnboundedSender<ProjectionEvent>,
}

type ObserverList = Mutex<Vec<Observer>>;

fn lock_observers(observers: &ObserverList) -> MutexGuard<'_, Vec<Observer>> {
    // Senders are pushed and pruned whole, a poisoned list is still usable.
    observers
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct BroadcastHub {
    observers: Arc<ObserverList>,
    next_id: AtomicU64,
}

/// Live registration handle. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<ProjectionEvent>,
    observers: Weak<ObserverList>,
}

impl Subscription {
    pub async fn recv(&mut self) -> Option<ProjectionEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ProjectionEvent> {
        self.receiver.try_recv().ok()
    }

    /// Everything delivered so far, without waiting.
    pub fn drain(&mut self) -> Vec<ProjectionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            lock_observers(&observers).retain(|observer| observer.id != self.id);
        }
    }
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, role: WindowRole) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        lock_observers(&self.observers).push(Observer { id, role, sender });
        debug!(observer = id, role = ?role, "observer subscribed");
        Subscription {
            id,
            receiver,
            observers: Arc::downgrade(&self.observers),
        }
    }

    pub fn observer_count(&self) -> usize {
        lock_observers(&self.observers).len()
    }

    /// Control windows and the display window(s) of `surface`.
    pub fn notify_surface_state(&self, surface: SurfaceKey, state: &ProjectionState) {
        let event = ProjectionEvent::SurfaceStateChanged {
            surface,
            state: state.clone(),
        };
        self.publish(&event, |role| match role {
            WindowRole::Control => true,
            WindowRole::Display(display) => display == surface,
        });
    }

    /// Live state is global: every window gets it.
    pub fn notify_live_state(&self, state: &LiveState) {
        let event = ProjectionEvent::LiveStateChanged {
            state: state.clone(),
        };
        self.publish(&event, |_| true);
    }

    pub fn notify_window_changed(&self, surface: SurfaceKey, is_open: bool) {
        let event = ProjectionEvent::SurfaceWindowChanged { surface, is_open };
        self.publish(&event, |role| role == WindowRole::Control);
    }

    fn publish(&self, event: &ProjectionEvent, wants: impl Fn(WindowRole) -> bool) {
        lock_observers(&self.observers).retain(|observer| {
            if !wants(observer.role) {
                return true;
            }
            match observer.sender.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    trace!(observer = observer.id, "pruning closed observer");
                    false
                }
            }
        });
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
