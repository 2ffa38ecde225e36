//! Mirror configuration and propagation.

use lp_core::{MirrorConfigError, MirrorMode, SurfaceKey};
use tracing::debug;

use crate::screen_state::ScreenStateStore;

pub struct MirrorRegistry {
    modes: [MirrorMode; 3],
}

impl MirrorRegistry {
    pub fn new() -> Self {
        Self {
            modes: [MirrorMode::Free; 3],
        }
    }

    pub fn mirror_of(&self, surface: SurfaceKey) -> MirrorMode {
        self.modes[surface.index()]
    }

    /// Surfaces directly configured to mirror `source`.
    pub fn mirrors_of(&self, source: SurfaceKey) -> Vec<SurfaceKey> {
        SurfaceKey::ALL
            .into_iter()
            .filter(|surface| self.mirror_of(*surface).source() == Some(source))
            .collect()
    }

    /// Follow mirror links from `surface` up to the surface that actually owns
    /// the content.
    pub fn root_source(&self, surface: SurfaceKey) -> SurfaceKey {
        let mut current = surface;
        // Chains are acyclic; the loop is bounded anyway.
        for _ in 0..SurfaceKey::ALL.len() {
            match self.mirror_of(current).source() {
                Some(source) => current = source,
                None => break,
            }
        }
        current
    }

    fn validate(&self, surface: SurfaceKey, mode: MirrorMode) -> Result<(), MirrorConfigError> {
        let Some(from) = mode.source() else {
            return Ok(());
        };
        if from == surface {
            return Err(MirrorConfigError::SelfReference(surface));
        }

        let mut current = from;
        for _ in 0..SurfaceKey::ALL.len() {
            match self.mirror_of(current).source() {
                Some(next) if next == surface => {
                    return Err(MirrorConfigError::Cycle { surface, from });
                }
                Some(next) => current = next,
                None => return Ok(()),
            }
        }
        Err(MirrorConfigError::Cycle { surface, from })
    }

    /// Store `mode` for `surface`.
    ///
    /// Switching to `Mirror` copies the source state right away, then pushes it
    /// on to whatever mirrors `surface`. Returns the surfaces whose state
    /// changed, in the order they were written.
    pub fn set_mirror(
        &mut self,
        store: &mut ScreenStateStore,
        surface: SurfaceKey,
        mode: MirrorMode,
        now_ms: i64,
    ) -> Result<Vec<SurfaceKey>, MirrorConfigError> {
        self.validate(surface, mode)?;
        self.modes[surface.index()] = mode;

        let Some(source) = mode.source() else {
            debug!(surface = %surface, "surface released from mirroring");
            return Ok(Vec::new());
        };

        store.copy_state(source, surface, now_ms);
        debug!(surface = %surface, source = %source, "surface now mirrors source");

        let mut changed = vec![surface];
        changed.extend(self.propagate_from(store, surface, now_ms));
        Ok(changed)
    }

    /// Copy `source` into every surface that mirrors it, transitively, in
    /// breadth-first order. Free surfaces are never touched.
    pub fn propagate_from(
        &self,
        store: &mut ScreenStateStore,
        source: SurfaceKey,
        now_ms: i64,
    ) -> Vec<SurfaceKey> {
        let mut changed = Vec::new();
        let mut queue = vec![source];
        let mut visited = [false; 3];
        visited[source.index()] = true;

        while !queue.is_empty() {
            let current = queue.remove(0);
            for mirror in self.mirrors_of(current) {
                if visited[mirror.index()] {
                    continue;
                }
                visited[mirror.index()] = true;
                store.copy_state(current, mirror, now_ms);
                changed.push(mirror);
                queue.push(mirror);
            }
        }

        changed
    }
}

impl Default for MirrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{ProjectionMode, TextPayload};

    fn mirror(from: SurfaceKey) -> MirrorMode {
        MirrorMode::Mirror { from }
    }

    #[test]
    fn self_mirror_is_rejected() {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();

        let err = registry
            .set_mirror(&mut store, SurfaceKey::B, mirror(SurfaceKey::B), 1)
            .unwrap_err();

        assert_eq!(err, MirrorConfigError::SelfReference(SurfaceKey::B));
        assert_eq!(registry.mirror_of(SurfaceKey::B), MirrorMode::Free);
    }

    #[test]
    fn two_hop_cycle_is_rejected() {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();
        registry
            .set_mirror(&mut store, SurfaceKey::B, mirror(SurfaceKey::C), 1)
            .unwrap();

        let err = registry
            .set_mirror(&mut store, SurfaceKey::C, mirror(SurfaceKey::B), 2)
            .unwrap_err();

        assert_eq!(
            err,
            MirrorConfigError::Cycle {
                surface: SurfaceKey::C,
                from: SurfaceKey::B,
            }
        );
        assert_eq!(registry.mirror_of(SurfaceKey::C), MirrorMode::Free);
    }

    #[test]
    fn setting_mirror_copies_source_immediately() {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();
        store.set_content_text(SurfaceKey::A, TextPayload::new(None, "Welcome"), 10);
        store.set_mode(SurfaceKey::A, ProjectionMode::White, 11);

        let changed = registry
            .set_mirror(&mut store, SurfaceKey::B, mirror(SurfaceKey::A), 12)
            .unwrap();

        assert_eq!(changed, vec![SurfaceKey::B]);
        assert!(store
            .get_state(SurfaceKey::B)
            .same_display(&store.get_state(SurfaceKey::A)));
    }

    #[test]
    fn propagation_is_transitive_and_skips_free_surfaces() {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();
        registry
            .set_mirror(&mut store, SurfaceKey::B, mirror(SurfaceKey::A), 1)
            .unwrap();
        registry
            .set_mirror(&mut store, SurfaceKey::C, mirror(SurfaceKey::B), 2)
            .unwrap();

        store.set_content_text(SurfaceKey::A, TextPayload::new(None, "Chorus"), 3);
        let changed = registry.propagate_from(&mut store, SurfaceKey::A, 3);

        assert_eq!(changed, vec![SurfaceKey::B, SurfaceKey::C]);
        let a = store.get_state(SurfaceKey::A);
        for surface in [SurfaceKey::B, SurfaceKey::C] {
            let state = store.get_state(surface);
            assert!(state.same_display(&a));
            assert!(state.updated_at >= a.updated_at);
        }

        registry
            .set_mirror(&mut store, SurfaceKey::C, MirrorMode::Free, 4)
            .unwrap();
        store.set_content_text(SurfaceKey::A, TextPayload::new(None, "Bridge"), 5);
        assert_eq!(
            registry.propagate_from(&mut store, SurfaceKey::A, 5),
            vec![SurfaceKey::B]
        );
        assert!(!store
            .get_state(SurfaceKey::C)
            .same_display(&store.get_state(SurfaceKey::A)));
    }

    #[test]
    fn root_source_follows_chain() {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();
        registry
            .set_mirror(&mut store, SurfaceKey::B, mirror(SurfaceKey::A), 1)
            .unwrap();
        registry
            .set_mirror(&mut store, SurfaceKey::C, mirror(SurfaceKey::B), 2)
            .unwrap();

        assert_eq!(registry.root_source(SurfaceKey::C), SurfaceKey::A);
        assert_eq!(registry.root_source(SurfaceKey::A), SurfaceKey::A);
    }
}
