//! Effective-target resolution for projection mutations.
//!
//! One routine serves both call paths:
//! - direct per-surface setters use [`RoutePolicy::Refuse`]: a mirrored target
//!   is refused and the caller retries against the source;
//! - plan-item and live projection use [`RoutePolicy::Redirect`]: a mirrored
//!   target is transparently retargeted to the surface feeding it.
//!
//! Locks are checked first and veto everything.

use lp_core::{LockedScreens, RefusalReason, SurfaceKey};

use crate::mirror::MirrorRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    Redirect,
    Refuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Apply(SurfaceKey),
    Refused(RefusalReason),
}

pub fn resolve(
    target: SurfaceKey,
    locks: &LockedScreens,
    mirrors: &MirrorRegistry,
    policy: RoutePolicy,
) -> RouteDecision {
    if locks.is_locked(target) {
        return RouteDecision::Refused(RefusalReason::Locked);
    }

    if !mirrors.mirror_of(target).is_mirror() {
        return RouteDecision::Apply(target);
    }

    match policy {
        RoutePolicy::Refuse => RouteDecision::Refused(RefusalReason::Mirror),
        RoutePolicy::Redirect => {
            let source = mirrors.root_source(target);
            if locks.is_locked(source) {
                RouteDecision::Refused(RefusalReason::Locked)
            } else {
                RouteDecision::Apply(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_state::ScreenStateStore;
    use lp_core::MirrorMode;

    fn registry_with_b_mirroring_a() -> MirrorRegistry {
        let mut store = ScreenStateStore::default();
        let mut registry = MirrorRegistry::new();
        registry
            .set_mirror(
                &mut store,
                SurfaceKey::B,
                MirrorMode::Mirror { from: SurfaceKey::A },
                1,
            )
            .unwrap();
        registry
    }

    #[test]
    fn lock_beats_everything() {
        let registry = registry_with_b_mirroring_a();
        let locks = LockedScreens::default().with(SurfaceKey::B, true);

        for policy in [RoutePolicy::Redirect, RoutePolicy::Refuse] {
            assert_eq!(
                resolve(SurfaceKey::B, &locks, &registry, policy),
                RouteDecision::Refused(RefusalReason::Locked)
            );
        }
    }

    #[test]
    fn mirrored_target_is_redirected_or_refused_by_policy() {
        let registry = registry_with_b_mirroring_a();
        let locks = LockedScreens::default();

        assert_eq!(
            resolve(SurfaceKey::B, &locks, &registry, RoutePolicy::Redirect),
            RouteDecision::Apply(SurfaceKey::A)
        );
        assert_eq!(
            resolve(SurfaceKey::B, &locks, &registry, RoutePolicy::Refuse),
            RouteDecision::Refused(RefusalReason::Mirror)
        );
    }

    #[test]
    fn redirect_honours_lock_on_source() {
        let registry = registry_with_b_mirroring_a();
        let locks = LockedScreens::default().with(SurfaceKey::A, true);

        assert_eq!(
            resolve(SurfaceKey::B, &locks, &registry, RoutePolicy::Redirect),
            RouteDecision::Refused(RefusalReason::Locked)
        );
    }

    #[test]
    fn free_target_applies_directly() {
        let registry = registry_with_b_mirroring_a();
        let locks = LockedScreens::default();

        assert_eq!(
            resolve(SurfaceKey::C, &locks, &registry, RoutePolicy::Refuse),
            RouteDecision::Apply(SurfaceKey::C)
        );
    }
}
