//! Pure like-state reconciliation.
//!
//! The state machine per document: `Unknown → (fetch) → Known{count, liked}`;
//! a toggle applies an optimistic `Known'` immediately, then either the
//! server-confirmed snapshot (success) or the pre-toggle state (failure)
//! replaces it. These functions compute each step without any I/O so the
//! effect layer in [`crate::client`] stays thin.

use cardstock_core::LikeSnapshot;

/// The snapshot to show while a toggle request is in flight.
///
/// Adjusts the count by one in the toggle direction; a toggle to the
/// state already held leaves the count alone. The count never goes
/// below zero.
pub fn optimistic(prev: &LikeSnapshot, next_liked: bool) -> LikeSnapshot {
    let likes = if next_liked == prev.liked_by_me {
        prev.likes
    } else if next_liked {
        prev.likes.saturating_add(1)
    } else {
        prev.likes.saturating_sub(1)
    };
    LikeSnapshot::new(prev.id.clone(), likes, next_liked)
}

/// The snapshot after a confirmed remote toggle.
///
/// The server owns the count. The liked flag is the caller-supplied
/// target state: toggle responses do not attribute actor identity, so
/// any `likedByMe` a response might carry is ignored.
pub fn confirmed(id: &str, server_likes: u64, next_liked: bool) -> LikeSnapshot {
    LikeSnapshot::new(id, server_likes, next_liked)
}

/// Fold a toggle outcome into the snapshot the caller should show.
///
/// A failed write (`None`) reverts to the pre-toggle state.
pub fn settle(prev: &LikeSnapshot, outcome: Option<u64>, next_liked: bool) -> LikeSnapshot {
    match outcome {
        Some(server_likes) => confirmed(&prev.id, server_likes, next_liked),
        None => prev.clone(),
    }
}

/// Local-only snapshot used when the remote read is unavailable.
pub fn fallback(id: &str, liked: bool) -> LikeSnapshot {
    LikeSnapshot::new(id, 0, liked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimistic_like_increments() {
        let prev = LikeSnapshot::new("a", 4, false);
        let next = optimistic(&prev, true);
        assert_eq!(next.likes, 5);
        assert!(next.liked_by_me);
    }

    #[test]
    fn test_optimistic_unlike_decrements() {
        let prev = LikeSnapshot::new("a", 4, true);
        let next = optimistic(&prev, false);
        assert_eq!(next.likes, 3);
        assert!(!next.liked_by_me);
    }

    #[test]
    fn test_optimistic_saturates_at_zero() {
        let prev = LikeSnapshot::new("a", 0, true);
        let next = optimistic(&prev, false);
        assert_eq!(next.likes, 0);
    }

    #[test]
    fn test_optimistic_noop_toggle_keeps_count() {
        let prev = LikeSnapshot::new("a", 4, true);
        let next = optimistic(&prev, true);
        assert_eq!(next.likes, 4);
    }

    #[test]
    fn test_settle_success_takes_server_count_and_caller_flag() {
        let prev = LikeSnapshot::new("a", 4, false);
        let next = settle(&prev, Some(9), true);
        assert_eq!(next, LikeSnapshot::new("a", 9, true));
    }

    #[test]
    fn test_settle_failure_reverts_to_previous() {
        let prev = LikeSnapshot::new("a", 4, false);
        let next = settle(&prev, None, true);
        assert_eq!(next, prev);
    }

    #[test]
    fn test_fallback_is_zero_count_local_flag() {
        assert_eq!(fallback("x", true), LikeSnapshot::new("x", 0, true));
        assert_eq!(fallback("x", false), LikeSnapshot::new("x", 0, false));
    }
}
