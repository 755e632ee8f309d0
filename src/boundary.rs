//! Boundary policies deciding what a proposed move does at the domain edge.

use levy_walk_common::{Domain, Vec2};

/// Decides the committed position for a tick given the current position and a
/// candidate. Implementations must return a position inside `domain` when
/// `current` is inside it.
pub trait BoundaryPolicy: Send + Sync {
    fn resolve(&self, domain: &Domain, current: Vec2, candidate: Vec2) -> Vec2;
}

/// Accept-or-stay: a candidate inside the closed domain is committed, anything
/// else is discarded and the walker keeps its current position.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AcceptOrStay;

impl BoundaryPolicy for AcceptOrStay {
    #[inline]
    fn resolve(&self, domain: &Domain, current: Vec2, candidate: Vec2) -> Vec2 {
        if domain.contains(candidate) {
            candidate
        } else {
            current
        }
    }
}
