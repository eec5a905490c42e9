//! Rejection reasons
//!
//! Every expected failure of placement or removal is one of these values,
//! returned through `Result` and shown to the player via its `Display`
//! text. None of them are fatal.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectReason {
    #[error("Can't build underwater")]
    Underwater,
    #[error("Blocked by another piece")]
    Overlap,
    #[error("Ground is too uneven")]
    UnevenGround,
    #[error("Needs something to rest on")]
    NoSupport,
    #[error("Not enough resources")]
    InsufficientResources,
    #[error("That piece no longer exists")]
    NotFound,
    #[error("Can't build outside the map")]
    UndefinedTerrain,
    #[error("Select a piece to build first")]
    NoActiveSession,
    #[error("Aim at a spot to build")]
    NoCandidate,
}

impl RejectReason {
    /// Short on-screen text for this rejection.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
