//! Resolution of the successor set to a single network state.

use slotcast_engine::{ContractViolation, NetworkState};

/// Picks one successor out of the transition's result set.
///
/// The seam is forward-compatible with richer policies (first, seeded
/// random, exhaustive exploration); the current contract only ships
/// [`RequireSingle`].
pub trait SuccessorChoice {
    /// The index of the chosen successor.
    ///
    /// # Errors
    ///
    /// A policy may reject result sets it cannot resolve.
    fn choose(&mut self, outcomes: &[NetworkState]) -> Result<usize, ContractViolation>;
}

/// The current contract: the semantics must have collapsed the
/// successor set to exactly one state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireSingle;

impl SuccessorChoice for RequireSingle {
    fn choose(&mut self, outcomes: &[NetworkState]) -> Result<usize, ContractViolation> {
        if outcomes.len() == 1 {
            Ok(0)
        } else {
            Err(ContractViolation::AmbiguousOutcome(outcomes.len()))
        }
    }
}
