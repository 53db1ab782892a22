//! Transition engine for slotted broadcast networks.
//!
//! The engine computes the set of possible network states one slot after
//! an intention assignment: the sender-set fixed point resolves carrier
//! sensing across overlapping tic ranges, the per-receiver enumerator
//! derives every action a component may observe, and a semantics filter
//! prunes the enumeration before the cross-product of successor states
//! is built.
//!
//! Everything is deterministic and single-threaded; all observable
//! iteration follows component registration order.

pub mod error;
pub mod mapping;
pub mod sender_set;
pub mod setup;
pub mod trait_value;
pub mod transition;

pub use error::ContractViolation;
pub use mapping::{IntentionAssignment, NetworkState, TraitMapping};
pub use sender_set::{compute_sender_set, SenderSet, Transmission};
pub use setup::NetworkSetup;
pub use trait_value::{Action, Intention, TraitValue};
pub use transition::{
    filter_naive, filter_nothing, successors, successors_with_filter, FilterFn, Semantics,
};
