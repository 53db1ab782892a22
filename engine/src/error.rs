//! Programmer contract violations.
//!
//! None of these are recoverable: they signal misuse of the engine or a
//! protocol callback that broke its obligations. The simulator reports
//! them with a section stack and terminates.

use slotcast_types::{ComponentId, MessageId, Tic};
use thiserror::Error;

/// A broken engine contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A network setup was created with zero tics per slot.
    #[error("at least one tic per slot is required")]
    ZeroTicsPerSlot,

    /// Two components were registered under the same string id.
    #[error("duplicate component id `{0}` registered")]
    DuplicateComponent(String),

    /// A handle that the associated setup never issued.
    #[error("{0} is not registered with this network setup")]
    UnknownComponent(ComponentId),

    /// A message handle that the associated setup never issued.
    #[error("{0} is not registered with this network setup")]
    UnknownMessage(MessageId),

    /// A trait mapping entry would be overwritten.
    #[error("trait for {0} is already assigned")]
    TraitOverwrite(ComponentId),

    /// A partial trait mapping was queried or rendered.
    #[error("trait mapping is still partial")]
    PartialMapping,

    /// A partial intention assignment reached the transition.
    #[error("intention assignment is partial and thus not usable")]
    PartialIntent,

    /// A trait payload names a tic outside the slot.
    #[error("tic {tic} is outside the slot range 0..{tics_per_slot}")]
    TicOutOfRange {
        /// The offending tic.
        tic: Tic,
        /// The slot granularity of the setup.
        tics_per_slot: usize,
    },

    /// The semantics filter removed every possible action.
    #[error("filter removed every possible action for {0}")]
    FilterEmptied(ComponentId),

    /// A protocol callback invoked a second intention setter.
    #[error("{0} already chose an intention for this slot")]
    AlreadyActed(ComponentId),

    /// A protocol callback returned without choosing an intention.
    #[error("{0} did not choose an intention for this slot")]
    NoIntention(ComponentId),

    /// The successor set could not be resolved to a single outcome.
    #[error("cannot resolve {0} possible successor states to a single outcome")]
    AmbiguousOutcome(usize),

    /// The simulator was run without a topology.
    #[error("network topology must be set before running")]
    TopologyNotSet,

    /// A simulation was asked to run for zero slots.
    #[error("simulation duration must be greater than zero")]
    ZeroSlots,
}
