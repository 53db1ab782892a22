//! Vocabulary types for the slotcast broadcast-network simulator.
//!
//! Components, messages, and topologies are the static universe a
//! simulation runs against. Everything here is engine-agnostic: identity
//! is handle-based (registration-order indexes) and topologies are pure
//! reachability predicates.

pub mod identifiers;
pub mod message;
pub mod topology;

pub use identifiers::{ComponentId, MessageId, SlotNumber, Tic};
pub use message::Message;
pub use topology::{ExplicitTopology, IsolatedTopology, Topology, TrivialTopology};
