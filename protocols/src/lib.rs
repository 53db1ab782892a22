//! Example protocols for the slotcast simulator.
//!
//! The alarm system is the flagship example: sensors raise alarms that
//! repeaters relay hop by hop to a central unit, with priority-based
//! backoff after collisions. The smaller modules are building blocks
//! shared by the demo binaries.

pub mod alarm;
pub mod echo;
pub mod named;

pub use echo::{EchoClient, EchoServer};
pub use named::NamedMessage;
