//! Slot driver and front-end for the slotcast broadcast-network
//! simulator.
//!
//! The [`Simulator`] owns the network setup, the components, the
//! topology, and the output module, and advances the simulation slot by
//! slot: protocol callbacks fill an intention assignment through
//! per-component [`SlotView`]s, the engine computes the successor set,
//! and the chosen successor becomes the next previous state.

pub mod choice;
pub mod component;
pub mod driver;
pub mod output;
pub mod runner;
pub mod sections;
pub mod state_machine;
pub mod view;

pub use choice::{RequireSingle, SuccessorChoice};
pub use component::Component;
pub use driver::{Simulator, SimulatorError};
pub use output::{OutputModule, TextOutput, XmlOutput};
pub use runner::{run, EntryFn, RunContext};
pub use sections::SectionStack;
pub use state_machine::{StateMachine, StateProtocol};
pub use view::SlotView;
