//! Output modules: how a simulation run is reported.
//!
//! The driver notifies the active module in a fixed order with no
//! reentrance: `simulation_begin`, then per slot `slot_begin`,
//! `intent_chosen`, `transition_computed`, `result_chosen`, `slot_end`,
//! and finally `simulation_end`.

mod text;
mod xml;

pub use text::TextOutput;
pub use xml::XmlOutput;

use slotcast_engine::{ContractViolation, IntentionAssignment, NetworkSetup, NetworkState};
use slotcast_types::{SlotNumber, Topology};

use crate::component::Component;

/// Receiver of the simulation's primary output.
///
/// All renderings happen on total mappings; the driver establishes
/// totality before notifying the module, so the violations surfaced
/// here are unreachable in a well-formed run.
pub trait OutputModule {
    /// The simulation is about to run `num_slots` slots.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn simulation_begin(
        &mut self,
        num_slots: usize,
        setup: &NetworkSetup,
        components: &[Box<dyn Component>],
        topology: &dyn Topology,
    ) -> Result<(), ContractViolation>;

    /// A slot begins.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn slot_begin(&mut self, slot: SlotNumber) -> Result<(), ContractViolation>;

    /// The protocol callbacks chose this intention assignment.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn intent_chosen(
        &mut self,
        setup: &NetworkSetup,
        intent: &IntentionAssignment,
    ) -> Result<(), ContractViolation>;

    /// The transition produced these possible successors.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn transition_computed(
        &mut self,
        setup: &NetworkSetup,
        outcomes: &[NetworkState],
    ) -> Result<(), ContractViolation>;

    /// One successor was chosen as the slot's result.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn result_chosen(
        &mut self,
        setup: &NetworkSetup,
        state: &NetworkState,
    ) -> Result<(), ContractViolation>;

    /// The slot ended.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn slot_end(&mut self) -> Result<(), ContractViolation>;

    /// The simulation ended.
    ///
    /// # Errors
    ///
    /// Rendering violations.
    fn simulation_end(&mut self) -> Result<(), ContractViolation>;
}
