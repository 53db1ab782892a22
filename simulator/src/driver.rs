//! The slot driver.
//!
//! One `Simulator` is one simulation: it owns the network setup, the
//! components, the topology, the output module, and the previous
//! network state, and advances the simulation one slot at a time.

use thiserror::Error;
use tracing::info;

use slotcast_engine::{
    successors, ContractViolation, IntentionAssignment, NetworkSetup, NetworkState, Semantics,
};
use slotcast_types::{ComponentId, Message, MessageId, SlotNumber, Topology};

use crate::choice::{RequireSingle, SuccessorChoice};
use crate::component::Component;
use crate::output::{OutputModule, TextOutput};
use crate::sections::SectionStack;
use crate::view::SlotView;

/// A fatal simulation failure.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A programmer contract was violated; `sections` records what the
    /// simulator was doing, outermost first.
    #[error("{violation}")]
    Fatal {
        /// The section stack at the point of failure.
        sections: Vec<String>,
        /// The broken contract.
        violation: ContractViolation,
    },
}

impl SimulatorError {
    /// The section stack at the point of failure, outermost first.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        match self {
            SimulatorError::Fatal { sections, .. } => sections,
        }
    }

    /// The underlying contract violation.
    #[must_use]
    pub fn violation(&self) -> &ContractViolation {
        match self {
            SimulatorError::Fatal { violation, .. } => violation,
        }
    }
}

fn fatal(sections: &SectionStack, violation: ContractViolation) -> SimulatorError {
    SimulatorError::Fatal {
        sections: sections.snapshot(),
        violation,
    }
}

/// The simulator: registration surface plus the slot loop.
pub struct Simulator {
    sections: SectionStack,
    setup: NetworkSetup,
    components: Vec<Box<dyn Component>>,
    topology: Option<Box<dyn Topology>>,
    output: Box<dyn OutputModule>,
    choice: Box<dyn SuccessorChoice>,
    semantics: Semantics,
    slot_number: SlotNumber,
    previous: Option<NetworkState>,
    has_begun: bool,
}

impl Simulator {
    /// Create a simulator with the given slot granularity. Defaults:
    /// plain-text output, naive semantics, single-successor resolution.
    ///
    /// # Errors
    ///
    /// `ZeroTicsPerSlot`.
    pub fn new(tics_per_slot: usize) -> Result<Self, SimulatorError> {
        let sections = SectionStack::new();
        let setup =
            NetworkSetup::new(tics_per_slot).map_err(|violation| fatal(&sections, violation))?;
        Ok(Self {
            sections,
            setup,
            components: Vec::new(),
            topology: None,
            output: Box::new(TextOutput::stdout()),
            choice: Box::new(RequireSingle),
            semantics: Semantics::Naive,
            slot_number: 0,
            previous: None,
            has_begun: false,
        })
    }

    /// Set the topology used by the simulation.
    pub fn use_topology(&mut self, topology: Box<dyn Topology>) {
        self.topology = Some(topology);
    }

    /// Replace the default output module.
    pub fn use_output_module(&mut self, output: Box<dyn OutputModule>) {
        self.output = output;
    }

    /// Replace the default transition semantics.
    pub fn use_semantics(&mut self, semantics: Semantics) {
        self.semantics = semantics;
    }

    /// Replace the successor resolution policy.
    pub fn use_successor_choice(&mut self, choice: Box<dyn SuccessorChoice>) {
        self.choice = choice;
    }

    /// Register a component; its handle is its registration index.
    ///
    /// # Errors
    ///
    /// `DuplicateComponent` for a repeated string id.
    pub fn register_component(
        &mut self,
        component: Box<dyn Component>,
    ) -> Result<ComponentId, SimulatorError> {
        self.sections.enter("Simulator::register_component()");
        let id = self
            .setup
            .register_component(component.id())
            .map_err(|violation| fatal(&self.sections, violation))?;
        self.components.push(component);
        self.sections.leave();
        Ok(id)
    }

    /// Register (intern) a message.
    pub fn register_message(&mut self, message: Box<dyn Message>) -> MessageId {
        self.setup.register_message(message)
    }

    /// The setup being simulated.
    #[must_use]
    pub fn setup(&self) -> &NetworkSetup {
        &self.setup
    }

    /// The network state chosen in the most recent slot, if any slot
    /// ran yet.
    #[must_use]
    pub fn previous_state(&self) -> Option<&NetworkState> {
        self.previous.as_ref()
    }

    /// Run the simulation for `num_slots` slots and finish it. Must
    /// not be combined with [`run_single`](Simulator::run_single).
    ///
    /// # Errors
    ///
    /// `ZeroSlots`, plus everything `run_single` raises.
    pub fn run(&mut self, num_slots: usize) -> Result<(), SimulatorError> {
        self.sections.enter("Simulator::run()");
        if num_slots == 0 {
            return Err(fatal(&self.sections, ContractViolation::ZeroSlots));
        }
        for _ in 0..num_slots {
            self.run_single(num_slots)?;
        }
        self.end_single()?;
        self.sections.leave();
        Ok(())
    }

    /// Run a single slot. May be repeated; a sequence must be finished
    /// with [`end_single`](Simulator::end_single). `intended_slots` is
    /// the total number of slots the caller plans to run.
    ///
    /// # Errors
    ///
    /// `TopologyNotSet` and every contract violation a slot can raise.
    pub fn run_single(&mut self, intended_slots: usize) -> Result<(), SimulatorError> {
        self.sections.enter("Simulator::run_single()");
        if self.topology.is_none() {
            return Err(fatal(&self.sections, ContractViolation::TopologyNotSet));
        }

        if !self.has_begun {
            self.has_begun = true;
            info!("Simulating {intended_slots} slots.");
            let Some(topology) = self.topology.as_deref() else {
                return Err(fatal(&self.sections, ContractViolation::TopologyNotSet));
            };
            self.output
                .simulation_begin(intended_slots, &self.setup, &self.components, topology)
                .map_err(|violation| fatal(&self.sections, violation))?;
        }

        self.run_slot()?;
        self.slot_number += 1;
        self.sections.leave();
        Ok(())
    }

    /// Finish a sequence of [`run_single`](Simulator::run_single)
    /// calls.
    ///
    /// # Errors
    ///
    /// Rendering violations from the output module.
    pub fn end_single(&mut self) -> Result<(), SimulatorError> {
        self.sections.enter("Simulator::end_single()");
        self.output
            .simulation_end()
            .map_err(|violation| fatal(&self.sections, violation))?;
        self.sections.leave();
        Ok(())
    }

    fn run_slot(&mut self) -> Result<(), SimulatorError> {
        self.sections.enter("Running slot");
        self.output
            .slot_begin(self.slot_number)
            .map_err(|violation| fatal(&self.sections, violation))?;

        // Run the protocols.
        info!("Running network protocol for slot {}.", self.slot_number);
        let mut intent = IntentionAssignment::new(&self.setup);
        for (index, component) in self.components.iter_mut().enumerate() {
            let id = ComponentId::new(index);
            let previous = match &self.previous {
                Some(state) => Some(
                    state
                        .get(id)
                        .map_err(|violation| fatal(&self.sections, violation))?,
                ),
                None => None,
            };
            let mut view = SlotView::new(&self.setup, self.slot_number, id, previous, &mut intent);
            component
                .act(&mut view)
                .map_err(|violation| fatal(&self.sections, violation))?;
            if !view.has_acted() {
                return Err(fatal(&self.sections, ContractViolation::NoIntention(id)));
            }
        }

        if intent.is_partial() {
            return Err(fatal(&self.sections, ContractViolation::PartialIntent));
        }
        self.output
            .intent_chosen(&self.setup, &intent)
            .map_err(|violation| fatal(&self.sections, violation))?;

        // Perform the transition.
        let topology = self
            .topology
            .as_deref()
            .ok_or_else(|| fatal(&self.sections, ContractViolation::TopologyNotSet))?;
        let outcomes = successors(&self.setup, topology, &intent, self.semantics)
            .map_err(|violation| fatal(&self.sections, violation))?;
        self.output
            .transition_computed(&self.setup, &outcomes)
            .map_err(|violation| fatal(&self.sections, violation))?;

        let chosen = self
            .choice
            .choose(&outcomes)
            .map_err(|violation| fatal(&self.sections, violation))?;
        if chosen >= outcomes.len() {
            return Err(fatal(
                &self.sections,
                ContractViolation::AmbiguousOutcome(outcomes.len()),
            ));
        }
        let mut outcomes = outcomes;
        let state = outcomes.swap_remove(chosen);
        self.output
            .result_chosen(&self.setup, &state)
            .map_err(|violation| fatal(&self.sections, violation))?;
        self.previous = Some(state);

        self.output
            .slot_end()
            .map_err(|violation| fatal(&self.sections, violation))?;
        self.sections.leave();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcast_engine::Action;
    use slotcast_types::TrivialTopology;

    struct Idler;

    impl Component for Idler {
        fn id(&self) -> String {
            "idler".to_string()
        }

        fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
            view.idle()
        }
    }

    struct Mute;

    impl Component for Mute {
        fn id(&self) -> String {
            "mute".to_string()
        }

        fn act(&mut self, _view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
            Ok(())
        }
    }

    fn quiet_simulator(tics: usize) -> Simulator {
        let mut sim = Simulator::new(tics).unwrap();
        sim.use_output_module(Box::new(TextOutput::new(Vec::new())));
        sim
    }

    #[test]
    fn test_run_commits_successors() {
        let mut sim = quiet_simulator(4);
        sim.use_topology(Box::new(TrivialTopology));
        let id = sim.register_component(Box::new(Idler)).unwrap();
        sim.run(3).unwrap();
        let state = sim.previous_state().unwrap();
        assert_eq!(state.get(id).unwrap(), &Action::Idle);
    }

    #[test]
    fn test_missing_topology_is_fatal() {
        let mut sim = quiet_simulator(4);
        sim.register_component(Box::new(Idler)).unwrap();
        let err = sim.run(1).unwrap_err();
        assert_eq!(err.violation(), &ContractViolation::TopologyNotSet);
        assert!(!err.sections().is_empty());
    }

    #[test]
    fn test_component_without_intention_is_fatal() {
        let mut sim = quiet_simulator(4);
        sim.use_topology(Box::new(TrivialTopology));
        let id = sim.register_component(Box::new(Mute)).unwrap();
        let err = sim.run(1).unwrap_err();
        assert_eq!(err.violation(), &ContractViolation::NoIntention(id));
    }

    #[test]
    fn test_zero_slots_is_fatal() {
        let mut sim = quiet_simulator(4);
        sim.use_topology(Box::new(TrivialTopology));
        sim.register_component(Box::new(Idler)).unwrap();
        let err = sim.run(0).unwrap_err();
        assert_eq!(err.violation(), &ContractViolation::ZeroSlots);
    }

    #[test]
    fn test_duplicate_component_id_rejected() {
        let mut sim = quiet_simulator(4);
        sim.register_component(Box::new(Idler)).unwrap();
        let err = sim.register_component(Box::new(Idler)).unwrap_err();
        assert_eq!(
            err.violation(),
            &ContractViolation::DuplicateComponent("idler".to_string())
        );
    }

    #[test]
    fn test_previous_action_flows_between_slots() {
        struct Prober;

        impl Component for Prober {
            fn id(&self) -> String {
                "prober".to_string()
            }

            fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
                if view.slot_number() == 0 {
                    assert!(view.previous_action().is_none());
                } else {
                    assert_eq!(view.previous_action(), Some(&Action::Idle));
                }
                view.idle()
            }
        }

        let mut sim = quiet_simulator(4);
        sim.use_topology(Box::new(TrivialTopology));
        sim.register_component(Box::new(Prober)).unwrap();
        sim.run(3).unwrap();
    }
}
