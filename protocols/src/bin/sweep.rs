//! Two components sweep through every intention setting keyed off the
//! slot number, exercising each combination of idle, listen, and
//! carrier-sensed/forced sends at three different tics.

use slotcast_engine::ContractViolation;
use slotcast_protocols::NamedMessage;
use slotcast_simulator::{
    runner, Component, RunContext, Simulator, SimulatorError, SlotView,
};
use slotcast_types::{ExplicitTopology, MessageId};

struct DoEverythingComponent {
    /// Bits of the slot number to skip; with a stride of 3 bits per
    /// component, 8^n slots cover every setting of n components.
    skip: usize,
    message: MessageId,
}

impl Component for DoEverythingComponent {
    fn id(&self) -> String {
        format!("Sweep{}", self.skip)
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        let alotted = (view.slot_number() >> self.skip) & 0x7;
        match alotted {
            0 => view.idle(),
            1 => view.listen(),
            2 => view.send(self.message, 3, true),
            3 => view.send(self.message, 3, false),
            4 => view.send(self.message, 6, true),
            5 => view.send(self.message, 6, false),
            6 => view.send(self.message, 9, true),
            _ => view.send(self.message, 9, false),
        }
    }
}

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(10)?;
    sim.use_output_module(context.output_module());

    let message = sim.register_message(Box::new(NamedMessage::new("Message")));
    let first = sim.register_component(Box::new(DoEverythingComponent { skip: 0, message }))?;
    let second = sim.register_component(Box::new(DoEverythingComponent { skip: 3, message }))?;

    let mut topo = ExplicitTopology::new();
    topo.add_edge(first, second);
    sim.use_topology(Box::new(topo));

    sim.run(8 * 8)?;
    Ok(0)
}

fn main() {
    runner::run("sweep", entry);
}
