//! The motivational chain: three components along a directed chain all
//! try to send with carrier sensing at consecutive tics. The middle
//! one detects the first and cancels, so the last one transmits.

use slotcast_engine::ContractViolation;
use slotcast_protocols::NamedMessage;
use slotcast_simulator::{
    runner, Component, RunContext, Simulator, SimulatorError, SlotView,
};
use slotcast_types::{ExplicitTopology, MessageId};

struct SendingComponent {
    priority: usize,
    message: MessageId,
}

impl Component for SendingComponent {
    fn id(&self) -> String {
        format!("Comp{}", self.priority)
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        view.send(self.message, self.priority, true)
    }
}

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(3)?;
    sim.use_output_module(context.output_module());

    let message = sim.register_message(Box::new(NamedMessage::new("Message")));

    let mut ids = Vec::new();
    for priority in 0..3 {
        ids.push(sim.register_component(Box::new(SendingComponent { priority, message }))?);
    }

    let mut topo = ExplicitTopology::new();
    topo.add_edge(ids[0], ids[1]);
    topo.add_edge(ids[1], ids[2]);
    sim.use_topology(Box::new(topo));

    sim.run(1)?;
    Ok(0)
}

fn main() {
    runner::run("motivational", entry);
}
