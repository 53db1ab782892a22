//! Three components circulate named messages in a ring: whoever
//! receives its awaited message responds with the next one.

use slotcast_engine::{Action, ContractViolation};
use slotcast_protocols::NamedMessage;
use slotcast_simulator::{
    runner, Component, RunContext, Simulator, SimulatorError, SlotView,
};
use slotcast_types::{MessageId, TrivialTopology};

struct InoutComponent {
    name: &'static str,
    awaited: MessageId,
    response: MessageId,
    kick_off: bool,
}

impl Component for InoutComponent {
    fn id(&self) -> String {
        self.name.to_string()
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        // Jump start the circle in slot 0.
        if view.slot_number() == 0 && self.kick_off {
            return view.send(self.response, 0, true);
        }

        if let Some(&Action::Received { message, .. }) = view.previous_action() {
            if message == self.awaited {
                return view.send(self.response, 0, true);
            }
        }
        view.listen()
    }
}

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(1)?;
    sim.use_output_module(context.output_module());

    let msg_a = sim.register_message(Box::new(NamedMessage::new("A")));
    let msg_b = sim.register_message(Box::new(NamedMessage::new("B")));
    let msg_c = sim.register_message(Box::new(NamedMessage::new("C")));

    sim.register_component(Box::new(InoutComponent {
        name: "CircAB",
        awaited: msg_a,
        response: msg_b,
        kick_off: true,
    }))?;
    sim.register_component(Box::new(InoutComponent {
        name: "CircBC",
        awaited: msg_b,
        response: msg_c,
        kick_off: false,
    }))?;
    sim.register_component(Box::new(InoutComponent {
        name: "CircCA",
        awaited: msg_c,
        response: msg_a,
        kick_off: false,
    }))?;

    sim.use_topology(Box::new(TrivialTopology));

    sim.run(10)?;
    Ok(0)
}

fn main() {
    runner::run("cyclic", entry);
}
