//! A trivial greeting protocol: one leader broadcasts HALLO down a
//! small tree; whoever receives it passes it on once.

use slotcast_engine::{Action, ContractViolation};
use slotcast_simulator::{
    runner, RunContext, Simulator, SimulatorError, SlotView, StateMachine, StateProtocol,
};
use slotcast_types::{ExplicitTopology, Message, MessageId};

struct HalloMessage;

impl Message for HalloMessage {
    fn render(&self) -> String {
        "HALLO".to_string()
    }

    fn to_xml(&self) -> Vec<String> {
        vec!["<type>HALLO</type>".to_string()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelloState {
    Initial,
    Waiting,
    Done,
}

/// Resend a cancelled transmission with the same parameters, keeping
/// the current state.
fn resend_cancelled(
    view: &mut SlotView<'_>,
    state: HelloState,
) -> Result<Option<HelloState>, ContractViolation> {
    if let Some(&Action::Cancelled { tic, message }) = view.previous_action() {
        view.send(message, tic, true)?;
        return Ok(Some(state));
    }
    Ok(None)
}

struct Leader {
    message: MessageId,
}

impl StateProtocol for Leader {
    type State = HelloState;

    fn id(&self) -> String {
        "Leader".to_string()
    }

    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: HelloState,
    ) -> Result<HelloState, ContractViolation> {
        if let Some(kept) = resend_cancelled(view, state)? {
            return Ok(kept);
        }

        match state {
            HelloState::Initial => {
                view.send(self.message, 3, true)?;
                Ok(HelloState::Done)
            }
            HelloState::Waiting | HelloState::Done => {
                view.idle()?;
                Ok(state)
            }
        }
    }
}

struct Inferior {
    priority: usize,
}

impl StateProtocol for Inferior {
    type State = HelloState;

    fn id(&self) -> String {
        format!("Inferior{}", self.priority)
    }

    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: HelloState,
    ) -> Result<HelloState, ContractViolation> {
        if let Some(kept) = resend_cancelled(view, state)? {
            return Ok(kept);
        }

        match state {
            HelloState::Initial => {
                view.listen()?;
                Ok(HelloState::Waiting)
            }
            HelloState::Waiting => {
                if let Some(&Action::Received { message, .. }) = view.previous_action() {
                    view.send(message, self.priority, true)?;
                    Ok(HelloState::Done)
                } else {
                    view.listen()?;
                    Ok(HelloState::Waiting)
                }
            }
            HelloState::Done => {
                view.idle()?;
                Ok(state)
            }
        }
    }
}

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(20)?;
    sim.use_output_module(context.output_module());

    let hallo = sim.register_message(Box::new(HalloMessage));

    let mut ids = Vec::new();
    ids.push(sim.register_component(Box::new(StateMachine::new(
        Leader { message: hallo },
        HelloState::Initial,
    )))?);
    for priority in 1..10 {
        ids.push(sim.register_component(Box::new(StateMachine::new(
            Inferior { priority },
            HelloState::Initial,
        )))?);
    }

    let mut topo = ExplicitTopology::new();
    topo.add_edge(ids[0], ids[1]);
    topo.add_edge(ids[0], ids[2]);
    topo.add_edge(ids[1], ids[3]);
    topo.add_edge(ids[1], ids[4]);
    topo.add_edge(ids[2], ids[5]);
    topo.add_edge(ids[2], ids[6]);
    topo.add_edge(ids[3], ids[7]);
    topo.add_edge(ids[3], ids[8]);
    topo.add_edge(ids[4], ids[9]);

    topo.add_edge(ids[0], ids[3]);
    topo.add_edge(ids[2], ids[3]);
    sim.use_topology(Box::new(topo));

    sim.run(5)?;
    Ok(0)
}

fn main() {
    runner::run("trivial", entry);
}
