//! An echo client and server: the client sends once in slot 0, the
//! server echoes it back in slot 1.

use slotcast_protocols::{EchoClient, EchoServer, NamedMessage};
use slotcast_simulator::{runner, RunContext, Simulator, SimulatorError};
use slotcast_types::ExplicitTopology;

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(1)?;
    sim.use_output_module(context.output_module());

    let message = sim.register_message(Box::new(NamedMessage::new("Message")));
    let client = sim.register_component(Box::new(EchoClient::new("EchoClient", message)))?;
    let server = sim.register_component(Box::new(EchoServer::new("EchoServer")))?;

    let mut topo = ExplicitTopology::new();
    topo.add_edge(client, server);
    topo.add_edge(server, client);
    sim.use_topology(Box::new(topo));

    sim.run(2)?;
    Ok(0)
}

fn main() {
    runner::run("echo", entry);
}
