//! The alarm system: one central unit, a chain of five repeaters, and
//! ten sensors behind the last repeater. Sensors raise alarms that are
//! relayed hop by hop and acknowledged at every hop.

use std::sync::Arc;

use slotcast_protocols::alarm::{
    self, AlarmBook, AlarmState, CentralUnit, Repeater, Sensor, NUM_REPEATERS, NUM_SENSORS,
    SENSOR_ID_OFFSET, TICS_PER_SLOT,
};
use slotcast_simulator::{runner, RunContext, Simulator, SimulatorError, StateMachine};

fn entry(context: &RunContext, _args: &[String]) -> Result<i32, SimulatorError> {
    let mut sim = Simulator::new(TICS_PER_SLOT)?;
    sim.use_output_module(context.output_module());
    sim.use_topology(Box::new(alarm::chain_topology()));

    // Intern one message per (kind, from, to, data) tuple before any
    // component acts.
    let names = alarm::component_names();
    let book = Arc::new(AlarmBook::register_all(&mut sim, &names));

    // Registration must follow the canonical order the id helpers
    // assume: central unit, repeaters, sensors.
    sim.register_component(Box::new(StateMachine::new(
        CentralUnit::new(Arc::clone(&book)),
        AlarmState::InitialCu,
    )))?;
    for num in 1..=NUM_REPEATERS {
        sim.register_component(Box::new(StateMachine::new(
            Repeater::new(num, Arc::clone(&book)),
            AlarmState::InitialRep,
        )))?;
    }
    for index in 0..NUM_SENSORS {
        sim.register_component(Box::new(StateMachine::new(
            Sensor::new(SENSOR_ID_OFFSET + index, index, Arc::clone(&book)),
            AlarmState::InitialSen,
        )))?;
    }

    // After ~115 slots nothing interesting happens anymore.
    sim.run(120)?;
    Ok(0)
}

fn main() {
    runner::run("alarm", entry);
}
