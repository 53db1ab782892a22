//! The alarm system.
//!
//! One central unit sits at the top of a repeater chain; a field of
//! sensors hangs off the last repeater. Sensors raise alarms that the
//! repeaters relay hop by hop towards the central unit; every hop is
//! acknowledged in the following slot. Transmission starts are spread
//! over tics by per-component priorities, and a component that keeps
//! colliding lowers its priority step by step.
//!
//! The network uses a single frequency, so one simulated medium covers
//! the whole system.

mod central;
mod message;
mod repeater;
mod sensor;

pub use central::CentralUnit;
pub use message::{AlarmBook, AlarmEnvelope, MessageKind};
pub use repeater::Repeater;
pub use sensor::Sensor;

use slotcast_types::{ComponentId, ExplicitTopology};

/// Number of repeaters in the chain.
pub const NUM_REPEATERS: usize = 5;

/// Number of sensors behind the last repeater.
pub const NUM_SENSORS: usize = 10;

/// Sensors carry internal ids starting at this offset; the bits of the
/// internal id steer the priority backoff.
pub const SENSOR_ID_OFFSET: usize = 128;

/// Slot granularity of the alarm network.
pub const TICS_PER_SLOT: usize = 25;

/// The central unit's handle under the canonical registration order.
#[must_use]
pub fn central_id() -> ComponentId {
    ComponentId::new(0)
}

/// The handle of repeater `num` (1-based) under the canonical
/// registration order.
#[must_use]
pub fn repeater_id(num: usize) -> ComponentId {
    ComponentId::new(num)
}

/// The handle of sensor `index` (0-based) under the canonical
/// registration order.
#[must_use]
pub fn sensor_id(index: usize) -> ComponentId {
    ComponentId::new(1 + NUM_REPEATERS + index)
}

/// Component names in the canonical registration order: the central
/// unit, then the repeaters, then the sensors.
#[must_use]
pub fn component_names() -> Vec<String> {
    let mut names = vec!["CentralUnit".to_string()];
    for num in 1..=NUM_REPEATERS {
        names.push(format!("Repeater{num}"));
    }
    for index in 0..NUM_SENSORS {
        names.push(format!("Sensor{index}"));
    }
    names
}

/// The alarm network topology:
///
/// ```text
///                                      +-> S0
///                                     /    |
/// C <-> R1 <-> R2 <-> R3 <-> R4 <-> R5   ...   (sensors reach R5 and
///                                     \    |    each other)
///                                      +-> S9
/// ```
#[must_use]
pub fn chain_topology() -> ExplicitTopology {
    let mut topo = ExplicitTopology::new();
    topo.add_edge(central_id(), repeater_id(1));
    topo.add_edge(repeater_id(1), central_id());
    for num in 1..NUM_REPEATERS {
        topo.add_edge(repeater_id(num), repeater_id(num + 1));
        topo.add_edge(repeater_id(num + 1), repeater_id(num));
    }
    for i in 0..NUM_SENSORS {
        topo.add_edge(sensor_id(i), repeater_id(NUM_REPEATERS));
        topo.add_edge(repeater_id(NUM_REPEATERS), sensor_id(i));
        for j in 0..NUM_SENSORS {
            topo.add_edge(sensor_id(i), sensor_id(j));
            topo.add_edge(sensor_id(j), sensor_id(i));
        }
    }
    topo
}

/// The states of the alarm protocol.
///
/// A states send towards supervisors, B states wait for replies, and
/// the terminal state neither sends nor listens. Immediate transitions
/// (same-slot dispatch) only move between states of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    /// Central unit waiting to be offered an alarm.
    InitialCu,
    /// Central unit reacting to the previous slot.
    WaitingCu,
    /// Repeater waiting to be offered an alarm.
    InitialRep,
    /// Repeater reacting to the previous slot.
    WaitForAlarmRep,
    /// Repeater with stored alarms to forward.
    ForwardAlarmsRep,
    /// Repeater that attempted a forward in the previous slot.
    AttemptedRep,
    /// Repeater expecting an acknowledgement.
    WaitForAckRep,
    /// Sensor about to raise its alarm.
    InitialSen,
    /// Sensor that attempted to send in the previous slot.
    AttemptedSen,
    /// Sensor expecting an acknowledgement.
    WaitForAckSen,
    /// Sensor whose alarm was acknowledged.
    DoneSen,
}

/// Shared priority backoff of repeaters and sensors.
///
/// Whether the priority drops after a failed attempt depends on the
/// bit of `id` selected by the running collision count; after nine
/// collisions both counters reset.
pub(crate) fn record_failure(id: usize, priority: &mut usize, collision: &mut usize) {
    let left = id & (128usize >> *collision) == 0;
    if left {
        if *priority <= 1 {
            *priority = 8;
        } else {
            *priority -= 1;
        }
    }

    *collision += 1;
    if *collision == 9 {
        *collision = 0;
        *priority = 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcast_types::Topology;

    #[test]
    fn test_topology_shape() {
        let topo = chain_topology();
        assert!(topo.can_reach(central_id(), repeater_id(1)));
        assert!(topo.can_reach(repeater_id(1), central_id()));
        assert!(topo.can_reach(repeater_id(2), repeater_id(3)));
        assert!(!topo.can_reach(central_id(), repeater_id(2)));
        assert!(topo.can_reach(sensor_id(0), repeater_id(NUM_REPEATERS)));
        assert!(topo.can_reach(sensor_id(0), sensor_id(9)));
        assert!(!topo.can_reach(sensor_id(0), repeater_id(1)));
    }

    #[test]
    fn test_backoff_resets_after_nine_collisions() {
        let mut priority = 8;
        let mut collision = 0;
        for _ in 0..9 {
            record_failure(SENSOR_ID_OFFSET, &mut priority, &mut collision);
        }
        assert_eq!(collision, 0);
        assert_eq!(priority, 8);
    }

    #[test]
    fn test_backoff_lowers_priority_on_zero_bits() {
        // Internal id 128 has only the top bit set: the first failure
        // checks that very bit (no drop), later ones check zero bits.
        let mut priority = 8;
        let mut collision = 0;
        record_failure(SENSOR_ID_OFFSET, &mut priority, &mut collision);
        assert_eq!(priority, 8);
        record_failure(SENSOR_ID_OFFSET, &mut priority, &mut collision);
        assert_eq!(priority, 7);
    }
}
