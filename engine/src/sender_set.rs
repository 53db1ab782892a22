//! The sender-set fixed point: which components actually transmit.
//!
//! A sending intention with carrier sensing is suppressed when a
//! reachable transmission started at a strictly earlier tic. Components
//! starting at the same tic never detect each other: carrier sensing
//! completes earlier in the tic than the transmission begins, so the
//! check only sees transmissions from previous tics.

use slotcast_types::{ComponentId, MessageId, Tic, Topology};

use crate::error::ContractViolation;
use crate::mapping::{IntentionAssignment, NetworkState};
use crate::setup::NetworkSetup;
use crate::trait_value::{Action, Intention};

/// One transmission of the slot: start tic and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transmission {
    /// Tic the transmission starts in.
    pub tic: Tic,
    /// The transmitted message.
    pub message: MessageId,
}

/// The set of transmissions that happen in a slot, indexed by component.
///
/// Components absent from the set did not transmit: they idled,
/// listened, or had their send cancelled by carrier sensing.
#[derive(Debug, Clone)]
pub struct SenderSet {
    entries: Vec<Option<Transmission>>,
}

impl SenderSet {
    /// The transmission of a component, or `None` if it did not
    /// transmit this slot.
    #[must_use]
    pub fn transmission(&self, component: ComponentId) -> Option<Transmission> {
        self.entries.get(component.index()).copied().flatten()
    }

    /// Whether the component transmits this slot.
    #[must_use]
    pub fn contains(&self, component: ComponentId) -> bool {
        self.transmission(component).is_some()
    }

    /// All transmissions in component registration order.
    pub fn senders(&self) -> impl Iterator<Item = (ComponentId, Transmission)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.map(|tx| (ComponentId::new(index), tx)))
    }

    /// Render the set as a network state: senders map to `Sent`, every
    /// other component to the `Idle` sentinel. The sentinel means
    /// "absent from the sender set", not a real idle action.
    ///
    /// # Errors
    ///
    /// Propagates mapping violations; unreachable for a set computed
    /// from this setup.
    pub fn to_network_state(&self, setup: &NetworkSetup) -> Result<NetworkState, ContractViolation> {
        let mut state = NetworkState::new(setup);
        for component in setup.component_ids() {
            let action = match self.transmission(component) {
                Some(tx) => Action::Sent {
                    tic: tx.tic,
                    message: tx.message,
                },
                None => Action::Idle,
            };
            state.set(setup, component, action)?;
        }
        Ok(state)
    }
}

/// Compute the sender set for a total intention assignment.
///
/// Iterates tics in increasing order, growing the set of started
/// transmissions: forced sends always join; carrier-sensed sends join
/// iff no already-started transmission is reachable.
///
/// # Errors
///
/// `PartialIntent` if the assignment is not total.
pub fn compute_sender_set(
    setup: &NetworkSetup,
    topology: &dyn Topology,
    intent: &IntentionAssignment,
) -> Result<SenderSet, ContractViolation> {
    if intent.is_partial() {
        return Err(ContractViolation::PartialIntent);
    }

    let mut entries: Vec<Option<Transmission>> = vec![None; setup.component_count()];
    // Components whose transmission started at a strictly earlier tic.
    let mut started: Vec<ComponentId> = Vec::new();

    for tic in 0..setup.tics_per_slot() {
        let mut newly_started: Vec<ComponentId> = Vec::new();
        for component in setup.component_ids() {
            let &Intention::Send {
                tic: start,
                message,
                carrier_sense,
            } = intent.get(component)?
            else {
                continue;
            };
            if start != tic {
                continue;
            }
            if carrier_sense
                && started
                    .iter()
                    .any(|&sender| topology.can_reach(sender, component))
            {
                // Carrier sensing detected an occupied medium.
                continue;
            }
            entries[component.index()] = Some(Transmission { tic, message });
            newly_started.push(component);
        }
        // Same-tic transmissions become visible only to later tics.
        started.extend(newly_started);
    }

    Ok(SenderSet { entries })
}
