//! The transition function: from an intention assignment to the set of
//! possible successor network states.
//!
//! Phase 1 computes the sender set. Phase 2 enumerates the possible
//! actions of each component independently, prunes them through the
//! semantics filter, and merges them into full network states with a
//! cross-product over two rotating buffers.

use tracing::warn;

use slotcast_types::{ComponentId, Topology};

use crate::error::ContractViolation;
use crate::mapping::{IntentionAssignment, NetworkState};
use crate::sender_set::{compute_sender_set, SenderSet};
use crate::setup::NetworkSetup;
use crate::trait_value::{Action, Intention};

/// Component count above which the canonical filter is likely to
/// produce an unmanageable successor set.
const CANONICAL_EXPLOSION_LIMIT: usize = 7;

/// Prunes the enumerated actions of one component.
pub type FilterFn = fn(&NetworkSetup, &mut Vec<Action>);

/// Which successor sets the transition produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Semantics {
    /// Every action set the abstract model admits.
    Canonical,
    /// Deterministic resolution of listening: silence without senders,
    /// the message with exactly one reachable sender, a collision with
    /// more than one.
    #[default]
    Naive,
}

impl Semantics {
    /// The filter implementing this semantics.
    #[must_use]
    pub fn filter(self) -> FilterFn {
        match self {
            Semantics::Canonical => filter_nothing,
            Semantics::Naive => filter_naive,
        }
    }
}

/// The canonical filter: removes nothing, only de-duplicates equal
/// actions (same variant, tic, and message handle), preserving first
/// occurrence order.
pub fn filter_nothing(_setup: &NetworkSetup, actions: &mut Vec<Action>) {
    let mut unique: Vec<Action> = Vec::with_capacity(actions.len());
    for action in actions.drain(..) {
        if !unique.contains(&action) {
            unique.push(action);
        }
    }
    *actions = unique;
}

/// The naive filter: resolves the listening nondeterminism to the
/// physical-intuition outcome.
///
/// A `Collision` entry marks a listener with at least one reachable
/// sender. In that case: two or more receivable messages collapse to a
/// single `Collision`, exactly one receivable survives alone, and none
/// at all leaves only `Silence`.
pub fn filter_naive(_setup: &NetworkSetup, actions: &mut Vec<Action>) {
    let receivable = actions
        .iter()
        .filter(|action| matches!(action, Action::Received { .. }))
        .count();
    let collisions = actions
        .iter()
        .filter(|action| matches!(action, Action::Collision))
        .count();

    if collisions == 0 {
        return;
    }

    match receivable {
        0 => actions.retain(|action| matches!(action, Action::Silence)),
        1 => actions.retain(|action| matches!(action, Action::Received { .. })),
        _ => {
            actions.clear();
            actions.push(Action::Collision);
        }
    }
}

/// Enumerate the possible actions of one component given the sender set.
fn possible_actions(
    setup: &NetworkSetup,
    topology: &dyn Topology,
    intent: &IntentionAssignment,
    senders: &SenderSet,
    component: ComponentId,
) -> Result<Vec<Action>, ContractViolation> {
    let mut actions = Vec::new();

    match intent.get(component)? {
        Intention::Idle => {
            actions.push(Action::Idle);
        }

        &Intention::Send { tic, message, .. } => {
            // Membership in the sender set decides sent vs cancelled.
            if senders.contains(component) {
                actions.push(Action::Sent { tic, message });
            } else {
                actions.push(Action::Cancelled { tic, message });
            }
        }

        Intention::Listen => {
            // Every transmission of a reachable sender may be received;
            // one collision is possible as soon as any sender exists.
            let mut has_sender = false;
            for potential in setup.component_ids() {
                if !topology.can_reach(potential, component) {
                    continue;
                }
                let Some(tx) = senders.transmission(potential) else {
                    continue;
                };
                actions.push(Action::Received {
                    tic: tx.tic,
                    message: tx.message,
                });
                if !has_sender {
                    has_sender = true;
                    actions.push(Action::Collision);
                }
            }
            if !has_sender {
                actions.push(Action::Silence);
            }
        }
    }

    Ok(actions)
}

/// Compute all successor network states of an intention assignment
/// under the given semantics.
///
/// # Errors
///
/// `PartialIntent` for a partial assignment and `FilterEmptied` if the
/// filter removes every possibility for some component.
pub fn successors(
    setup: &NetworkSetup,
    topology: &dyn Topology,
    intent: &IntentionAssignment,
    semantics: Semantics,
) -> Result<Vec<NetworkState>, ContractViolation> {
    if semantics == Semantics::Canonical && setup.component_count() > CANONICAL_EXPLOSION_LIMIT {
        warn!(
            components = setup.component_count(),
            "canonical semantics over more than {CANONICAL_EXPLOSION_LIMIT} components \
             may produce an unmanageable successor set"
        );
    }
    successors_with_filter(setup, topology, intent, semantics.filter())
}

/// [`successors`] with an explicit filter instead of a named semantics.
///
/// # Errors
///
/// As [`successors`].
pub fn successors_with_filter(
    setup: &NetworkSetup,
    topology: &dyn Topology,
    intent: &IntentionAssignment,
    filter: FilterFn,
) -> Result<Vec<NetworkState>, ContractViolation> {
    let senders = compute_sender_set(setup, topology, intent)?;

    // Cross-product over components in registration order. The front
    // buffer holds the partial states built so far; for each component
    // it is rebuilt from the back buffer, once per possible action.
    let mut front: Vec<NetworkState> = vec![NetworkState::new(setup)];
    let mut back: Vec<NetworkState> = Vec::new();

    for component in setup.component_ids() {
        let mut actions = possible_actions(setup, topology, intent, &senders, component)?;
        filter(setup, &mut actions);
        if actions.is_empty() {
            return Err(ContractViolation::FilterEmptied(component));
        }

        std::mem::swap(&mut front, &mut back);
        front.clear();
        for partial in &back {
            for &action in &actions {
                let mut extended = partial.clone();
                extended.set(setup, component, action)?;
                front.push(extended);
            }
        }
    }

    Ok(front)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcast_types::{Message, MessageId, Tic, TrivialTopology};

    struct Named(&'static str);

    impl Message for Named {
        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    fn setup_with(names: &[&str]) -> (NetworkSetup, Vec<ComponentId>) {
        let mut setup = NetworkSetup::new(10).unwrap();
        let ids = names
            .iter()
            .map(|name| setup.register_component(*name).unwrap())
            .collect();
        (setup, ids)
    }

    fn send(tic: Tic, message: MessageId, carrier_sense: bool) -> Intention {
        Intention::Send {
            tic,
            message,
            carrier_sense,
        }
    }

    #[test]
    fn test_filter_nothing_deduplicates() {
        let (mut setup, _) = setup_with(&["a"]);
        let m = setup.register_message(Box::new(Named("m")));
        let mut actions = vec![
            Action::Received { tic: 2, message: m },
            Action::Collision,
            Action::Received { tic: 2, message: m },
            Action::Collision,
        ];
        filter_nothing(&setup, &mut actions);
        assert_eq!(
            actions,
            vec![Action::Received { tic: 2, message: m }, Action::Collision]
        );
    }

    #[test]
    fn test_filter_naive_single_receivable() {
        let (mut setup, _) = setup_with(&["a"]);
        let m = setup.register_message(Box::new(Named("m")));
        let mut actions = vec![
            Action::Received { tic: 2, message: m },
            Action::Collision,
        ];
        filter_naive(&setup, &mut actions);
        assert_eq!(actions, vec![Action::Received { tic: 2, message: m }]);
    }

    #[test]
    fn test_filter_naive_many_receivables() {
        let (mut setup, _) = setup_with(&["a"]);
        let m1 = setup.register_message(Box::new(Named("m1")));
        let m2 = setup.register_message(Box::new(Named("m2")));
        let mut actions = vec![
            Action::Received { tic: 2, message: m1 },
            Action::Collision,
            Action::Received { tic: 2, message: m2 },
        ];
        filter_naive(&setup, &mut actions);
        assert_eq!(actions, vec![Action::Collision]);
    }

    #[test]
    fn test_filter_naive_without_collision_is_identity() {
        let (setup, _) = setup_with(&["a"]);
        let mut actions = vec![Action::Silence];
        filter_naive(&setup, &mut actions);
        assert_eq!(actions, vec![Action::Silence]);
    }

    #[test]
    fn test_idle_maps_to_idle() {
        let (setup, ids) = setup_with(&["a"]);
        let mut intent = IntentionAssignment::new(&setup);
        intent.set(&setup, ids[0], Intention::Idle).unwrap();
        let states = successors(&setup, &TrivialTopology, &intent, Semantics::Naive).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].get(ids[0]).unwrap(), &Action::Idle);
    }

    #[test]
    fn test_canonical_listener_cardinality() {
        // One listener, two senders at the same tic: the listener has
        // k + 1 = 3 possible actions (both messages plus a collision,
        // silence excluded) and everyone else exactly one.
        let (mut setup, ids) = setup_with(&["l", "s1", "s2"]);
        let m1 = setup.register_message(Box::new(Named("m1")));
        let m2 = setup.register_message(Box::new(Named("m2")));
        let mut intent = IntentionAssignment::new(&setup);
        intent.set(&setup, ids[0], Intention::Listen).unwrap();
        intent.set(&setup, ids[1], send(3, m1, true)).unwrap();
        intent.set(&setup, ids[2], send(3, m2, true)).unwrap();

        let states =
            successors(&setup, &TrivialTopology, &intent, Semantics::Canonical).unwrap();
        assert_eq!(states.len(), 3);

        let listener_actions: Vec<_> = states
            .iter()
            .map(|state| *state.get(ids[0]).unwrap())
            .collect();
        assert!(listener_actions.contains(&Action::Received { tic: 3, message: m1 }));
        assert!(listener_actions.contains(&Action::Received { tic: 3, message: m2 }));
        assert!(listener_actions.contains(&Action::Collision));
        // No silence with reachable senders present.
        assert!(!listener_actions.contains(&Action::Silence));
    }

    #[test]
    fn test_canonical_lone_listener_hears_silence() {
        let (setup, ids) = setup_with(&["l"]);
        let mut intent = IntentionAssignment::new(&setup);
        intent.set(&setup, ids[0], Intention::Listen).unwrap();
        let states =
            successors(&setup, &TrivialTopology, &intent, Semantics::Canonical).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].get(ids[0]).unwrap(), &Action::Silence);
    }

    #[test]
    fn test_naive_is_singleton() {
        let (mut setup, ids) = setup_with(&["l", "s1", "s2"]);
        let m1 = setup.register_message(Box::new(Named("m1")));
        let m2 = setup.register_message(Box::new(Named("m2")));
        let mut intent = IntentionAssignment::new(&setup);
        intent.set(&setup, ids[0], Intention::Listen).unwrap();
        intent.set(&setup, ids[1], send(3, m1, true)).unwrap();
        intent.set(&setup, ids[2], send(3, m2, true)).unwrap();

        let states = successors(&setup, &TrivialTopology, &intent, Semantics::Naive).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].get(ids[0]).unwrap(), &Action::Collision);
    }

    #[test]
    fn test_cancelled_send_reports_cancellation() {
        let (mut setup, ids) = setup_with(&["a", "b"]);
        let m1 = setup.register_message(Box::new(Named("m1")));
        let m2 = setup.register_message(Box::new(Named("m2")));
        let mut intent = IntentionAssignment::new(&setup);
        intent.set(&setup, ids[0], send(4, m1, false)).unwrap();
        intent.set(&setup, ids[1], send(5, m2, true)).unwrap();

        let states = successors(&setup, &TrivialTopology, &intent, Semantics::Naive).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(
            states[0].get(ids[0]).unwrap(),
            &Action::Sent { tic: 4, message: m1 }
        );
        assert_eq!(
            states[0].get(ids[1]).unwrap(),
            &Action::Cancelled { tic: 5, message: m2 }
        );
    }
}
