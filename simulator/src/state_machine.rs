//! State-machine components.
//!
//! Many protocols are naturally finite state machines: the callback
//! receives the current state and returns the next one. The adapter
//! here owns the state value and delegates the slot callback to the
//! wrapped protocol. Immediate transitions (same-slot dispatch) are
//! expressed by the protocol calling itself on the returned state
//! before yielding; the one-intention-per-slot contract is unaffected
//! by the recursion depth.

use slotcast_engine::ContractViolation;

use crate::component::Component;
use crate::view::SlotView;

/// A protocol expressed as a state machine over `State`.
pub trait StateProtocol {
    /// The finite state set of the protocol.
    type State: Clone;

    /// The string id of the component.
    fn id(&self) -> String;

    /// One slot of the protocol: act through the view and return the
    /// next state.
    ///
    /// # Errors
    ///
    /// Propagates view violations.
    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: Self::State,
    ) -> Result<Self::State, ContractViolation>;

    /// Structured representation of the component.
    fn to_xml(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Component adapter holding the current state of a [`StateProtocol`].
pub struct StateMachine<P: StateProtocol> {
    protocol: P,
    state: P::State,
}

impl<P: StateProtocol> StateMachine<P> {
    /// Wrap a protocol with its initial state.
    pub fn new(protocol: P, initial: P::State) -> Self {
        Self {
            protocol,
            state: initial,
        }
    }

    /// The current state.
    pub fn state(&self) -> &P::State {
        &self.state
    }
}

impl<P: StateProtocol> Component for StateMachine<P> {
    fn id(&self) -> String {
        self.protocol.id()
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        self.state = self.protocol.act_with_state(view, self.state.clone())?;
        Ok(())
    }

    fn to_xml(&self) -> Vec<String> {
        self.protocol.to_xml()
    }
}
