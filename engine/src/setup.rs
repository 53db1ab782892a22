//! The network setup: the static universe a simulation runs against.

use slotcast_types::{ComponentId, Message, MessageId};

use crate::error::ContractViolation;

/// Slot granularity, registered components, and registered messages.
///
/// Components are recorded in registration order and that order is part
/// of the contract: trait mappings, the sender-set solver, and both
/// output formats traverse components in exactly this order.
pub struct NetworkSetup {
    tics_per_slot: usize,
    component_names: Vec<String>,
    messages: Vec<Box<dyn Message>>,
}

impl NetworkSetup {
    /// Create a setup with the given slot granularity.
    ///
    /// # Errors
    ///
    /// `ZeroTicsPerSlot` if `tics_per_slot` is zero.
    pub fn new(tics_per_slot: usize) -> Result<Self, ContractViolation> {
        if tics_per_slot == 0 {
            return Err(ContractViolation::ZeroTicsPerSlot);
        }
        Ok(Self {
            tics_per_slot,
            component_names: Vec::new(),
            messages: Vec::new(),
        })
    }

    /// Register a component under its string id and return its handle.
    ///
    /// # Errors
    ///
    /// `DuplicateComponent` if the string id is already taken.
    pub fn register_component(
        &mut self,
        name: impl Into<String>,
    ) -> Result<ComponentId, ContractViolation> {
        let name = name.into();
        if self.component_names.iter().any(|existing| *existing == name) {
            return Err(ContractViolation::DuplicateComponent(name));
        }
        let id = ComponentId::new(self.component_names.len());
        self.component_names.push(name);
        Ok(id)
    }

    /// Intern a message and return its handle.
    pub fn register_message(&mut self, message: Box<dyn Message>) -> MessageId {
        let id = MessageId::new(self.messages.len());
        self.messages.push(message);
        id
    }

    /// Whether the handle was issued by this setup.
    #[must_use]
    pub fn is_component(&self, id: ComponentId) -> bool {
        id.index() < self.component_names.len()
    }

    /// Whether the handle was issued by this setup.
    #[must_use]
    pub fn is_message(&self, id: MessageId) -> bool {
        id.index() < self.messages.len()
    }

    /// All component handles, in registration order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.component_names.len()).map(ComponentId::new)
    }

    /// Number of registered components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.component_names.len()
    }

    /// Number of tics per slot.
    #[must_use]
    pub fn tics_per_slot(&self) -> usize {
        self.tics_per_slot
    }

    /// The string id a component was registered under.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` for handles this setup never issued.
    pub fn component_name(&self, id: ComponentId) -> Result<&str, ContractViolation> {
        self.component_names
            .get(id.index())
            .map(String::as_str)
            .ok_or(ContractViolation::UnknownComponent(id))
    }

    /// The registered message behind a handle.
    ///
    /// # Errors
    ///
    /// `UnknownMessage` for handles this setup never issued.
    pub fn message(&self, id: MessageId) -> Result<&dyn Message, ContractViolation> {
        self.messages
            .get(id.index())
            .map(|boxed| boxed.as_ref() as &dyn Message)
            .ok_or(ContractViolation::UnknownMessage(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Message for Plain {
        fn render(&self) -> String {
            "Message".to_string()
        }
    }

    #[test]
    fn test_zero_tics_rejected() {
        assert_eq!(
            NetworkSetup::new(0).err(),
            Some(ContractViolation::ZeroTicsPerSlot)
        );
    }

    #[test]
    fn test_registration_order() {
        let mut setup = NetworkSetup::new(4).unwrap();
        let a = setup.register_component("a").unwrap();
        let b = setup.register_component("b").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        let order: Vec<_> = setup.component_ids().collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(setup.component_name(b).unwrap(), "b");
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let mut setup = NetworkSetup::new(4).unwrap();
        setup.register_component("a").unwrap();
        assert_eq!(
            setup.register_component("a").err(),
            Some(ContractViolation::DuplicateComponent("a".to_string()))
        );
    }

    #[test]
    fn test_message_handles() {
        let mut setup = NetworkSetup::new(4).unwrap();
        let m = setup.register_message(Box::new(Plain));
        assert!(setup.is_message(m));
        assert!(!setup.is_message(slotcast_types::MessageId::new(1)));
        assert_eq!(setup.message(m).unwrap().render(), "Message");
    }
}
