//! Trait mappings: total maps from components to trait values.
//!
//! A mapping is *partial* until every registered component has exactly
//! one entry; a total mapping may be queried and rendered but never
//! mutated. Entries are stored by registration index, so every traversal
//! follows registration order.

use slotcast_types::ComponentId;

use crate::error::ContractViolation;
use crate::setup::NetworkSetup;
use crate::trait_value::{render_trait, trait_to_xml, validate, Action, Intention, TraitValue};

/// A map from every registered component to exactly one trait value.
#[derive(Debug, Clone)]
pub struct TraitMapping<T> {
    entries: Vec<Option<T>>,
    assigned: usize,
}

/// The intention of every component for one slot.
pub type IntentionAssignment = TraitMapping<Intention>;

/// The action every component observed in one slot.
pub type NetworkState = TraitMapping<Action>;

impl<T: TraitValue> TraitMapping<T> {
    /// Create an empty (fully partial) mapping for a setup.
    #[must_use]
    pub fn new(setup: &NetworkSetup) -> Self {
        Self {
            entries: (0..setup.component_count()).map(|_| None).collect(),
            assigned: 0,
        }
    }

    /// Whether some registered component still has no entry.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.assigned < self.entries.len()
    }

    /// Assign the trait for a component.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` for a handle the setup never issued,
    /// `TraitOverwrite` if the component already has an entry, and the
    /// payload validation errors of [`validate`].
    pub fn set(
        &mut self,
        setup: &NetworkSetup,
        component: ComponentId,
        value: T,
    ) -> Result<(), ContractViolation> {
        validate(setup, &value)?;
        let slot = self
            .entries
            .get_mut(component.index())
            .ok_or(ContractViolation::UnknownComponent(component))?;
        if slot.is_some() {
            return Err(ContractViolation::TraitOverwrite(component));
        }
        *slot = Some(value);
        self.assigned += 1;
        Ok(())
    }

    /// Look up the trait of a component in a total mapping.
    ///
    /// # Errors
    ///
    /// `PartialMapping` while the mapping is partial and
    /// `UnknownComponent` for foreign handles.
    pub fn get(&self, component: ComponentId) -> Result<&T, ContractViolation> {
        if self.is_partial() {
            return Err(ContractViolation::PartialMapping);
        }
        self.entries
            .get(component.index())
            .and_then(Option::as_ref)
            .ok_or(ContractViolation::UnknownComponent(component))
    }

    /// Render the mapping textually: `(trait1, trait2, …)` in
    /// registration order.
    ///
    /// # Errors
    ///
    /// `PartialMapping` while the mapping is partial.
    pub fn render(&self, setup: &NetworkSetup) -> Result<String, ContractViolation> {
        if self.is_partial() {
            return Err(ContractViolation::PartialMapping);
        }
        let mut parts = Vec::with_capacity(self.entries.len());
        for component in setup.component_ids() {
            parts.push(render_trait(setup, self.get(component)?)?);
        }
        Ok(format!("({})", parts.join(", ")))
    }

    /// Render the mapping as XML `<entry>` lines in registration order.
    ///
    /// # Errors
    ///
    /// `PartialMapping` while the mapping is partial.
    pub fn to_xml(&self, setup: &NetworkSetup) -> Result<Vec<String>, ContractViolation> {
        if self.is_partial() {
            return Err(ContractViolation::PartialMapping);
        }
        let mut lines = Vec::new();
        for component in setup.component_ids() {
            lines.push("<entry>".to_string());
            lines.push(format!(
                "  <for>{}</for>",
                setup.component_name(component)?
            ));
            for line in trait_to_xml(setup, self.get(component)?)? {
                lines.push(format!("  {line}"));
            }
            lines.push("</entry>".to_string());
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcast_types::Message;

    struct Named(&'static str);

    impl Message for Named {
        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    fn two_component_setup() -> (NetworkSetup, ComponentId, ComponentId) {
        let mut setup = NetworkSetup::new(8).unwrap();
        let a = setup.register_component("a").unwrap();
        let b = setup.register_component("b").unwrap();
        (setup, a, b)
    }

    #[test]
    fn test_partial_until_total() {
        let (setup, a, b) = two_component_setup();
        let mut mapping = IntentionAssignment::new(&setup);
        assert!(mapping.is_partial());
        mapping.set(&setup, a, Intention::Idle).unwrap();
        assert!(mapping.is_partial());
        mapping.set(&setup, b, Intention::Listen).unwrap();
        assert!(!mapping.is_partial());
        assert_eq!(mapping.get(a).unwrap(), &Intention::Idle);
    }

    #[test]
    fn test_get_on_partial_fails() {
        let (setup, a, _) = two_component_setup();
        let mapping = IntentionAssignment::new(&setup);
        assert_eq!(
            mapping.get(a).err(),
            Some(ContractViolation::PartialMapping)
        );
    }

    #[test]
    fn test_overwrite_rejected() {
        let (setup, a, _) = two_component_setup();
        let mut mapping = IntentionAssignment::new(&setup);
        mapping.set(&setup, a, Intention::Idle).unwrap();
        assert_eq!(
            mapping.set(&setup, a, Intention::Listen).err(),
            Some(ContractViolation::TraitOverwrite(a))
        );
    }

    #[test]
    fn test_unknown_component_rejected() {
        let (setup, _, _) = two_component_setup();
        let ghost = ComponentId::new(7);
        let mut mapping = IntentionAssignment::new(&setup);
        assert_eq!(
            mapping.set(&setup, ghost, Intention::Idle).err(),
            Some(ContractViolation::UnknownComponent(ghost))
        );
    }

    #[test]
    fn test_render_in_registration_order() {
        let (mut setup, a, b) = two_component_setup();
        let m = setup.register_message(Box::new(Named("A")));
        let mut mapping = IntentionAssignment::new(&setup);
        mapping
            .set(
                &setup,
                b,
                Intention::Send {
                    tic: 5,
                    message: m,
                    carrier_sense: false,
                },
            )
            .unwrap();
        mapping.set(&setup, a, Intention::Idle).unwrap();
        assert_eq!(mapping.render(&setup).unwrap(), "(IDL, SEND![A, 5])");
    }

    #[test]
    fn test_xml_entries() {
        let (setup, a, b) = two_component_setup();
        let mut mapping = NetworkState::new(&setup);
        mapping.set(&setup, a, Action::Silence).unwrap();
        mapping.set(&setup, b, Action::Idle).unwrap();
        let lines = mapping.to_xml(&setup).unwrap();
        assert_eq!(
            lines,
            vec![
                "<entry>",
                "  <for>a</for>",
                "  <trait>",
                "    <type>SIL</type>",
                "  </trait>",
                "</entry>",
                "<entry>",
                "  <for>b</for>",
                "  <trait>",
                "    <type>IDL</type>",
                "  </trait>",
                "</entry>",
            ]
        );
    }
}
