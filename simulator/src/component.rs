//! The component protocol interface.

use slotcast_engine::ContractViolation;

use crate::view::SlotView;

/// A participant in the network.
///
/// The simulator invokes [`Component::act`] once per slot, in
/// registration order, handing the component a view centered on itself.
/// The callback must invoke exactly one intention setter on the view
/// before returning.
pub trait Component {
    /// The string id of the component. Must be unique within one
    /// simulation; it names the component in both output formats.
    fn id(&self) -> String;

    /// The protocol callback: choose this slot's intention through the
    /// view.
    ///
    /// # Errors
    ///
    /// Propagates view violations (double intention, bad tic,
    /// unregistered message).
    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation>;

    /// Structured representation: one XML line per element, nested under
    /// the `<component>` element of the structured output.
    fn to_xml(&self) -> Vec<String> {
        Vec::new()
    }
}
