//! Messages exchanged over the broadcast medium.

/// A message that can be exchanged between components.
///
/// Messages are interned at registration and immutable afterwards;
/// identity is the [`MessageId`](crate::MessageId) handle, never the
/// content. Two registered messages with identical renderings are still
/// distinct messages.
pub trait Message {
    /// Textual representation used by the plain-text output.
    fn render(&self) -> String;

    /// Structured representation: one XML line per element, nested under
    /// the `<msg>` element of a trait rendering.
    fn to_xml(&self) -> Vec<String> {
        Vec::new()
    }
}
