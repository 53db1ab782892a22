//! A message carrying nothing but a name.

use slotcast_types::Message;

/// Demo message identified by its name alone.
#[derive(Debug, Clone)]
pub struct NamedMessage {
    name: &'static str,
}

impl NamedMessage {
    /// Create a message with the given name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Message for NamedMessage {
    fn render(&self) -> String {
        self.name.to_string()
    }

    fn to_xml(&self) -> Vec<String> {
        vec![format!("<name>{}</name>", self.name)]
    }
}
