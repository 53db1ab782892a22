//! Interned alarm-protocol messages.
//!
//! Every message of the protocol is a `(kind, from, to, data)` tuple.
//! The book registers one message per tuple upfront and resolves both
//! directions: tuple to handle for senders, handle to envelope for
//! receivers inspecting what they got.

use std::collections::BTreeMap;

use slotcast_simulator::Simulator;
use slotcast_types::{ComponentId, Message, MessageId};

/// The two message kinds of the alarm protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageKind {
    /// An alarm travelling towards the central unit.
    Alarm,
    /// An acknowledgement for the previous slot's alarm.
    Ack,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Alarm => "ALARM",
            MessageKind::Ack => "ACK",
        }
    }
}

/// The decoded content of an alarm-protocol message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmEnvelope {
    /// Alarm or acknowledgement.
    pub kind: MessageKind,
    /// The component the message originates from.
    pub from: ComponentId,
    /// The component the message is directed to.
    pub to: ComponentId,
    /// The component carried as payload (the alarm's origin).
    pub data: ComponentId,
}

struct AlarmMessage {
    kind: MessageKind,
    from: String,
    to: String,
    data: String,
}

impl Message for AlarmMessage {
    fn render(&self) -> String {
        format!(
            "{}[{}>{}: {}]",
            self.kind.label(),
            self.from,
            self.to,
            self.data
        )
    }

    fn to_xml(&self) -> Vec<String> {
        vec![
            format!("<type>{}</type>", self.kind.label()),
            format!("<from>{}</from>", self.from),
            format!("<to>{}</to>", self.to),
            format!("<data>{}</data>", self.data),
        ]
    }
}

/// The interning table of the alarm protocol's messages.
pub struct AlarmBook {
    names: Vec<String>,
    by_tuple: BTreeMap<(MessageKind, ComponentId, ComponentId, ComponentId), MessageId>,
    by_id: BTreeMap<MessageId, AlarmEnvelope>,
}

impl AlarmBook {
    /// Register one message per `(kind, from, to, data)` tuple over the
    /// components named in `names` (canonical registration order).
    pub fn register_all(sim: &mut Simulator, names: &[String]) -> Self {
        let mut by_tuple = BTreeMap::new();
        let mut by_id = BTreeMap::new();
        let ids: Vec<ComponentId> = (0..names.len()).map(ComponentId::new).collect();

        for &from in &ids {
            for &to in &ids {
                for &data in &ids {
                    for kind in [MessageKind::Alarm, MessageKind::Ack] {
                        let message = sim.register_message(Box::new(AlarmMessage {
                            kind,
                            from: names[from.index()].clone(),
                            to: names[to.index()].clone(),
                            data: names[data.index()].clone(),
                        }));
                        by_tuple.insert((kind, from, to, data), message);
                        by_id.insert(
                            message,
                            AlarmEnvelope {
                                kind,
                                from,
                                to,
                                data,
                            },
                        );
                    }
                }
            }
        }

        Self {
            names: names.to_vec(),
            by_tuple,
            by_id,
        }
    }

    /// The handle of the message for a tuple. The book covers every
    /// tuple over the registered components.
    #[must_use]
    pub fn message(
        &self,
        kind: MessageKind,
        from: ComponentId,
        to: ComponentId,
        data: ComponentId,
    ) -> MessageId {
        *self
            .by_tuple
            .get(&(kind, from, to, data))
            .expect("message interned for every component tuple")
    }

    /// Decode a received message back into its envelope. `None` for
    /// messages not interned by this book.
    #[must_use]
    pub fn envelope(&self, message: MessageId) -> Option<&AlarmEnvelope> {
        self.by_id.get(&message)
    }

    /// The name of a component under the canonical registration order.
    #[must_use]
    pub fn name_of(&self, component: ComponentId) -> &str {
        self.names
            .get(component.index())
            .map_or("<unknown>", String::as_str)
    }
}
