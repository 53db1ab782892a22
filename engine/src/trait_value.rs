//! Trait values: per-slot intentions and observed actions.
//!
//! Both kinds are tagged values whose payload variants carry a tic and a
//! message handle. Payload-free variants structurally carry neither, so
//! the "tic 0, no message" invariant of the formal model cannot be
//! broken by construction. Equality is variant equality plus payload
//! equality (tic and message handle).

use serde::{Deserialize, Serialize};
use slotcast_types::{MessageId, Tic};

use crate::error::ContractViolation;
use crate::setup::NetworkSetup;

/// A per-slot action request by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intention {
    /// The component intends to idle.
    Idle,
    /// The component intends to listen to the medium.
    Listen,
    /// The component intends to send a message starting at a tic.
    Send {
        /// Tic the transmission starts in.
        tic: Tic,
        /// The message to transmit.
        message: MessageId,
        /// Whether carrier sensing is performed before sending.
        carrier_sense: bool,
    },
}

/// The outcome a component observes one slot after its intention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The component idled.
    Idle,
    /// The component listened and observed silence.
    Silence,
    /// The component listened and observed a collision.
    Collision,
    /// The component listened and received a message.
    Received {
        /// Tic the transmission started in.
        tic: Tic,
        /// The received message.
        message: MessageId,
    },
    /// The component transmitted a message.
    Sent {
        /// Tic the transmission started in.
        tic: Tic,
        /// The transmitted message.
        message: MessageId,
    },
    /// The component cancelled its transmission after carrier sensing
    /// detected an occupied medium.
    Cancelled {
        /// Tic the transmission would have started in.
        tic: Tic,
        /// The message that was not transmitted.
        message: MessageId,
    },
}

/// Shared shape of [`Intention`] and [`Action`]: a symbol plus an
/// optional `(tic, message)` payload. Trait mappings render and validate
/// through this seam.
pub trait TraitValue {
    /// The output symbol of this variant.
    fn symbol(&self) -> &'static str;

    /// The `(tic, message)` payload, if the variant carries one.
    fn payload(&self) -> Option<(Tic, MessageId)>;
}

impl TraitValue for Intention {
    fn symbol(&self) -> &'static str {
        match self {
            Intention::Idle => "IDL",
            Intention::Listen => "LST",
            Intention::Send {
                carrier_sense: true,
                ..
            } => "SEND",
            Intention::Send {
                carrier_sense: false,
                ..
            } => "SEND!",
        }
    }

    fn payload(&self) -> Option<(Tic, MessageId)> {
        match self {
            Intention::Idle | Intention::Listen => None,
            Intention::Send { tic, message, .. } => Some((*tic, *message)),
        }
    }
}

impl TraitValue for Action {
    fn symbol(&self) -> &'static str {
        match self {
            Action::Idle => "IDL",
            Action::Silence => "SIL",
            Action::Collision => "COL",
            Action::Received { .. } => "RCVD",
            Action::Sent { .. } => "SENT",
            Action::Cancelled { .. } => "CCLD",
        }
    }

    fn payload(&self) -> Option<(Tic, MessageId)> {
        match self {
            Action::Idle | Action::Silence | Action::Collision => None,
            Action::Received { tic, message }
            | Action::Sent { tic, message }
            | Action::Cancelled { tic, message } => Some((*tic, *message)),
        }
    }
}

/// Validate a trait value against a setup: payload tics must lie inside
/// the slot and payload messages must be registered.
pub(crate) fn validate<T: TraitValue>(
    setup: &NetworkSetup,
    value: &T,
) -> Result<(), ContractViolation> {
    let Some((tic, message)) = value.payload() else {
        return Ok(());
    };
    if tic >= setup.tics_per_slot() {
        return Err(ContractViolation::TicOutOfRange {
            tic,
            tics_per_slot: setup.tics_per_slot(),
        });
    }
    if !setup.is_message(message) {
        return Err(ContractViolation::UnknownMessage(message));
    }
    Ok(())
}

/// Render a trait value textually: `SYM` or `SYM[message-text, tic]`.
///
/// # Errors
///
/// `UnknownMessage` if the payload message is not registered.
pub fn render_trait<T: TraitValue>(
    setup: &NetworkSetup,
    value: &T,
) -> Result<String, ContractViolation> {
    match value.payload() {
        None => Ok(value.symbol().to_string()),
        Some((tic, message)) => {
            let text = setup.message(message)?.render();
            Ok(format!("{}[{}, {}]", value.symbol(), text, tic))
        }
    }
}

/// Render a trait value as XML lines.
///
/// # Errors
///
/// `UnknownMessage` if the payload message is not registered.
pub fn trait_to_xml<T: TraitValue>(
    setup: &NetworkSetup,
    value: &T,
) -> Result<Vec<String>, ContractViolation> {
    let mut lines = Vec::new();
    lines.push("<trait>".to_string());
    lines.push(format!("  <type>{}</type>", value.symbol()));
    if let Some((tic, message)) = value.payload() {
        lines.push("  <msg>".to_string());
        for line in setup.message(message)?.to_xml() {
            lines.push(format!("    {line}"));
        }
        lines.push("  </msg>".to_string());
        lines.push(format!("  <tic>{tic}</tic>"));
    }
    lines.push("</trait>".to_string());
    Ok(lines)
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

        fn to_xml(&self) -> Vec<String> {
            vec![format!("<name>{}</name>", self.0)]
        }
    }

    fn setup_with_message() -> (NetworkSetup, MessageId) {
        let mut setup = NetworkSetup::new(10).unwrap();
        let m = setup.register_message(Box::new(Named("A")));
        (setup, m)
    }

    #[test]
    fn test_symbols() {
        let (_, m) = setup_with_message();
        assert_eq!(Intention::Idle.symbol(), "IDL");
        assert_eq!(Intention::Listen.symbol(), "LST");
        let cs = Intention::Send {
            tic: 1,
            message: m,
            carrier_sense: true,
        };
        let forced = Intention::Send {
            tic: 1,
            message: m,
            carrier_sense: false,
        };
        assert_eq!(cs.symbol(), "SEND");
        assert_eq!(forced.symbol(), "SEND!");
        assert_eq!(Action::Silence.symbol(), "SIL");
        assert_eq!(Action::Collision.symbol(), "COL");
        assert_eq!(Action::Cancelled { tic: 0, message: m }.symbol(), "CCLD");
    }

    #[test]
    fn test_render_with_payload() {
        let (setup, m) = setup_with_message();
        let action = Action::Received { tic: 5, message: m };
        assert_eq!(render_trait(&setup, &action).unwrap(), "RCVD[A, 5]");
        assert_eq!(render_trait(&setup, &Action::Idle).unwrap(), "IDL");
    }

    #[test]
    fn test_xml_rendering() {
        let (setup, m) = setup_with_message();
        let action = Action::Sent { tic: 2, message: m };
        let lines = trait_to_xml(&setup, &action).unwrap();
        assert_eq!(
            lines,
            vec![
                "<trait>",
                "  <type>SENT</type>",
                "  <msg>",
                "    <name>A</name>",
                "  </msg>",
                "  <tic>2</tic>",
                "</trait>",
            ]
        );
        assert_eq!(
            trait_to_xml(&setup, &Action::Silence).unwrap(),
            vec!["<trait>", "  <type>SIL</type>", "</trait>"]
        );
    }

    #[test]
    fn test_validate_tic_range() {
        let (setup, m) = setup_with_message();
        let bad = Intention::Send {
            tic: 10,
            message: m,
            carrier_sense: true,
        };
        assert_eq!(
            validate(&setup, &bad).err(),
            Some(ContractViolation::TicOutOfRange {
                tic: 10,
                tics_per_slot: 10
            })
        );
    }

    #[test]
    fn test_validate_unknown_message() {
        let (setup, _) = setup_with_message();
        let ghost = MessageId::new(5);
        let bad = Action::Sent {
            tic: 0,
            message: ghost,
        };
        assert_eq!(
            validate(&setup, &bad).err(),
            Some(ContractViolation::UnknownMessage(ghost))
        );
    }

    #[test]
    fn test_equality_is_variant_and_payload() {
        let (_, m) = setup_with_message();
        assert_eq!(
            Action::Received { tic: 1, message: m },
            Action::Received { tic: 1, message: m }
        );
        assert_ne!(
            Action::Received { tic: 1, message: m },
            Action::Received { tic: 2, message: m }
        );
        assert_ne!(
            Action::Received { tic: 1, message: m },
            Action::Sent { tic: 1, message: m }
        );
    }
}
