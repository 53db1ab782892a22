//! Structured output on standard out.
//!
//! The schema is fixed and consumed by downstream tooling; indentation
//! and element order are part of the format.

use std::io::{self, Write};

use slotcast_engine::{ContractViolation, IntentionAssignment, NetworkSetup, NetworkState};
use slotcast_types::{SlotNumber, Topology};

use crate::component::Component;
use crate::output::OutputModule;

/// XML reporting of the whole simulation execution.
pub struct XmlOutput<W: Write> {
    out: W,
}

impl XmlOutput<io::Stdout> {
    /// A module writing to standard out.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> XmlOutput<W> {
    /// A module writing to an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit_lines(&mut self, indent: &str, lines: &[String]) {
        for line in lines {
            let _ = writeln!(self.out, "{indent}{line}");
        }
    }
}

impl<W: Write> OutputModule for XmlOutput<W> {
    fn simulation_begin(
        &mut self,
        num_slots: usize,
        setup: &NetworkSetup,
        components: &[Box<dyn Component>],
        topology: &dyn Topology,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "<?xml version=\"1.0\" encoding=\"ascii\"?>");
        let _ = writeln!(self.out, "<simulation>");
        let _ = writeln!(self.out, "  <slotcount>{num_slots}</slotcount>");
        let _ = writeln!(
            self.out,
            "  <ticsperslot>{}</ticsperslot>",
            setup.tics_per_slot()
        );

        let _ = writeln!(self.out, "  <components>");
        for component in components {
            let _ = writeln!(self.out, "    <component id=\"{}\">", component.id());
            self.emit_lines("        ", &component.to_xml());
            let _ = writeln!(self.out, "    </component>");
        }
        let _ = writeln!(self.out, "  </components>");

        let _ = writeln!(self.out, "  <topology>");
        for sender in setup.component_ids() {
            for receiver in setup.component_ids() {
                if topology.can_reach(sender, receiver) {
                    let _ = writeln!(self.out, "    <edge>");
                    let _ = writeln!(
                        self.out,
                        "      <from>{}</from>",
                        setup.component_name(sender)?
                    );
                    let _ = writeln!(
                        self.out,
                        "      <to>{}</to>",
                        setup.component_name(receiver)?
                    );
                    let _ = writeln!(self.out, "    </edge>");
                }
            }
        }
        let _ = writeln!(self.out, "  </topology>");
        let _ = writeln!(self.out, "  <execution>");
        Ok(())
    }

    fn slot_begin(&mut self, slot: SlotNumber) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "    <slot num=\"{slot}\">");
        Ok(())
    }

    fn intent_chosen(
        &mut self,
        setup: &NetworkSetup,
        intent: &IntentionAssignment,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "      <intention>");
        let lines = intent.to_xml(setup)?;
        self.emit_lines("        ", &lines);
        let _ = writeln!(self.out, "      </intention>");
        Ok(())
    }

    fn transition_computed(
        &mut self,
        setup: &NetworkSetup,
        outcomes: &[NetworkState],
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "      <choices>");
        for state in outcomes {
            let _ = writeln!(self.out, "        <choice>");
            let lines = state.to_xml(setup)?;
            self.emit_lines("          ", &lines);
            let _ = writeln!(self.out, "        </choice>");
        }
        let _ = writeln!(self.out, "      </choices>");
        Ok(())
    }

    fn result_chosen(
        &mut self,
        setup: &NetworkSetup,
        state: &NetworkState,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "      <result>");
        let lines = state.to_xml(setup)?;
        self.emit_lines("        ", &lines);
        let _ = writeln!(self.out, "      </result>");
        Ok(())
    }

    fn slot_end(&mut self) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "    </slot>");
        Ok(())
    }

    fn simulation_end(&mut self) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "  </execution>");
        let _ = writeln!(self.out, "</simulation>");
        Ok(())
    }
}
