//! Plain-text output on standard out.

use std::io::{self, Write};

use slotcast_engine::{ContractViolation, IntentionAssignment, NetworkSetup, NetworkState};
use slotcast_types::{SlotNumber, Topology};

use crate::component::Component;
use crate::output::OutputModule;

/// Commentary-style plain-text reporting, one block per slot.
///
/// Write failures on the sink are ignored; the primary output is
/// best-effort diagnostics, not a data channel.
pub struct TextOutput<W: Write> {
    out: W,
}

impl TextOutput<io::Stdout> {
    /// A module writing to standard out.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextOutput<W> {
    /// A module writing to an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutputModule for TextOutput<W> {
    fn simulation_begin(
        &mut self,
        num_slots: usize,
        setup: &NetworkSetup,
        components: &[Box<dyn Component>],
        _topology: &dyn Topology,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(
            self.out,
            "# Starting simulation with {} slots `a {} tics.",
            num_slots,
            setup.tics_per_slot()
        );
        let _ = writeln!(
            self.out,
            "# The following components will be used in the following order:"
        );
        for component in components {
            let _ = writeln!(self.out, "#  - {}", component.id());
        }
        let _ = writeln!(self.out);
        Ok(())
    }

    fn slot_begin(&mut self, slot: SlotNumber) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "# Beginning simulation of slot {slot}.");
        Ok(())
    }

    fn intent_chosen(
        &mut self,
        setup: &NetworkSetup,
        intent: &IntentionAssignment,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "# Protocol executed. Chosen intentions:");
        let rendered = intent.render(setup)?;
        let _ = writeln!(self.out, "{rendered}");
        Ok(())
    }

    fn transition_computed(
        &mut self,
        _setup: &NetworkSetup,
        outcomes: &[NetworkState],
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(
            self.out,
            "# ANL returned {} possible successor states.",
            outcomes.len()
        );
        Ok(())
    }

    fn result_chosen(
        &mut self,
        setup: &NetworkSetup,
        state: &NetworkState,
    ) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out, "# Result chosen from possible results.");
        let rendered = state.render(setup)?;
        let _ = writeln!(self.out, "{rendered}");
        Ok(())
    }

    fn slot_end(&mut self) -> Result<(), ContractViolation> {
        let _ = writeln!(self.out);
        Ok(())
    }

    fn simulation_end(&mut self) -> Result<(), ContractViolation> {
        Ok(())
    }
}
