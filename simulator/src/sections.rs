//! Section tracking for fatal error reports.

/// A stack of human-readable section names describing what the
/// simulator was doing when a contract violation surfaced.
#[derive(Debug, Clone, Default)]
pub struct SectionStack {
    sections: Vec<String>,
}

impl SectionStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a named section.
    pub fn enter(&mut self, name: impl Into<String>) {
        self.sections.push(name.into());
    }

    /// Leave the most recent section. Leaving an empty stack is a
    /// no-op; the stack is diagnostic only.
    pub fn leave(&mut self) {
        self.sections.pop();
    }

    /// The current sections, outermost first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.sections.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_leave() {
        let mut stack = SectionStack::new();
        stack.enter("outer");
        stack.enter("inner");
        assert_eq!(stack.snapshot(), vec!["outer", "inner"]);
        stack.leave();
        assert_eq!(stack.snapshot(), vec!["outer"]);
    }
}
