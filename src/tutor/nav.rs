//! Cursor over a generated step sequence. Owned state, passed around
//! explicitly; installing a new sequence discards the old one.

use crate::tutor::Step;

#[derive(Debug, Clone, PartialEq)]
pub struct StepSession {
    steps: Vec<Step>,
    cursor: usize,
}

impl StepSession {
    /// Cursor starts at 0 for every freshly generated sequence.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    /// No-op at the last step.
    pub fn advance(&mut self) -> usize {
        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
        }
        self.cursor
    }

    /// No-op at the first step.
    pub fn retreat(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    /// Clamps into `[0, len - 1]`; negative indices clamp to 0.
    pub fn jump(&mut self, index: i64) -> usize {
        let max = self.steps.len().saturating_sub(1);
        if index <= 0 {
            self.cursor = 0;
        } else {
            self.cursor = (index as usize).min(max);
        }
        self.cursor
    }
}
