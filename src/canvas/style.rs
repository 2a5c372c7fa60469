use crate::foundation::core::Rgba8;

/// Style attributes saved and restored by `save()` / `restore()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawingStyleState {
    /// Color used by `fill_rect`.
    pub fill_color: Rgba8,
}

impl Default for DrawingStyleState {
    fn default() -> Self {
        Self {
            fill_color: Rgba8::BLACK,
        }
    }
}

/// Non-empty stack of [`DrawingStyleState`]; the bottom entry is never popped.
#[derive(Clone, Debug)]
pub(crate) struct StyleStack {
    states: Vec<DrawingStyleState>,
}

impl StyleStack {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![DrawingStyleState::default()],
        }
    }

    pub(crate) fn top(&self) -> &DrawingStyleState {
        // `states` always holds at least the bottom entry.
        &self.states[self.states.len() - 1]
    }

    pub(crate) fn top_mut(&mut self) -> &mut DrawingStyleState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    pub(crate) fn save(&mut self) {
        let top = *self.top();
        self.states.push(top);
    }

    pub(crate) fn restore(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/style.rs"]
mod tests;
