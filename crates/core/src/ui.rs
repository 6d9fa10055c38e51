//! Per-session UI state.

/// Flags that last for one page lifetime and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    intro_complete: bool,
}

impl UiState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            intro_complete: false,
        }
    }

    /// Whether the intro animation has already played this session.
    #[must_use]
    pub const fn is_intro_complete(&self) -> bool {
        self.intro_complete
    }

    pub const fn set_intro_complete(&mut self, completed: bool) {
        self.intro_complete = completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_flag_defaults_false() {
        assert!(!UiState::default().is_intro_complete());
    }

    #[test]
    fn test_set_intro_complete() {
        let mut ui = UiState::new();
        ui.set_intro_complete(true);
        assert!(ui.is_intro_complete());
        ui.set_intro_complete(false);
        assert!(!ui.is_intro_complete());
    }
}
