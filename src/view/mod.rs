use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Workspace,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Landing => f.write_str("landing"),
            Screen::Workspace => f.write_str("workspace"),
        }
    }
}

/// Two-screen navigation. Both transitions are total; applying one from the
/// wrong screen leaves the state unchanged and returns `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    screen: Screen,
}

impl ViewState {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn enter(&mut self) -> bool {
        self.go(Screen::Landing, Screen::Workspace)
    }

    pub fn exit(&mut self) -> bool {
        self.go(Screen::Workspace, Screen::Landing)
    }

    fn go(&mut self, from: Screen, to: Screen) -> bool {
        if self.screen != from {
            return false;
        }
        tracing::debug!(%from, %to, "screen transition");
        self.screen = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing() {
        assert_eq!(ViewState::default().screen(), Screen::Landing);
    }

    #[test]
    fn enter_then_exit_cycles() {
        let mut v = ViewState::default();
        assert!(v.enter());
        assert_eq!(v.screen(), Screen::Workspace);
        assert!(v.exit());
        assert_eq!(v.screen(), Screen::Landing);
        assert!(v.enter());
        assert_eq!(v.screen(), Screen::Workspace);
    }

    #[test]
    fn repeated_transitions_are_idempotent() {
        let mut v = ViewState::default();
        assert!(!v.exit());
        assert_eq!(v.screen(), Screen::Landing);

        v.enter();
        assert!(!v.enter());
        assert_eq!(v.screen(), Screen::Workspace);

        v.exit();
        assert!(!v.exit());
        assert_eq!(v.screen(), Screen::Landing);
    }
}
