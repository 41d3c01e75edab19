//! Session state enums.

/// Which dispatcher handles operator keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserInputMode {
    Command,
    #[default]
    Insert,
    Passthrough,
    Auto,
    /// Terminal state, set just before teardown so the monitor reflects it.
    Quitting,
}

impl UserInputMode {
    pub fn name(&self) -> &'static str {
        match self {
            UserInputMode::Command => "COMMAND",
            UserInputMode::Insert => "INSERT",
            UserInputMode::Passthrough => "PASSTHROUGH",
            UserInputMode::Auto => "AUTO",
            UserInputMode::Quitting => "QUITTING",
        }
    }
}

/// Progress of typing one script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStatus {
    #[default]
    Empty,
    Inprocess,
    Loaded,
    /// The line must be restarted from its first character.
    Reload,
}

impl LineStatus {
    pub fn name(&self) -> &'static str {
        match self {
            LineStatus::Empty => "EMPTY",
            LineStatus::Inprocess => "INPROCESS",
            LineStatus::Loaded => "LOADED",
            LineStatus::Reload => "RELOAD",
        }
    }
}

/// Whether shell output reaches the real terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    All,
    None,
    /// Reserved. Currently drops output like `None`.
    Filtered,
}

impl OutputMode {
    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::All => "ALL",
            OutputMode::None => "NONE",
            OutputMode::Filtered => "FILTERED",
        }
    }
}

/// Whether auto mode waits for the operator between loaded lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoPilotMode {
    Semi,
    #[default]
    Full,
}

impl AutoPilotMode {
    pub fn name(&self) -> &'static str {
        match self {
            AutoPilotMode::Semi => "SEMI",
            AutoPilotMode::Full => "FULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        assert_eq!(UserInputMode::default(), UserInputMode::Insert);
        assert_eq!(LineStatus::default(), LineStatus::Empty);
        assert_eq!(OutputMode::default(), OutputMode::All);
        assert_eq!(AutoPilotMode::default(), AutoPilotMode::Full);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(UserInputMode::Quitting.name(), "QUITTING");
        assert_eq!(LineStatus::Inprocess.name(), "INPROCESS");
        assert_eq!(OutputMode::Filtered.name(), "FILTERED");
        assert_eq!(AutoPilotMode::Semi.name(), "SEMI");
    }
}
