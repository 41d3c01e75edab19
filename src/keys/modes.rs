//! Per-mode action sets and their default key bindings.
//!
//! Each input mode owns its own action enum so the dispatcher match for a
//! mode is statically exhaustive. The enums overlap in some action names
//! but are deliberately kept distinct. `Action::None` is the miss sentinel
//! the keymap hands back for unbound keys.

const CTRL_C: &[u8] = b"\x03";
const CTRL_BACKSLASH: &[u8] = b"\x1c";
const CTRL_RIGHT_BRACKET: &[u8] = b"\x1d";
const ESC: &[u8] = b"\x1b";

/// Command mode: single-letter session controls.
pub mod command {
    use crate::keys::codes;
    use crate::keys::keymap::Keymap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Action {
        None,
        SigInt,
        SigQuit,
        Quit,
        ResizeWindow,
        SwitchToInsertMode,
        SwitchToPassthroughMode,
        SwitchToAutoMode,
        TurnOffStdout,
        TurnOnStdout,
        ToggleStdout,
        NextLine,
        PrevLine,
        Return,
    }

    pub fn keys() -> Keymap<Action> {
        Keymap::new(
            Action::None,
            &[
                (super::CTRL_C, Action::SigInt),
                (super::CTRL_BACKSLASH, Action::SigQuit),
                (b"q", Action::Quit),
                (b"r", Action::ResizeWindow),
                (b"i", Action::SwitchToInsertMode),
                (b"p", Action::SwitchToPassthroughMode),
                (b"a", Action::SwitchToAutoMode),
                (b"0", Action::TurnOffStdout),
                (b"1", Action::TurnOnStdout),
                (b"o", Action::ToggleStdout),
                (codes::CODE_DOWN, Action::NextLine),
                (codes::CODE_UP, Action::PrevLine),
                (codes::CODE_ENTER, Action::Return),
            ],
        )
    }
}

/// Insert mode: operator keystrokes pace the scripted typing.
pub mod insert {
    use crate::keys::codes;
    use crate::keys::keymap::Keymap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Action {
        None,
        SigInt,
        SigQuit,
        BackOneCharacter,
        SwitchToCommandMode,
        Return,
        Disabled,
    }

    pub fn keys() -> Keymap<Action> {
        Keymap::new(
            Action::None,
            &[
                (super::CTRL_C, Action::SigInt),
                (super::CTRL_BACKSLASH, Action::SigQuit),
                (codes::CODE_BACKSPACE, Action::BackOneCharacter),
                (super::ESC, Action::SwitchToCommandMode),
                (codes::CODE_ENTER, Action::Return),
                // Stray cursor movement should not advance the scripted line.
                (codes::CODE_UP, Action::Disabled),
                (codes::CODE_DOWN, Action::Disabled),
                (codes::CODE_RIGHT, Action::Disabled),
                (codes::CODE_LEFT, Action::Disabled),
                (codes::CODE_UP_LEGACY, Action::Disabled),
                (codes::CODE_DOWN_LEGACY, Action::Disabled),
                (codes::CODE_RIGHT_LEGACY, Action::Disabled),
                (codes::CODE_LEFT_LEGACY, Action::Disabled),
            ],
        )
    }
}

/// Passthrough mode: everything except the escape hatch goes to the shell.
pub mod passthrough {
    use crate::keys::keymap::Keymap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Action {
        None,
        SwitchToCommandMode,
    }

    pub fn keys() -> Keymap<Action> {
        Keymap::new(
            Action::None,
            &[(super::CTRL_RIGHT_BRACKET, Action::SwitchToCommandMode)],
        )
    }
}

/// Auto mode: the script streams by itself, the operator can throttle it.
pub mod auto {
    use crate::keys::codes;
    use crate::keys::keymap::Keymap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Action {
        None,
        SigInt,
        SigQuit,
        SwitchToCommandMode,
        SwitchToFullAuto,
        SwitchToSemiAuto,
        Return,
    }

    pub fn keys() -> Keymap<Action> {
        Keymap::new(
            Action::None,
            &[
                (super::CTRL_C, Action::SigInt),
                (super::CTRL_BACKSLASH, Action::SigQuit),
                (super::ESC, Action::SwitchToCommandMode),
                (b"f", Action::SwitchToFullAuto),
                (b"s", Action::SwitchToSemiAuto),
                (codes::CODE_ENTER, Action::Return),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bindings() {
        let keys = command::keys();
        assert_eq!(keys.get(b"q"), command::Action::Quit);
        assert_eq!(keys.get(b"\x03"), command::Action::SigInt);
        assert_eq!(keys.get(b"\r"), command::Action::Return);
        assert_eq!(keys.get(b"z"), command::Action::None);
    }

    #[test]
    fn test_insert_bindings() {
        let keys = insert::keys();
        assert_eq!(keys.get(b"\x7f"), insert::Action::BackOneCharacter);
        assert_eq!(keys.get(b"\x1b"), insert::Action::SwitchToCommandMode);
        assert_eq!(keys.get(b"\x1bOA"), insert::Action::Disabled);
        // Ordinary keys fall through so the typing loop can emit a character.
        assert_eq!(keys.get(b"x"), insert::Action::None);
    }

    #[test]
    fn test_passthrough_bindings() {
        let keys = passthrough::keys();
        assert_eq!(keys.get(b"\x1d"), passthrough::Action::SwitchToCommandMode);
        // Everything else is forwarded raw, including Ctrl-C.
        assert_eq!(keys.get(b"\x03"), passthrough::Action::None);
    }

    #[test]
    fn test_auto_bindings() {
        let keys = auto::keys();
        assert_eq!(keys.get(b"f"), auto::Action::SwitchToFullAuto);
        assert_eq!(keys.get(b"s"), auto::Action::SwitchToSemiAuto);
        assert_eq!(keys.get(b"\r"), auto::Action::Return);
    }
}
