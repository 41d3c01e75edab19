//! Script command interpreter: textual lines into a resolved command list.

use crate::error::{Error, Result};

use super::lines::read_lines;

pub const CMD_NOTE: &str = "note";
pub const CMD_SKIP: &str = "skip";
pub const CMD_RESUME: &str = "resume";
pub const CMD_SET_MODE: &str = "set_mode";
pub const CMD_PAUSE: &str = "pause";
pub const CMD_OUTPUT: &str = "output";
pub const CMD_EXIT: &str = "exit";
pub const CMD_RUN: &str = "run";
pub const CMD_WAIT_FOR_ANY_KEY: &str = "wait_for_any_key";
pub const CMD_WAIT_FOR_ENTER: &str = "wait_for_enter";
pub const CMD_WAIT_FOR_AND_SEND_ENTER: &str = "wait_for_and_send_enter";
pub const CMD_PASTE: &str = "paste";
pub const CMD_PASTE_LINE: &str = "paste_line";
pub const CMD_PASTE_KEYS: &str = "paste_keys";
pub const CMD_PASTE_KEY: &str = "paste_key";
pub const CMD_TYPE_KEYS: &str = "type_keys";
pub const CMD_TYPE_KEY: &str = "type_key";
pub const CMD_TYPE_LINE: &str = "type_line";
pub const CMD_TYPE: &str = "type";
pub const CMD_INCLUDE: &str = "include";

const KNOWN_COMMANDS: &[&str] = &[
    CMD_NOTE,
    CMD_SKIP,
    CMD_RESUME,
    CMD_SET_MODE,
    CMD_PAUSE,
    CMD_OUTPUT,
    CMD_EXIT,
    CMD_RUN,
    CMD_WAIT_FOR_ANY_KEY,
    CMD_WAIT_FOR_ENTER,
    CMD_WAIT_FOR_AND_SEND_ENTER,
    CMD_PASTE,
    CMD_PASTE_LINE,
    CMD_PASTE_KEYS,
    CMD_PASTE_KEY,
    CMD_TYPE_KEYS,
    CMD_TYPE_KEY,
    CMD_TYPE_LINE,
    CMD_TYPE,
    CMD_INCLUDE,
];

/// One resolved script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arg: String,
}

pub type Commands = Vec<Command>;

pub fn is_known_command(name: &str) -> bool {
    KNOWN_COMMANDS.contains(&name)
}

/// Resolve script lines into a command list.
///
/// Empty lines and `#` comments are skipped. Each remaining line splits at
/// its first space into a command name and a free-form argument. `include`
/// lines are spliced in place by resolving the named file depth-first.
pub fn resolve_commands(lines: &[String]) -> Result<Commands> {
    let mut commands = Commands::new();
    for line in lines {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, arg) = match line.find(' ') {
            Some(pos) => (&line[..pos], &line[pos + 1..]),
            None => (line.as_str(), ""),
        };
        if !is_known_command(name) {
            return Err(Error::UnknownCommand(name.to_string()));
        }
        if name == CMD_INCLUDE {
            commands.extend(resolve_commands(&read_lines(arg)?)?);
        } else {
            commands.push(Command {
                name: name.to_string(),
                arg: arg.to_string(),
            });
        }
    }
    Ok(commands)
}
