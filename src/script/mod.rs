//! Script handling: reading script files and resolving them into the
//! command list the session engine walks.

mod commands;
mod lines;

pub use commands::{
    is_known_command, resolve_commands, Command, Commands, CMD_EXIT, CMD_INCLUDE, CMD_NOTE,
    CMD_OUTPUT, CMD_PASTE, CMD_PASTE_KEY, CMD_PASTE_KEYS, CMD_PASTE_LINE, CMD_PAUSE, CMD_RESUME,
    CMD_RUN, CMD_SET_MODE, CMD_SKIP, CMD_TYPE, CMD_TYPE_KEY, CMD_TYPE_KEYS, CMD_TYPE_LINE,
    CMD_WAIT_FOR_AND_SEND_ENTER, CMD_WAIT_FOR_ANY_KEY, CMD_WAIT_FOR_ENTER,
};
pub use lines::read_lines;
