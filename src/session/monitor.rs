//! Monitor view: a color-coded mirror of the session state, written to a
//! file an observer tails in another terminal.

use crate::script::{Command, CMD_NOTE};

use super::state::UserInputMode;

/// Lines of lookback shown above the current command.
pub const NUM_PRE_LINES: usize = 10;
/// Total command lines shown per refresh.
pub const NUM_TOTAL_LINES: usize = 30;

const CLEAR_SCREEN: &str = "\x1b[3J\x1b[H\x1b[2J";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLACK: &str = "\x1b[30m";
const FG_GREEN: &str = "\x1b[32m";
const FG_CYAN: &str = "\x1b[36m";
const FG_WHITE: &str = "\x1b[37m";

const BG_RED: &str = "\x1b[41m";
const BG_BRIGHT_GREEN: &str = "\x1b[102m";
const BG_BRIGHT_YELLOW: &str = "\x1b[103m";
const BG_BRIGHT_BLUE: &str = "\x1b[104m";

fn status_colors(mode: UserInputMode) -> String {
    match mode {
        UserInputMode::Quitting => format!("{BG_RED}{FG_WHITE}"),
        UserInputMode::Insert => format!("{BG_BRIGHT_GREEN}{FG_BLACK}"),
        UserInputMode::Command => format!("{BG_BRIGHT_YELLOW}{FG_BLACK}"),
        UserInputMode::Passthrough => format!("{BG_BRIGHT_BLUE}{FG_WHITE}"),
        UserInputMode::Auto => RESET.to_string(),
    }
}

/// First command index of the monitor window.
fn window_start(total: usize, current: usize) -> usize {
    if NUM_PRE_LINES + NUM_TOTAL_LINES > total {
        // The whole list fits, always show it from the top.
        0
    } else if total - current < NUM_TOTAL_LINES - NUM_PRE_LINES {
        total - NUM_TOTAL_LINES
    } else {
        current.saturating_sub(NUM_PRE_LINES)
    }
}

/// Render one full monitor refresh.
pub fn render(mode: UserInputMode, commands: &[Command], current: usize) -> String {
    let mut out = String::new();
    out.push_str(CLEAR_SCREEN);

    out.push_str(&status_colors(mode));
    out.push_str("Input mode: ");
    out.push_str(BOLD);
    out.push_str(mode.name());
    out.push_str(RESET);
    out.push_str("\n\n");

    let total = commands.len();
    let num_digits = total.to_string().len();
    let start = window_start(total, current);

    for (index, cmd) in commands
        .iter()
        .enumerate()
        .skip(start)
        .take(NUM_TOTAL_LINES)
    {
        let marker = if index == current { " --> " } else { "     " };
        let arg_colors = if cmd.name == CMD_NOTE {
            format!("{BOLD}{FG_CYAN}")
        } else {
            BOLD.to_string()
        };
        out.push_str(&format!(
            "{marker}{num:>width$}: {FG_GREEN}{name}{RESET} {arg_colors}{arg}{RESET}\n",
            num = index + 1,
            width = num_digits,
            name = cmd.name,
            arg = cmd.arg,
        ));
    }

    out.push_str(&format!("\nTotal lines: {total}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str, arg: &str) -> Command {
        Command {
            name: name.to_string(),
            arg: arg.to_string(),
        }
    }

    fn numbered_commands(count: usize) -> Vec<Command> {
        (1..=count)
            .map(|i| cmd("paste_line", &format!("echo {i}")))
            .collect()
    }

    #[test]
    fn test_render_status_line() {
        let view = render(UserInputMode::Insert, &[], 0);
        assert!(view.starts_with(CLEAR_SCREEN));
        assert!(view.contains("Input mode: \x1b[1mINSERT"));
        assert!(view.contains(BG_BRIGHT_GREEN));
    }

    #[test]
    fn test_render_quitting_is_red() {
        let view = render(UserInputMode::Quitting, &[], 0);
        assert!(view.contains(BG_RED));
        assert!(view.contains("QUITTING"));
    }

    #[test]
    fn test_render_marks_current_command() {
        let commands = vec![cmd("note", "A"), cmd("exit", "")];
        let view = render(UserInputMode::Insert, &commands, 1);
        assert!(view.contains("     1: "));
        assert!(view.contains(" --> 2: "));
    }

    #[test]
    fn test_render_note_arg_is_cyan() {
        let commands = vec![cmd("note", "watch this")];
        let view = render(UserInputMode::Insert, &commands, 0);
        assert!(view.contains(&format!("{BOLD}{FG_CYAN}watch this")));
    }

    #[test]
    fn test_render_footer() {
        let view = render(UserInputMode::Insert, &numbered_commands(3), 0);
        assert!(view.ends_with("\nTotal lines: 3\n"));
    }

    #[test]
    fn test_render_empty_list() {
        let view = render(UserInputMode::Insert, &[], 0);
        assert!(view.contains("Total lines: 0"));
    }

    #[test]
    fn test_window_small_list_shows_everything() {
        assert_eq!(window_start(5, 4), 0);
        assert_eq!(window_start(39, 38), 0);
    }

    #[test]
    fn test_window_centers_on_current() {
        assert_eq!(window_start(100, 50), 40);
    }

    #[test]
    fn test_window_clamps_near_start() {
        assert_eq!(window_start(100, 3), 0);
    }

    #[test]
    fn test_window_clamps_near_end() {
        assert_eq!(window_start(100, 95), 70);
        // Cursor one past the last command (script exhausted).
        assert_eq!(window_start(100, 100), 70);
    }

    #[test]
    fn test_render_window_contents_near_end() {
        let commands = numbered_commands(100);
        let view = render(UserInputMode::Insert, &commands, 95);
        assert!(!view.contains("echo 70"));
        assert!(view.contains("echo 71"));
        assert!(view.contains("echo 100"));
        assert!(view.contains(" -->  96: "));
    }

    #[test]
    fn test_render_line_numbers_are_width_aligned() {
        let commands = numbered_commands(100);
        let view = render(UserInputMode::Insert, &commands, 95);
        // Three digits total, so two-digit numbers gain a leading space.
        assert!(view.contains("      71: "));
        assert!(view.contains("     100: "));
    }
}
