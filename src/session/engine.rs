//! The session engine.
//!
//! Owns the pty, the child shell, the mode state and the script cursor,
//! and drives the shell through the command list while arbitrating between
//! scripted input and the operator's live keystrokes.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, BorrowedFd, RawFd};
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};
use std::thread;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size as terminal_size};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use portable_pty::{Child, MasterPty, PtySize};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::keys::keymap::Keymap;
use crate::keys::modes::{auto, command, insert, passthrough};
use crate::keys::{self, codes};
use crate::script::{
    Command, Commands, CMD_EXIT, CMD_NOTE, CMD_OUTPUT, CMD_PASTE, CMD_PASTE_KEY, CMD_PASTE_KEYS,
    CMD_PASTE_LINE, CMD_PAUSE, CMD_RESUME, CMD_RUN, CMD_SET_MODE, CMD_SKIP, CMD_TYPE, CMD_TYPE_KEY,
    CMD_TYPE_KEYS, CMD_TYPE_LINE, CMD_WAIT_FOR_AND_SEND_ENTER, CMD_WAIT_FOR_ANY_KEY,
    CMD_WAIT_FOR_ENTER,
};

use super::io::{normalize_newlines, read_from_fd, write_to_fd};
use super::monitor;
use super::signals;
use super::spawn::spawn_shell;
use super::state::{AutoPilotMode, LineStatus, OutputMode, UserInputMode};

const RUN_STDOUT_FILE: &str = ".gupty-run.out";
const RUN_STDERR_FILE: &str = ".gupty-run.err";

/// Scripted pty session.
///
/// `init` must succeed before `run`; teardown happens in `Drop` so the
/// terminal comes back even when the session unwinds.
pub struct Session {
    shell: String,
    // Reserved: accepted by the spawn path but never populated.
    shell_args: Vec<String>,

    monitor_path: Option<PathBuf>,
    monitor_file: Option<File>,

    master: Option<Box<dyn MasterPty + Send>>,
    master_fd: Option<RawFd>,
    child: Option<Box<dyn Child + Send + Sync>>,

    input_mode: UserInputMode,
    line_status: LineStatus,
    output_mode: OutputMode,
    auto_pilot_mode: AutoPilotMode,
    auto_pilot_pause: Duration,

    skipping: bool,

    line: Vec<u8>,
    pos: usize,

    command_keys: Keymap<command::Action>,
    insert_keys: Keymap<insert::Action>,
    passthrough_keys: Keymap<passthrough::Action>,
    auto_keys: Keymap<auto::Action>,

    commands: Commands,
    current: usize,

    pending_keys: VecDeque<Vec<u8>>,
}

/// Pick the shell to launch: explicit choice, else `$SHELL`, else `sh`.
fn resolve_shell(explicit: &str) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "sh".to_string())
}

impl Session {
    pub fn new() -> Self {
        Self {
            shell: resolve_shell(""),
            shell_args: Vec::new(),
            monitor_path: None,
            monitor_file: None,
            master: None,
            master_fd: None,
            child: None,
            input_mode: UserInputMode::default(),
            line_status: LineStatus::default(),
            output_mode: OutputMode::default(),
            auto_pilot_mode: AutoPilotMode::default(),
            auto_pilot_pause: Duration::from_millis(100),
            skipping: false,
            line: Vec::new(),
            pos: 0,
            command_keys: command::keys(),
            insert_keys: insert::keys(),
            passthrough_keys: passthrough::keys(),
            auto_keys: auto::keys(),
            commands: Commands::new(),
            current: 0,
            pending_keys: VecDeque::new(),
        }
    }

    pub fn set_shell(&mut self, shell: &str) {
        self.shell = resolve_shell(shell);
    }

    pub fn set_monitor(&mut self, path: &str) {
        self.monitor_path = Some(PathBuf::from(path));
    }

    /// Bring the session up: monitor file, pty, shell, raw mode, window size.
    ///
    /// Fails atomically; `Drop` tears down whatever got created.
    pub fn init(&mut self) -> Result<()> {
        if let Some(path) = &self.monitor_path {
            let file = File::create(path).map_err(|e| {
                Error::Runtime(format!("could not open monitor file {}: {e}", path.display()))
            })?;
            self.monitor_file = Some(file);
        }

        let (cols, rows) = terminal_size()
            .map_err(|e| Error::Runtime(format!("could not get current window size: {e}")))?;

        let pty = spawn_shell(&self.shell, &self.shell_args, rows, cols)?;
        self.master_fd = Some(pty.master_fd);
        self.master = Some(pty.master);
        self.child = Some(pty.child);

        enable_raw_mode().map_err(|e| {
            Error::Runtime(format!("could not set terminal settings on stdin: {e}"))
        })?;

        self.sync_window_size()?;

        Ok(())
    }

    /// Walk the resolved command list to its end, then hand the terminal to
    /// the operator for free typing until they confirm the exit.
    pub fn run(&mut self, commands: Commands) -> Result<()> {
        debug!("beginning session run");
        self.commands = commands;
        self.current = 0;

        while self.current < self.commands.len() {
            signals::check_early_exit()?;

            if self.skipping {
                if self.commands[self.current].name == CMD_RESUME {
                    let cmd = self.commands[self.current].clone();
                    self.dispatch(&cmd)?;
                }
                self.current += 1;
                continue;
            }

            self.update_monitor()?;
            let cmd = self.commands[self.current].clone();
            self.dispatch(&cmd)?;
            self.update_monitor()?;

            // A reload freezes the cursor so the same command restarts the
            // line from its first character.
            if self.line_status != LineStatus::Reload {
                self.current += 1;
            }
        }

        if self.input_mode != UserInputMode::Auto {
            self.input_mode = UserInputMode::Passthrough;
            self.cmd_wait_for_enter()?;
        }

        debug!("session run completed");
        Ok(())
    }

    fn dispatch(&mut self, cmd: &Command) -> Result<()> {
        debug!(name = cmd.name.as_str(), arg = cmd.arg.as_str(), "dispatching command");
        match cmd.name.as_str() {
            CMD_NOTE => Ok(()),
            CMD_SKIP => {
                self.skipping = true;
                Ok(())
            }
            CMD_RESUME => {
                self.skipping = false;
                Ok(())
            }
            CMD_SET_MODE => self.cmd_set_mode(&cmd.arg),
            CMD_PAUSE => self.cmd_pause(&cmd.arg),
            CMD_OUTPUT => self.cmd_output(&cmd.arg),
            CMD_EXIT => self.quit(false),
            CMD_RUN => self.cmd_run(&cmd.arg),
            CMD_WAIT_FOR_ANY_KEY => self.cmd_wait_for_any_key(),
            CMD_WAIT_FOR_ENTER => self.cmd_wait_for_enter(),
            CMD_WAIT_FOR_AND_SEND_ENTER => {
                self.cmd_wait_for_enter()?;
                self.cmd_paste_keys(codes::KEY_ENTER)
            }
            CMD_PASTE => self.send_to_pty(cmd.arg.as_bytes()),
            CMD_PASTE_LINE => {
                self.send_to_pty(cmd.arg.as_bytes())?;
                self.cmd_paste_keys(codes::KEY_ENTER)
            }
            CMD_PASTE_KEYS | CMD_PASTE_KEY => self.cmd_paste_keys(&cmd.arg),
            CMD_TYPE_KEYS | CMD_TYPE_KEY => self.cmd_type_keys(&cmd.arg),
            CMD_TYPE_LINE => self.cmd_type_line(&cmd.arg, true),
            CMD_TYPE => self.cmd_type_line(&cmd.arg, false),
            _ => {
                // Resolution already rejected unknown names; keep the
                // runtime guard anyway.
                eprintln!();
                eprintln!("Error: unknown command: {}", cmd.name);
                self.quit(false)
            }
        }
    }

    fn cmd_set_mode(&mut self, arg: &str) -> Result<()> {
        match arg {
            "insert" => self.input_mode = UserInputMode::Insert,
            "command" => self.input_mode = UserInputMode::Command,
            "passthrough" => self.input_mode = UserInputMode::Passthrough,
            "auto" => self.input_mode = UserInputMode::Auto,
            other => {
                eprintln!();
                eprintln!("Error: unknown set_mode option: {other}");
                return self.quit(false);
            }
        }
        debug!(mode = self.input_mode.name(), "input mode set");
        Ok(())
    }

    fn cmd_pause(&mut self, arg: &str) -> Result<()> {
        let millis: u64 = arg
            .parse()
            .map_err(|_| Error::Runtime(format!("invalid pause duration: {arg}")))?;
        signals::check_early_exit()?;
        thread::sleep(Duration::from_millis(millis));
        signals::check_early_exit()?;
        Ok(())
    }

    fn cmd_output(&mut self, arg: &str) -> Result<()> {
        match arg {
            "all" => self.output_mode = OutputMode::All,
            "none" => self.output_mode = OutputMode::None,
            // Reserved value, currently indistinguishable from `none`.
            "filtered" => self.output_mode = OutputMode::Filtered,
            other => {
                eprintln!();
                eprintln!("Error: unknown output option: {other}");
                return self.quit(false);
            }
        }
        debug!(mode = self.output_mode.name(), "output mode set");
        Ok(())
    }

    /// Run an auxiliary command synchronously, its output captured to the
    /// run artifact files (truncated each invocation).
    fn cmd_run(&mut self, arg: &str) -> Result<()> {
        let stdout = File::create(RUN_STDOUT_FILE)?;
        let stderr = File::create(RUN_STDERR_FILE)?;
        let status = ProcessCommand::new("sh")
            .arg("-c")
            .arg(arg)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()?;
        debug!(code = ?status.code(), "auxiliary command finished");
        Ok(())
    }

    fn cmd_wait_for_any_key(&mut self) -> Result<()> {
        self.line_status = LineStatus::Empty;
        self.line.clear();
        self.pos = 0;
        self.process_user_input(true)
    }

    fn cmd_wait_for_enter(&mut self) -> Result<()> {
        self.line.clear();
        self.pos = 0;
        self.line_status = LineStatus::Loaded;
        self.process_user_input(true)
    }

    fn cmd_paste_keys(&mut self, arg: &str) -> Result<()> {
        for key in arg.split_whitespace() {
            if let Some(code) = keys::code_for(key) {
                self.send_to_pty(code)?;
            }
            // Unknown key names are ignored.
        }
        Ok(())
    }

    fn cmd_type_keys(&mut self, arg: &str) -> Result<()> {
        for key in arg.split_whitespace() {
            let Some(code) = keys::code_for(key) else {
                continue;
            };
            self.line_status = LineStatus::Empty;
            self.line = code.to_vec();
            self.pos = 0;
            self.process_user_input(false)?;
            self.send_to_pty(code)?;
        }
        Ok(())
    }

    /// Character-by-character typing of one scripted line.
    ///
    /// The dispatcher runs before every emission so an operator backspace
    /// can rewind the cursor before the next character is committed; with
    /// `send_enter` the fully loaded line is confirmed with an Enter.
    fn cmd_type_line(&mut self, text: &str, send_enter: bool) -> Result<()> {
        self.line_status = LineStatus::Empty;
        self.line = text.as_bytes().to_vec();
        self.pos = 0;

        while self.line_status != LineStatus::Loaded {
            while self.pos < self.line.len() {
                self.process_user_input(true)?;
                if self.line_status == LineStatus::Reload {
                    break;
                }

                // The cursor may have moved; pick the chunk afterwards so a
                // multi-byte named key goes out in one write.
                let mut n = keys::match_prefix(&self.line[self.pos..]);
                if n == 0 {
                    n = 1;
                }
                self.send_to_pty(&self.line[self.pos..self.pos + n])?;
                self.pos += n;
                self.line_status = LineStatus::Inprocess;
            }
            if self.line_status == LineStatus::Reload {
                // Hand the reload to the engine loop, which re-runs this
                // command with the cursor frozen.
                debug!(status = self.line_status.name(), "line restart requested");
                break;
            }

            self.line_status = LineStatus::Loaded;

            // One more chance for the operator to backspace into the
            // finished line before it is confirmed.
            self.process_user_input(true)?;
            if send_enter && self.line_status == LineStatus::Loaded {
                self.send_to_pty(codes::CODE_ENTER)?;
            }
        }
        Ok(())
    }

    /// Read operator input and apply the current mode's actions.
    ///
    /// Returns when the calling state machine should take its next step;
    /// mode switches restart the dispatcher under the new mode first.
    fn process_user_input(&mut self, permit_backspace: bool) -> Result<()> {
        let mut cont = true;
        'modes: while cont {
            // By default, we loop once.
            cont = false;

            match self.input_mode {
                UserInputMode::Command => loop {
                    let key = self.get_key_from_stdin()?;
                    match self.command_keys.get(&key) {
                        command::Action::SigInt => return self.raise_signal(Signal::SIGINT),
                        command::Action::SigQuit => return self.raise_signal(Signal::SIGQUIT),
                        command::Action::Quit => return self.quit(true),
                        command::Action::ResizeWindow => self.sync_window_size()?,
                        command::Action::SwitchToInsertMode => {
                            self.input_mode = UserInputMode::Insert;
                            cont = true;
                            break;
                        }
                        command::Action::SwitchToPassthroughMode => {
                            self.input_mode = UserInputMode::Passthrough;
                            cont = true;
                            break;
                        }
                        command::Action::SwitchToAutoMode => {
                            self.input_mode = UserInputMode::Auto;
                            cont = true;
                            break;
                        }
                        command::Action::TurnOffStdout => self.output_mode = OutputMode::None,
                        command::Action::TurnOnStdout => self.output_mode = OutputMode::All,
                        command::Action::ToggleStdout => {
                            self.output_mode = match self.output_mode {
                                OutputMode::None => OutputMode::All,
                                OutputMode::All => OutputMode::None,
                                other => other,
                            };
                        }
                        command::Action::NextLine | command::Action::PrevLine => {
                            // Reserved, not implemented.
                        }
                        command::Action::Return => break,
                        // Unrecognized keys are ignored.
                        command::Action::None => {}
                    }
                },

                UserInputMode::Insert => loop {
                    let key = self.get_key_from_stdin()?;
                    let action = self.insert_keys.get(&key);
                    let permit_backspace = permit_backspace && !self.line.is_empty();

                    match action {
                        insert::Action::SigInt => return self.raise_signal(Signal::SIGINT),
                        insert::Action::SigQuit => return self.raise_signal(Signal::SIGQUIT),
                        insert::Action::BackOneCharacter => {
                            if !permit_backspace {
                                // Still emitted when the scripted character
                                // at the cursor is itself a backspace.
                                if self.line.get(self.pos) == Some(&codes::CODE_BACKSPACE[0]) {
                                    break;
                                }
                                continue;
                            }
                            let initial_status = self.line_status;
                            if self.pos > 0 {
                                // Only delete once at least one character is loaded.
                                self.send_to_pty(codes::CODE_BACKSPACE)?;
                                self.pos -= 1;
                                self.line_status = LineStatus::Inprocess;
                            }
                            if self.pos == 0 {
                                self.line_status = LineStatus::Empty;
                            }
                            if initial_status != LineStatus::Loaded {
                                // Rewound mid-line: restart the input loop so
                                // the next keystroke re-emits the character.
                                cont = true;
                            }
                            break;
                        }
                        insert::Action::SwitchToCommandMode => {
                            self.input_mode = UserInputMode::Command;
                            cont = true;
                            break;
                        }
                        insert::Action::Return => break,
                        insert::Action::Disabled => continue,
                        insert::Action::None => {
                            if self.line_status == LineStatus::Loaded {
                                // A loaded line only lets go on Enter.
                                continue;
                            }
                            // Any other key hands control back to the typing
                            // loop, which emits the next scripted character.
                            break;
                        }
                    }
                },

                UserInputMode::Passthrough => loop {
                    let key = self.get_key_from_stdin()?;
                    match self.passthrough_keys.get(&key) {
                        passthrough::Action::SwitchToCommandMode => {
                            self.input_mode = UserInputMode::Command;
                            cont = true;
                            break;
                        }
                        passthrough::Action::None => self.send_to_pty(&key)?,
                    }
                },

                UserInputMode::Auto => {
                    let stdin = io::stdin();
                    let mut polls = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
                    let available = match poll(&mut polls, PollTimeout::ZERO) {
                        Ok(rc) => rc > 0,
                        Err(Errno::EINTR) => {
                            signals::check_early_exit()?;
                            false
                        }
                        Err(e) => {
                            return Err(Error::Runtime(format!(
                                "there was a problem polling stdin: {e}"
                            )))
                        }
                    };

                    // Semi-auto blocks on the operator once a line is loaded.
                    if self.auto_pilot_mode == AutoPilotMode::Semi
                        && self.line_status == LineStatus::Loaded
                    {
                        cont = true;
                    }

                    if available {
                        let key = self.get_key_from_stdin()?;
                        match self.auto_keys.get(&key) {
                            auto::Action::SigInt => return self.raise_signal(Signal::SIGINT),
                            auto::Action::SigQuit => return self.raise_signal(Signal::SIGQUIT),
                            auto::Action::SwitchToCommandMode => {
                                self.input_mode = UserInputMode::Command;
                            }
                            auto::Action::SwitchToFullAuto => {
                                self.auto_pilot_mode = AutoPilotMode::Full;
                                debug!(mode = self.auto_pilot_mode.name(), "auto pilot mode set");
                            }
                            auto::Action::SwitchToSemiAuto => {
                                self.auto_pilot_mode = AutoPilotMode::Semi;
                                debug!(mode = self.auto_pilot_mode.name(), "auto pilot mode set");
                            }
                            auto::Action::Return => break 'modes,
                            auto::Action::None => {}
                        }
                    }

                    signals::check_early_exit()?;
                    thread::sleep(self.auto_pilot_pause);
                }

                UserInputMode::Quitting => break,
            }
        }
        Ok(())
    }

    /// Block until one key is available, draining pty output on the way.
    ///
    /// Polls stdin and the pty together; pty output is forwarded to stdout
    /// as a side effect so the shell stays live while we wait. Once
    /// `pending_keys` holds anything the poll stops blocking and the head
    /// key is returned.
    fn get_key_from_stdin(&mut self) -> Result<Vec<u8>> {
        self.update_monitor()?;

        loop {
            signals::check_early_exit()?;

            let timeout = if self.pending_keys.is_empty() {
                PollTimeout::NONE
            } else {
                PollTimeout::ZERO
            };

            let Some((stdin_events, pty_events)) = self.poll_inputs(timeout)? else {
                continue;
            };

            if stdin_events.contains(PollFlags::POLLERR) {
                return Err(Error::Runtime("error encountered while polling stdin".into()));
            }
            if pty_events.contains(PollFlags::POLLERR) {
                return Err(Error::Runtime("error encountered while polling pty".into()));
            }
            if pty_events.contains(PollFlags::POLLIN) {
                self.process_pty_output()?;
            } else if pty_events.contains(PollFlags::POLLHUP) {
                return Err(Error::Runtime("pty closed by child".into()));
            }
            if stdin_events.contains(PollFlags::POLLIN) {
                self.read_from_stdin()?;
            }

            if let Some(key) = self.pending_keys.pop_front() {
                return Ok(key);
            }
        }
    }

    /// One poll over stdin and the pty master. `None` means interrupted.
    fn poll_inputs(&self, timeout: PollTimeout) -> Result<Option<(PollFlags, PollFlags)>> {
        let stdin = io::stdin();
        let pty_fd = self.pty_fd()?;
        let mut polls = [
            PollFd::new(stdin.as_fd(), PollFlags::POLLIN),
            PollFd::new(pty_fd, PollFlags::POLLIN),
        ];
        match poll(&mut polls, timeout) {
            Ok(0) => Ok(Some((PollFlags::empty(), PollFlags::empty()))),
            Ok(_) => Ok(Some((
                polls[0].revents().unwrap_or(PollFlags::empty()),
                polls[1].revents().unwrap_or(PollFlags::empty()),
            ))),
            Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(Error::Runtime(format!(
                "there was a problem polling stdin and pty: {e}"
            ))),
        }
    }

    /// Split fresh stdin bytes into keys and queue them.
    fn read_from_stdin(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let data = read_from_fd(&stdin)?;
        let mut rest = data.as_slice();
        while !rest.is_empty() {
            let mut n = keys::match_prefix(rest);
            if n == 0 {
                // Unrecognized, peel off a single byte.
                n = 1;
            }
            self.pending_keys.push_back(rest[..n].to_vec());
            rest = &rest[n..];
        }
        Ok(())
    }

    /// Forward everything the pty has buffered to stdout.
    fn process_pty_output(&self) -> Result<()> {
        loop {
            let pty_fd = self.pty_fd()?;
            let mut polls = [PollFd::new(pty_fd, PollFlags::POLLIN)];
            match poll(&mut polls, PollTimeout::ZERO) {
                Ok(0) => break,
                Ok(_) => {}
                Err(Errno::EINTR) => {
                    signals::check_early_exit()?;
                    continue;
                }
                Err(e) => {
                    return Err(Error::Runtime(format!(
                        "there was a problem polling pty fd: {e}"
                    )))
                }
            }
            let data = read_from_fd(&self.pty_fd()?)?;
            self.send_to_stdout(&data)?;
        }
        Ok(())
    }

    fn send_to_stdout(&self, bytes: &[u8]) -> Result<()> {
        match self.output_mode {
            OutputMode::All => write_to_fd(&io::stdout(), bytes),
            OutputMode::None => Ok(()),
            // Reserved: filtering is not implemented, drop for now.
            OutputMode::Filtered => Ok(()),
        }
    }

    fn send_to_pty(&self, bytes: &[u8]) -> Result<()> {
        let payload = normalize_newlines(bytes);
        write_to_fd(&self.pty_fd()?, &payload)
    }

    fn pty_fd(&self) -> Result<BorrowedFd<'_>> {
        let fd = self
            .master_fd
            .ok_or_else(|| Error::Runtime("session is not initialized".into()))?;
        // The fd stays open for as long as `master` is held.
        Ok(unsafe { BorrowedFd::borrow_raw(fd) })
    }

    /// Mirror the real terminal's window size onto the pty.
    ///
    /// The size query must succeed; the pty-side set is best effort because
    /// some platforms reject it.
    fn sync_window_size(&mut self) -> Result<()> {
        let (cols, rows) = terminal_size()
            .map_err(|e| Error::Runtime(format!("could not get current window size: {e}")))?;
        if rows == 0 || cols == 0 {
            return Err(Error::Runtime("window size has a zero dimension".into()));
        }
        debug!(rows, cols, "syncing pty window size");
        if let Some(master) = &self.master {
            if let Err(e) = master.resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            }) {
                debug!("could not set pty window size: {e}");
            }
        }
        Ok(())
    }

    fn update_monitor(&mut self) -> Result<()> {
        let Some(file) = self.monitor_file.as_mut() else {
            return Ok(());
        };
        let view = monitor::render(self.input_mode, &self.commands, self.current);
        file.write_all(view.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Forward `sig` to the whole process group, then unwind early.
    fn raise_signal(&self, sig: Signal) -> Result<()> {
        // Pid 0 addresses every process in our group, shell included.
        let _ = kill(Pid::from_raw(0), sig);
        Err(Error::EarlyExit)
    }

    fn quit(&mut self, early: bool) -> Result<()> {
        debug!(early, "quit requested");
        self.input_mode = UserInputMode::Quitting;
        self.update_monitor()?;
        if early {
            Err(Error::EarlyExit)
        } else {
            Err(Error::NormalExit)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.master.is_none() {
            // init never completed, nothing to tear down.
            return;
        }
        debug!("session teardown starting");
        self.input_mode = UserInputMode::Quitting;
        let _ = self.update_monitor();

        // Closes the master fd.
        self.master = None;
        self.master_fd = None;

        if let Err(e) = disable_raw_mode() {
            error!("could not reset terminal settings on stdin: {e}");
        }

        // No need to check for failure: if the child is already gone, good.
        if let Some(child) = &self.child {
            if let Some(pid) = child.process_id() {
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
            }
        }
        debug!("session teardown finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_shell_explicit_wins() {
        assert_eq!(resolve_shell("/bin/zsh"), "/bin/zsh");
    }

    #[test]
    fn test_resolve_shell_falls_back() {
        // Whatever the environment holds, the result is never empty.
        assert!(!resolve_shell("").is_empty());
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.input_mode, UserInputMode::Insert);
        assert_eq!(session.line_status, LineStatus::Empty);
        assert_eq!(session.output_mode, OutputMode::All);
        assert_eq!(session.auto_pilot_mode, AutoPilotMode::Full);
        assert!(!session.skipping);
        assert!(session.master.is_none());
    }
}
