//! Shell process spawning under a pty.

use std::os::fd::RawFd;

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use tracing::debug;

use crate::error::{Error, Result};

/// Live pty resources: the master side and the shell process running on
/// the slave side.
pub struct ShellPty {
    pub master: Box<dyn MasterPty + Send>,
    pub child: Box<dyn Child + Send + Sync>,
    pub master_fd: RawFd,
}

/// Open a pty at the given size and launch `shell` on its slave side.
///
/// The pty layer starts the child in a fresh session with the slave as its
/// controlling terminal on fds 0, 1 and 2.
pub fn spawn_shell(shell: &str, shell_args: &[String], rows: u16, cols: u16) -> Result<ShellPty> {
    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| Error::Runtime(format!("there was a problem opening pty: {e}")))?;

    debug!(shell, rows, cols, "opened pseudoterminal");

    let mut cmd = CommandBuilder::new(shell);
    cmd.args(shell_args);
    let child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| Error::Runtime(format!("could not launch shell {shell}: {e}")))?;

    // The slave belongs to the child now.
    drop(pair.slave);

    let master_fd = pair
        .master
        .as_raw_fd()
        .ok_or_else(|| Error::Runtime("pty master has no file descriptor".into()))?;

    debug!(master_fd, pid = ?child.process_id(), "launched shell under pty");

    Ok(ShellPty {
        master: pair.master,
        child,
        master_fd,
    })
}
