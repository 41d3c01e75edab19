//! Asynchronous exit signals.
//!
//! The handlers only set a flag. Blocking points poll the flag through
//! `check_early_exit` and raise the early-exit condition from ordinary
//! control flow. Handlers are installed without `SA_RESTART` so a pending
//! signal interrupts `poll` with `EINTR` instead of being sat on.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::libc::c_int;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::{Error, Result};

static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);
static SIGQUIT_RECEIVED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_: c_int) {
    SIGINT_RECEIVED.store(true, Ordering::SeqCst);
}

extern "C" fn handle_sigquit(_: c_int) {
    SIGQUIT_RECEIVED.store(true, Ordering::SeqCst);
}

fn install_handler(signal: Signal, handler: extern "C" fn(c_int)) -> Result<()> {
    let action = SigAction::new(SigHandler::Handler(handler), SaFlags::empty(), SigSet::empty());
    unsafe { sigaction(signal, &action) }
        .map_err(|e| Error::Runtime(format!("could not set up {signal} handler: {e}")))?;
    Ok(())
}

/// Install the SIGINT and SIGQUIT flag handlers.
pub fn install() -> Result<()> {
    install_handler(Signal::SIGINT, handle_sigint)?;
    install_handler(Signal::SIGQUIT, handle_sigquit)?;
    Ok(())
}

/// Raise `EarlyExit` if a quit signal arrived since the last check.
pub fn check_early_exit() -> Result<()> {
    let sigint = SIGINT_RECEIVED.swap(false, Ordering::SeqCst);
    let sigquit = SIGQUIT_RECEIVED.swap(false, Ordering::SeqCst);
    if sigint || sigquit {
        return Err(Error::EarlyExit);
    }
    Ok(())
}
