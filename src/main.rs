//! gupty - scripted pseudoterminal driver for live-looking terminal demos.

mod cli;
mod error;
mod keys;
mod script;
mod session;

use std::fs::File;
use std::panic;
use std::sync::Mutex;

use crossterm::terminal::disable_raw_mode;
use tracing::{debug, error as log_error, Level};
use tracing_subscriber::FmtSubscriber;

use cli::{parse_args, CliConfig};
use error::{Error, Result};
use script::{read_lines, resolve_commands};
use session::{signals, Session};

fn init_logging(config: &CliConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    let level = if config.debug {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    if config.debug {
        debug!("logging level set to 'debug'");
    }
    Ok(())
}

fn run(config: CliConfig) -> Result<()> {
    signals::install()?;

    // Resolve the whole script up front so unknown commands abort before
    // any shell is spawned.
    let commands = resolve_commands(&read_lines(&config.script_file)?)?;

    let mut session = Session::new();
    session.set_shell(&config.shell);
    session.set_monitor(&config.monitor_file);
    session.init()?;
    session.run(commands)
}

fn exit_code_for(program: &str, err: &Error) -> i32 {
    if err.is_exit() {
        debug!("{err}");
    } else {
        log_error!("{err}");
        eprintln!("{program}: Error: {err}");
    }
    err.exit_code()
}

/// Print the farewell tail and leave with `code`.
fn finish(code: i32) -> ! {
    println!();
    println!("[exited gupty]");
    std::process::exit(code);
}

fn main() {
    // Keystroke echo must come back even if we blow up mid-session.
    let default_panic = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        default_panic(info);
    }));

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "gupty".to_string());

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{program}: Error: {err}");
            finish(2);
        }
    };

    if let Err(err) = init_logging(&config) {
        eprintln!("{program}: Error: {err}");
        finish(2);
    }

    let code = match panic::catch_unwind(|| run(config)) {
        Ok(Ok(())) => {
            debug!("exiting normally");
            0
        }
        Ok(Err(err)) => exit_code_for(&program, &err),
        Err(_) => {
            log_error!("unknown error");
            eprintln!("{program}: Unknown error.");
            3
        }
    };

    finish(code);
}
