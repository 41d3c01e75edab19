//! CLI argument parsing and configuration.

use std::io;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOG_FILE: &str = "gupty.log";
const DEFAULT_MONITOR_FILE: &str = ".gupty.monitor";

/// Configuration from CLI arguments.
pub struct CliConfig {
    pub script_file: String,
    pub shell: String,
    pub log_file: String,
    pub monitor_file: String,
    pub debug: bool,
}

/// What a parse produced: a runnable configuration or an informational
/// request that short-circuits the program.
enum Parsed {
    Run(CliConfig),
    ShowHelp,
    ShowVersion,
}

pub fn print_version() {
    println!("gupty version {VERSION}");
}

/// Print usage information
pub fn print_usage() {
    print_version();
    println!("Usage: gupty [OPTIONS] <script-file.gupty>");
    println!();
    println!("Options:");
    println!("  -v, --version          show version");
    println!("  -h, --help             print help message");
    println!("  -d, --debug            debug mode, log everything");
    println!("  --shell <path>         use shell instead of default");
    println!("  --log-file <path>      log file name (default: {DEFAULT_LOG_FILE})");
    println!("  --monitor-file <path>  monitor file name (default: {DEFAULT_MONITOR_FILE})");
}

/// Parse CLI arguments and return configuration.
///
/// Help and version requests (and a missing script file) print their output
/// and exit 0, matching the classic behavior of the tool.
pub fn parse_args() -> io::Result<CliConfig> {
    let args: Vec<String> = std::env::args().collect();
    match parse_from(&args)? {
        Parsed::Run(config) => Ok(config),
        Parsed::ShowHelp => {
            print_usage();
            std::process::exit(0);
        }
        Parsed::ShowVersion => {
            print_version();
            std::process::exit(0);
        }
    }
}

fn parse_from(args: &[String]) -> io::Result<Parsed> {
    let mut script_file: Option<String> = None;
    let mut shell = String::new();
    let mut log_file = DEFAULT_LOG_FILE.to_string();
    let mut monitor_file = DEFAULT_MONITOR_FILE.to_string();
    let mut debug = false;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-h" || arg == "--help" {
            return Ok(Parsed::ShowHelp);
        } else if arg == "-v" || arg == "--version" {
            return Ok(Parsed::ShowVersion);
        } else if arg == "-d" || arg == "--debug" {
            debug = true;
            i += 1;
        } else if arg == "--shell" {
            shell = option_value(args, &mut i, "--shell")?;
        } else if arg == "--log-file" {
            log_file = option_value(args, &mut i, "--log-file")?;
        } else if arg == "--monitor-file" {
            monitor_file = option_value(args, &mut i, "--monitor-file")?;
        } else if !arg.starts_with('-') {
            script_file = Some(arg.clone());
            i += 1;
        } else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown option: {arg}"),
            ));
        }
    }

    let Some(script_file) = script_file else {
        return Ok(Parsed::ShowHelp);
    };

    Ok(Parsed::Run(CliConfig {
        script_file,
        shell,
        log_file,
        monitor_file,
        debug,
    }))
}

fn option_value(args: &[String], i: &mut usize, name: &str) -> io::Result<String> {
    *i += 1;
    let value = args
        .get(*i)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("missing value for {name}"),
            )
        })?
        .clone();
    *i += 1;
    Ok(value)
}
