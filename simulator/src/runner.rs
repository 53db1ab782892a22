//! CLI front-end shared by all simulation binaries.
//!
//! Each binary's `main` hands its entry function to [`run`]: flags are
//! parsed, the tracing subscriber is installed on stderr, the output
//! mode is resolved, and the entry function builds and runs the
//! simulator. Exit codes: 0 on success, 1 on configuration errors
//! (malformed flags, nonzero entry return), 2 on contract violations.

use std::io::IsTerminal;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::driver::SimulatorError;
use crate::output::{OutputModule, TextOutput, XmlOutput};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line flags shared by every simulation binary.
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
struct Args {
    /// Outputs the simulation execution using XML unless the
    /// simulation overrides this.
    #[arg(short = 'x', long)]
    xml: bool,

    /// Shows only information about the simulator.
    #[arg(short = 'v', long)]
    version: bool,

    /// Arguments forwarded to the simulation entry function.
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

/// Output mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Xml,
}

/// Configuration handed to the simulation entry function.
#[derive(Debug)]
pub struct RunContext {
    mode: OutputMode,
}

impl RunContext {
    /// The output module matching the command-line selection.
    #[must_use]
    pub fn output_module(&self) -> Box<dyn OutputModule> {
        match self.mode {
            OutputMode::Text => Box::new(TextOutput::stdout()),
            OutputMode::Xml => Box::new(XmlOutput::stdout()),
        }
    }
}

/// A simulation entry function: builds the simulator and runs it.
/// The returned value becomes part of the process exit status: zero is
/// success, nonzero is reported and mapped to exit code 1.
pub type EntryFn = fn(&RunContext, &[String]) -> Result<i32, SimulatorError>;

fn banner(name: &str) {
    info!("******************** {name} (slotcast v{VERSION}) ********************");
    info!("A discrete-event simulator for slotted broadcast networks.");
    info!("***************************************************************");
}

fn init_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .init();
}

/// Parse the command line, run the entry function, and exit.
pub fn run(name: &str, entry: EntryFn) -> ! {
    init_subscriber();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // -h/--help lands here with a zero exit; anything else is
            // a configuration error.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if args.version {
        banner(name);
        std::process::exit(0);
    }

    banner(name);
    info!("Starting simulation `{name}`.");
    let start = Instant::now();

    let context = RunContext {
        mode: if args.xml {
            OutputMode::Xml
        } else {
            OutputMode::Text
        },
    };

    let code = match entry(&context, &args.rest) {
        Ok(0) => 0,
        Ok(result) => {
            warn!("Result of simulation entry point is non-zero: {result}");
            1
        }
        Err(fatal) => {
            error!("An error occurred: {fatal}");
            let sections = fatal.sections();
            if !sections.is_empty() {
                error!("This error occurred from:");
                for section in sections {
                    error!("  => {section}");
                }
            }
            error!("The program will be terminated.");
            std::process::exit(2);
        }
    };

    info!(
        "Simulation completed in {}ms.",
        start.elapsed().as_millis()
    );
    std::process::exit(code);
}
