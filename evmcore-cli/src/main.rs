//! evmcore CLI: assemble, disassemble, verify, and execute bytecode.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input, decode, or assembly error
//! - 2: Verification failure
//! - 3: Execution fault

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evmcore", version, about = "Assemble, verify, and run EVM-style bytecode")]
struct Cli {
    /// Log interpreter activity at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a text file to raw bytecode
    Assemble {
        /// Assembly source
        input: PathBuf,
        /// Output path (default: input with a .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the bytecode as 0x-prefixed hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Disassemble bytecode to canonical assembly text
    Disassemble {
        /// Bytecode file
        input: PathBuf,
        /// Input file holds hex text rather than raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Statically check bytecode before execution
    Verify {
        /// Bytecode file
        input: PathBuf,
        /// Input file holds hex text rather than raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Verify and execute bytecode
    Run {
        /// Bytecode file
        #[arg(required_unless_present = "code", conflicts_with = "code")]
        input: Option<PathBuf>,
        /// Input file holds hex text rather than raw bytes
        #[arg(long)]
        hex: bool,
        /// Bytecode given inline as hex
        #[arg(long)]
        code: Option<String>,
        /// Execute even if verification fails
        #[arg(long)]
        no_verify: bool,
        /// Memory limit per frame, in bytes
        #[arg(long, env = "EVMCORE_MEMORY_LIMIT")]
        memory_limit: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::default().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::WARN.into()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Assemble { input, output, hex } => {
            commands::assemble(&input, output.as_deref(), hex)
        }
        Commands::Disassemble { input, hex } => commands::disassemble(&input, hex),
        Commands::Verify { input, hex } => commands::verify(&input, hex),
        Commands::Run {
            input,
            hex,
            code,
            no_verify,
            memory_limit,
        } => {
            let source = match (input, code) {
                (_, Some(text)) => commands::Source::Inline(text),
                (Some(path), None) => commands::Source::File { path, hex },
                (None, None) => {
                    eprintln!("error: run requires an input file or --code");
                    process::exit(1);
                }
            };
            commands::run(source, !no_verify, memory_limit)
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
