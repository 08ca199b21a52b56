//! `vvm-dis`: disassemble a flat VVM binary image to stdout.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vvm_disassembler::{render_with, Disassembler, Options, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "vvm-dis", version, about = "Disassemble a flat VVM binary image")]
struct Args {
    /// Binary image to disassemble
    image: PathBuf,

    /// Prefix every line with its address
    #[arg(long)]
    addresses: bool,

    /// Disable the inline-string guard that demotes jump/call opcodes
    /// continuing an open data run
    #[arg(long)]
    no_string_heuristic: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let image = fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let listing = Disassembler::with_options(
        &image,
        Options {
            string_heuristic: !args.no_string_heuristic,
        },
    )
    .run();

    print!(
        "{}",
        render_with(
            &listing,
            RenderOptions {
                show_addresses: args.addresses,
            },
        )
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Argument errors exit 1 with the usage text rather than clap's
    // default code; --help and --version still exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vvm-dis: {err:#}");
            ExitCode::from(1)
        }
    }
}
