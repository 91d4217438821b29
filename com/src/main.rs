//! Assembler/disassembler command-line entry point (§6).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

/// Two-pass assembler and disassembler for the octo-8bit instruction set.
#[derive(Parser, Debug)]
#[command(name = "com", about = "Assemble or disassemble octo-8bit source/ROMs")]
struct Args {
    /// Assemble SOURCE into a ROM image
    #[arg(short = 'c', value_name = "SOURCE", conflicts_with = "disassemble")]
    compile: Option<PathBuf>,

    /// Disassemble a ROM image back into source text
    #[arg(short = 'd', value_name = "SOURCE", conflicts_with = "compile")]
    disassemble: Option<PathBuf>,

    /// Output file path; defaults to `out.bin` or `out.asm`
    #[arg(short = 'o', value_name = "OUT")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let result = match (&args.compile, &args.disassemble) {
        (Some(source), None) => {
            let output = args.output.unwrap_or_else(|| PathBuf::from("out.bin"));
            compile(source, &output)
        }
        (None, Some(source)) => {
            let output = args.output.unwrap_or_else(|| PathBuf::from("out.asm"));
            decompile(source, &output)
        }
        _ => {
            eprintln!("usage: com [-c/-d source] [-o output]");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn compile(source: &PathBuf, output: &PathBuf) -> Result<(), String> {
    let text = std::fs::read_to_string(source).map_err(|e| e.to_string())?;
    let bytes = octo_asm::assemble(&text).map_err(|e| {
        error!("assembly failed: {e}");
        e.to_string()
    })?;
    std::fs::write(output, &bytes).map_err(|e| e.to_string())?;
    info!("wrote {} byte(s) to {}", bytes.len(), output.display());
    Ok(())
}

fn decompile(source: &PathBuf, output: &PathBuf) -> Result<(), String> {
    let bytes = std::fs::read(source).map_err(|e| e.to_string())?;
    let text = octo_asm::disassemble(&bytes);
    std::fs::write(output, &text).map_err(|e| e.to_string())?;
    info!("wrote {} line(s) to {}", text.lines().count(), output.display());
    Ok(())
}
