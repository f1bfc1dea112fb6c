//! Sheets - evaluate spreadsheet formulas from the command line

mod config;
mod error;

use anyhow::Context;
use sheets_core::Sheet;
use sheets_core::storage::write_markdown;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_usage() {
    eprintln!("Usage: sheets [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to load (one 'A1: text' per line)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula against the sheet and print it");
    eprintln!("  -o, --output <FILE>       Export the evaluated sheet to markdown");
    eprintln!("  --config <FILE>           Read settings from this TOML file");
    eprintln!("  --no-cycle-check          Do not guard against circular references");
    eprintln!("  -h, --help                Print help");
}

struct Args {
    file_path: Option<PathBuf>,
    command: Option<String>,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    no_cycle_check: bool,
}

/// Parse arguments, or return the exit code to stop with.
fn parse_args(args: &[String]) -> Result<Args, ExitCode> {
    let mut parsed = Args {
        file_path: None,
        command: None,
        output_file: None,
        config_file: None,
        no_cycle_check: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return Err(ExitCode::SUCCESS);
            }
            "-c" | "--command" => {
                i += 1;
                let Some(formula) = args.get(i) else {
                    eprintln!("Error: --command requires a formula");
                    return Err(ExitCode::FAILURE);
                };
                parsed.command = Some(formula.clone());
            }
            "-o" | "--output" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("Error: --output requires a file path");
                    return Err(ExitCode::FAILURE);
                };
                parsed.output_file = Some(PathBuf::from(path));
            }
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("Error: --config requires a file path");
                    return Err(ExitCode::FAILURE);
                };
                parsed.config_file = Some(PathBuf::from(path));
            }
            "--no-cycle-check" => parsed.no_cycle_check = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                return Err(ExitCode::FAILURE);
            }
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    return Err(ExitCode::FAILURE);
                }
            }
        }
        i += 1;
    }
    Ok(parsed)
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = config::load_config(args.config_file.as_deref())?;
    let mut options = config.eval_options();
    if args.no_cycle_check {
        options.detect_cycles = false;
    }

    let sheet = match &args.file_path {
        Some(path) => sheets_core::storage::load_sheet(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Sheet::new(),
    }
    .with_options(options);

    if let Some(formula) = &args.command {
        return Ok(match sheet.evaluate_formula(formula) {
            Ok(value) => {
                println!("{}", sheets_engine::engine::format_number(value));
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("#ERR: {}", e);
                ExitCode::FAILURE
            }
        });
    }

    if let Some(output_path) = &args.output_file {
        std::fs::write(output_path, write_markdown(&sheet))
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    for (cell, _) in sheet.cells() {
        println!("{}: {}", cell, sheet.get_cell_display(&cell));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
