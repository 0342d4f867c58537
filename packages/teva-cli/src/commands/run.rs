use std::path::PathBuf;

use teva_rs::{compute_bundle, Recording, RunContext, SummaryCalculator};

use crate::cli::RunArgs;
use crate::exit_codes;
use crate::output;

pub fn execute(args: RunArgs) -> i32 {
    let condition = match args.condition.to_condition() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    // Artifact mode delegates to the full pipeline, persistence included.
    if let Some(ref dir) = args.output_dir {
        let ctx = RunContext {
            condition,
            wanted_channels: args.channels.clone(),
            output_dir: PathBuf::from(dir),
        };
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: Failed to create output directory '{}': {}", dir, e);
            return exit_codes::EXECUTION_ERROR;
        }
        return match teva_rs::process_file(&ctx, &args.file) {
            Ok(summary) => {
                if !args.quiet {
                    eprintln!(
                        "{}: {} event(s), {} computed, {} skipped",
                        summary.file, summary.events, summary.computed, summary.skipped
                    );
                    eprintln!("Results written to {}", summary.output_path);
                }
                exit_codes::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_codes::EXECUTION_ERROR
            }
        };
    }

    // Print mode: compute the bundle and emit it as JSON.
    let recording = match Recording::from_csv_path(&args.file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if !args.quiet {
        eprintln!("Processing {}...", args.file);
        eprintln!(
            "  Condition: {} in [{}, {}]",
            args.condition.channel, args.condition.low, args.condition.high
        );
    }

    let bundle = compute_bundle(
        &recording,
        &condition,
        args.channels.as_deref(),
        &SummaryCalculator,
        &args.file,
    );

    if !args.quiet {
        eprintln!(
            "  {} event(s), {} computed",
            bundle.events.len(),
            bundle.calculations.len()
        );
    }

    match output::to_json(&bundle, args.compact) {
        Ok(json) => {
            if let Err(e) = output::emit(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
