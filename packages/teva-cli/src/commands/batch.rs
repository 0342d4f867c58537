use std::path::PathBuf;
use std::time::Instant;

use teva_rs::{check_quality, discover_files, process_batch, RunContext};

use crate::cli::BatchArgs;
use crate::exit_codes;

pub fn execute(args: BatchArgs) -> i32 {
    let condition = match args.condition.to_condition() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let candidates = match resolve_candidates(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if candidates.is_empty() {
        eprintln!("Error: No candidate files found");
        return exit_codes::INPUT_ERROR;
    }

    if args.dry_run {
        for f in &candidates {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} candidate file(s)", candidates.len());
        }
        return exit_codes::SUCCESS;
    }

    let start_time = Instant::now();

    let (valid, invalid) = check_quality(&candidates);
    if !args.quiet {
        eprintln!(
            "Valid files: {}, Invalid files: {}",
            valid.len(),
            invalid.len()
        );
    }

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "Error: Failed to create output directory '{}': {}",
            args.output_dir, e
        );
        return exit_codes::EXECUTION_ERROR;
    }

    let ctx = RunContext {
        condition,
        wanted_channels: args.channels.clone(),
        output_dir: PathBuf::from(&args.output_dir),
    };
    let summary = process_batch(&ctx, &valid);

    if !args.quiet {
        eprintln!(
            "Batch complete: {} valid, {} invalid, {} succeeded, {} failed, {:.1}s",
            valid.len(),
            invalid.len(),
            summary.succeeded,
            summary.failed,
            start_time.elapsed().as_secs_f64()
        );
    }

    if summary.failed == 0 {
        exit_codes::SUCCESS
    } else if summary.succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

fn resolve_candidates(args: &BatchArgs) -> Result<Vec<String>, String> {
    if let Some(ref roots) = args.roots {
        Ok(discover_files(roots))
    } else if let Some(ref files) = args.files {
        Ok(files.clone())
    } else if let Some(ref pattern) = args.glob {
        resolve_glob(pattern)
    } else {
        Err("One of --roots, --files, or --glob must be specified".to_string())
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths =
        glob::glob(pattern).map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => {
                eprintln!("Warning: glob error: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}
