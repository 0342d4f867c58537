use std::path::Path;

use serde::Serialize;
use teva_rs::Recording;

use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    exists: bool,
    valid: bool,
    channels: Option<Vec<String>>,
    rows: Option<usize>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let exists = Path::new(&args.file).exists();

    let (valid, channels, rows, error) = match Recording::from_csv_path(&args.file) {
        Ok(recording) => (
            true,
            Some(recording.channel_names().to_vec()),
            Some(recording.len()),
            None,
        ),
        Err(e) => (false, None, None, Some(e.to_string())),
    };

    let result = ValidateOutput {
        file: args.file.clone(),
        exists,
        valid,
        channels: channels.clone(),
        rows,
        error: error.clone(),
    };

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::emit(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else if let Some(ref err) = error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' is valid ({} channel(s), {} row(s))",
            args.file,
            channels.map(|c| c.len()).unwrap_or(0),
            rows.unwrap_or(0)
        );
    }

    if error.is_some() {
        exit_codes::INPUT_ERROR
    } else {
        exit_codes::SUCCESS
    }
}
