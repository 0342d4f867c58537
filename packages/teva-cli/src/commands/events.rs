use teva_rs::{segment_events, Recording};

use crate::cli::EventsArgs;
use crate::exit_codes;
use crate::output;

pub fn execute(args: EventsArgs) -> i32 {
    let condition = match args.condition.to_condition() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let recording = match Recording::from_csv_path(&args.file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let events = segment_events(&recording, &condition, &args.file);

    if args.json {
        match output::to_json(&events, false) {
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
    } else {
        for event in &events {
            println!("{}", event);
        }
        eprintln!("{} event(s) detected", events.len());
    }

    exit_codes::SUCCESS
}
