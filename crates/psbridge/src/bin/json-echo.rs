//! json-echo - Rust stand-in for `scripts/json_echo.ps1`
//!
//! Reads one JSON object from stdin and, for `-Operation echo`, writes
//! `{"message": "Hello from PowerShell", "name": ..., "number": ...}` to
//! stdout. Any failure is written to stderr with exit status 1.
//!
//! ```text
//! echo '{"name":"Tibi","number":42}' | json-echo -Operation echo
//! ```

use psbridge::responder;
use std::io::{self, Read, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(operation) = responder::operation_from_args(&args) else {
        eprintln!("Missing value for -Operation.");
        return ExitCode::FAILURE;
    };

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Failed to read stdin: {e}");
        return ExitCode::FAILURE;
    }

    match responder::respond(&input, &operation) {
        Ok(reply) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(reply.as_bytes()).and_then(|()| stdout.flush()) {
                eprintln!("Failed to write reply: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
