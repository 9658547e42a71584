//! A small command-line front end for the `quill-json` library.
//!
//! Reads one JSON document from a file (or stdin when no path is given),
//! and prints its canonical compact encoding, or the error with its
//! position.
//!
//! ```text
//! quill-json [--max-depth N] [PATH]
//! RUST_LOG=debug quill-json tasks.json
//! ```

use quill_json::{encode, parse_with, ParserOptions};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

struct Args {
    options: ParserOptions,
    path: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut options = ParserOptions::default();
    let mut path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-depth" => {
                let value = args.next().ok_or("--max-depth needs a value")?;
                let depth = value
                    .parse()
                    .map_err(|_| format!("invalid --max-depth value '{}'", value))?;
                options = options.with_max_depth(depth);
            }
            _ if path.is_none() => path = Some(arg),
            _ => return Err(format!("unexpected argument '{}'", arg)),
        }
    }

    Ok(Args { options, path })
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: quill-json [--max-depth N] [PATH]");
            return ExitCode::from(2);
        }
    };

    let input = match read_input(args.path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("could not read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match parse_with(&input, &args.options) {
        Ok(value) => {
            println!("{}", encode(&value));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
