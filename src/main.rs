//! A thin demo binary wired straight to the library's entry points, the way
//! the teacher's `main.rs` is a thin wrapper over `runner::run_file`. This is
//! explicitly NOT the CLI shell spec §1 calls out of scope: no flag parsing,
//! no REPL, no file-format negotiation — it exists so the crate is runnable
//! end to end while developing it.

use std::env;
use std::fs;
use std::process::ExitCode;

use log::{error, info};

use while_core::{display_pad, interpret, parse, to_pad, InterpreterOptions, ParserOptions, PadFormat, Tree};

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Warn).ok();

    let args: Vec<String> = env::args().collect();
    let path = match args.as_slice() {
        [_, path] => path,
        _ => {
            println!("Usage: whilec <script.while>");
            return ExitCode::from(64);
        }
    };

    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to read {path}: {e}");
            return ExitCode::from(66);
        }
    };

    let tokens = match while_core::lexer::scan(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(65);
        }
    };

    let (program, errors) = parse(tokens, ParserOptions::default());
    for err in &errors {
        println!("{path}:{err}");
    }
    if !errors.is_empty() {
        return ExitCode::from(65);
    }

    info!("parsed program {:?} (complete={})", program.name, program.complete);
    if let Ok(pad) = to_pad(&program) {
        info!("PAD form:\n{}", display_pad(&pad, PadFormat::hwhile()));
    }

    match interpret(&program, Tree::Nil, InterpreterOptions::default()) {
        Ok(output) => {
            println!("{output:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(70)
        }
    }
}
