/*
 * ==========================================================================
 * BRISK - A small imperative scripting language
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the BRISK programming language project.
 *
 * BRISK is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! The `brisk` command line.
//!
//! ```text
//! brisk run <file>     run a program
//! brisk parse <file>   print the syntax tree as JSON
//! brisk [repl]         read-evaluate-print loop on stdin
//! ```
//!
//! Settings come from the environment (`BRISK_MAX_CALL_DEPTH`,
//! `BRISK_COMMENTS`), logging from `RUST_LOG`.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use brisk::{DiagnosticPrinter, Interpreter, InterpreterConfig};

const USAGE: &str = "usage: brisk [repl] | brisk run <file> | brisk parse <file>";

fn main() -> ExitCode {
    brisk::init_tracing();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(String::as_str).collect::<Vec<_>>();

    let outcome = match args.as_slice() {
        [] | ["repl"] => repl(),
        ["run", path] => run_file(path),
        ["parse", path] => parse_file(path),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("brisk: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when the program failed and its error was already reported.
fn run_file(path: &str) -> io::Result<bool> {
    let source = fs::read_to_string(path)?;
    let mut interpreter = Interpreter::with_config(InterpreterConfig::from_env());

    match interpreter.interpret(&source) {
        Ok(result) => {
            if !result.is_null() {
                println!("{result}");
            }
            Ok(true)
        }
        Err(err) => {
            DiagnosticPrinter::new(path, source).print(&err);
            Ok(false)
        }
    }
}

fn parse_file(path: &str) -> io::Result<bool> {
    let source = fs::read_to_string(path)?;

    match brisk::parse_to_json(&source) {
        Ok(json) => {
            println!("{json}");
            Ok(true)
        }
        Err(err) => {
            DiagnosticPrinter::new(path, source).print(&err);
            Ok(false)
        }
    }
}

fn repl() -> io::Result<bool> {
    let mut interpreter = Interpreter::with_config(InterpreterConfig::from_env());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut line = String::new();
    loop {
        stdout.write_all(b"> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.evaluate(&line) {
            Ok(result) => println!("{result}"),
            Err(err) => DiagnosticPrinter::new("<repl>", line.as_str()).print(&err),
        }
    }

    Ok(true)
}
