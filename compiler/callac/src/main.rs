//! Calla CLI
//!
//! Runs the built-in function-semantics demos.

use callac::{demos, find_demo, init_tracing, render_diagnostic, run_demo, Demo};
use calla_eval::{stdout_handler, EvalMode};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "list" => list_demos(),
        "run" => {
            let mut mode = EvalMode::Sloppy;
            let mut all = false;
            let mut selected: Vec<&'static Demo> = Vec::new();

            for arg in args.iter().skip(2) {
                if arg == "--strict" {
                    mode = EvalMode::Strict;
                } else if arg == "--all" {
                    all = true;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option '{arg}'");
                    eprint_usage();
                    std::process::exit(1);
                } else if let Some(demo) = find_demo(arg) {
                    selected.push(demo);
                } else {
                    eprintln!("error: unknown demo '{arg}'");
                    eprintln!("Run `calla list` to see the available demos.");
                    std::process::exit(1);
                }
            }

            if all {
                selected = demos().iter().collect();
            }
            if selected.is_empty() {
                eprintln!("error: no demo named");
                eprint_usage();
                std::process::exit(1);
            }

            run_demos(&selected, mode);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("calla {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprint_usage();
            std::process::exit(1);
        }
    }
}

fn list_demos() {
    let width = demos().iter().map(|d| d.name.len()).max().unwrap_or(0);
    for demo in demos() {
        println!("  {:<width$}  {}", demo.name, demo.description);
    }
}

/// Run demos in order, stopping at the first runtime error.
fn run_demos(selected: &[&Demo], mode: EvalMode) {
    let show_headers = selected.len() > 1;
    for (i, demo) in selected.iter().enumerate() {
        if show_headers {
            if i > 0 {
                println!();
            }
            println!("== {} ==", demo.name);
        }
        if let Err(error) = run_demo(demo, mode, stdout_handler()) {
            eprint!("{}", render_diagnostic(demo.name, &error));
            std::process::exit(1);
        }
    }
}

const USAGE: &str = "\
Calla - JavaScript function semantics, evaluated

Usage: calla <command> [options]

Commands:
  list                 List the built-in demos
  run <demo>...        Run the named demos in order
  run --all            Run every demo
  help                 Show this help message
  version              Show version information

Run options:
  --strict             Evaluate in strict mode (plain calls get undefined as this)

Environment:
  CALLA_LOG=<filter>   Enable evaluator tracing (e.g. CALLA_LOG=calla_eval=debug)";

fn print_usage() {
    println!("{USAGE}");
}

fn eprint_usage() {
    eprintln!();
    eprintln!("{USAGE}");
}
