extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Program, Runtime};
use crate::opt::Optimizer;
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::fs;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const USAGE: &str = "\
Usage: bytecode [FILE]
       bytecode --optimize FILE [OUTPUT]

Runs a bytecode program, or with --optimize (-O) rewrites it and
reports removal statistics on stderr. Without FILE the program text
is read from standard input.";

pub fn main() {
    let mut optimize = false;
    let mut files: Vec<String> = vec![];
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-O" | "--optimize" => optimize = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ => files.push(arg),
        }
    }
    let text = match read_program(files.get(0)) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            std::process::exit(1);
        }
    };
    if optimize {
        run_optimizer(&text, files.get(1));
    } else {
        let interrupted = Arc::new(AtomicBool::new(false));
        let int_moved = interrupted.clone();
        ctrlc::set_handler(move || {
            int_moved.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl-C handler");
        let code = run_program(&text, files.get(0).is_some(), &interrupted);
        if code != 0 {
            std::process::exit(code);
        }
    }
}

fn read_program(path: Option<&String>) -> std::io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run_program(text: &str, interactive: bool, interrupted: &AtomicBool) -> i32 {
    let mut runtime = Runtime::new();
    runtime.load(text);
    // When the program came from stdin there is nothing left to READ
    // from; end of input pushes 0.
    let input = if interactive {
        Interface::new("bytecode").ok()
    } else {
        None
    };
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(5000) {
            Event::Running => {}
            Event::Stopped => break,
            Event::Print(text) => print!("{}", text),
            Event::Input => {
                let line = match &input {
                    Some(interface) => match interface.read_line() {
                        Ok(ReadResult::Input(line)) => Some(line),
                        _ => None,
                    },
                    None => None,
                };
                if let Event::Error(error) = runtime.input(line.as_deref()) {
                    eprintln!("{}", Style::new().bold().paint(error.to_string()));
                    return 1;
                }
            }
            Event::Error(error) => {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
                return 1;
            }
        }
    }
    0
}

fn run_optimizer(text: &str, output: Option<&String>) {
    let mut optimizer = Optimizer::new(Program::load(text));
    let (optimized, stats) = optimizer.optimize();
    match output {
        Some(path) => {
            if let Err(error) = fs::write(path, &optimized) {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
                std::process::exit(1);
            }
            println!("Optimized code saved to '{}'", path);
        }
        None => println!("{}", optimized),
    }
    if stats.total_removed > 0 {
        eprintln!("\n{}", stats);
    } else {
        eprintln!("No optimizations applied.");
    }
}
