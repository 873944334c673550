use std::{
    env, fs,
    io::{self, BufRead, IsTerminal, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use rpn::{Engine, interpreter::evaluator::registry::OPERATIONS};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "RPN_LOG";
/// Startup script looked up in the home directory.
const RC_FILE: &str = ".rpnrc";
const PROMPT: &str = ">> ";

/// rpn is a reverse Polish notation calculator with arbitrary precision
/// integers, variables and macros.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates the expression, prints the top of the stack and exits.
    /// Without an expression, rpn reads piped input or starts interactively.
    #[arg(value_name = "EXPRESSION", allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Startup script evaluated line by line before anything else.
    /// Defaults to ~/.rpnrc.
    #[arg(long, value_name = "PATH", conflicts_with = "no_rc")]
    rc: Option<PathBuf>,

    /// Skips the startup script.
    #[arg(long)]
    no_rc: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut engine = Engine::new();

    if !args.no_rc {
        let path = args.rc.clone().or_else(default_rc);
        if let Some(path) = path {
            load_rc(&mut engine, &path, args.rc.is_some());
        }
    }

    if !args.expression.is_empty() {
        return batch(&mut engine, &args.expression.join(" "));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl(&mut engine);
        return ExitCode::SUCCESS;
    }

    let mut input = String::new();
    if let Err(e) = stdin.lock().read_to_string(&mut input) {
        eprintln!("Error: failed to read standard input: {e}");
        return ExitCode::FAILURE;
    }
    batch(&mut engine, &input)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(filter)
                                  .init();
}

fn default_rc() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| Path::new(&home).join(RC_FILE))
}

/// Evaluates the startup script one line at a time, so that every line may
/// define a macro and a failing line is rolled back on its own.
///
/// A missing default script is skipped silently; a missing script given with
/// `--rc` is reported. Failing lines are reported and do not stop the script.
fn load_rc(engine: &mut Engine, path: &Path, explicit: bool) {
    let script = match fs::read_to_string(path) {
        Ok(script) => script,
        Err(e) => {
            if explicit {
                eprintln!("Error: failed to read '{}': {e}", path.display());
            } else {
                debug!(path = %path.display(), "no startup script");
            }
            return;
        },
    };

    for (line, e) in engine.evaluate_lines(&script) {
        warn!(path = %path.display(), line, "startup script failed");
        eprintln!("Error: {}:{line}: {e}", path.display());
    }
}

/// Evaluates `source` and prints the top of the stack.
fn batch(engine: &mut Engine, source: &str) -> ExitCode {
    match engine.evaluate(source) {
        Ok(()) => {
            if let Some(result) = engine.result() {
                println!("{result}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn repl(engine: &mut Engine) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let stack = engine.display();
        if stack.is_empty() {
            print!("{PROMPT}");
        } else {
            print!("{stack} {PROMPT}");
        }
        if io::stdout().flush().is_err() {
            return;
        }

        let Some(Ok(line)) = lines.next() else {
            println!();
            return;
        };

        match Command::parse(&line) {
            Command::Exit => return,
            Command::Clear => print!("\x1b[2J\x1b[H"),
            Command::Help => print_help(),
            Command::Evaluate(input) => {
                if let Err(e) = engine.evaluate(input) {
                    eprintln!("Error: {e}");
                }
            },
        }
    }
}

/// A line typed into the interactive shell.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Clear,
    Help,
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    /// Recognizes the shell commands, ignoring case and surrounding
    /// whitespace. Anything else is an expression.
    fn parse(line: &'a str) -> Self {
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "exit" => Self::Exit,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            _ => Self::Evaluate(input),
        }
    }
}

fn print_help() {
    println!("Usage: enter numbers and operations separated by spaces, e.g. '3 4 + 2 *'.");
    println!();
    for operation in OPERATIONS {
        println!("  {:<8} {}", operation.name, operation.description);
    }
    println!();
    for (name, description) in [("macro", "Define a macro, e.g. 'macro kib 1024 *'"),
                                ("x=", "Assign the top of the stack to variable x, e.g. '3 x='"),
                                ("exit", "Exit the calculator"),
                                ("help", "Print this help")]
    {
        println!("  {name:<8} {description}");
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn shell_commands_ignore_case() {
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("  EXIT \n"), Command::Exit);
        assert_eq!(Command::parse("Clear"), Command::Clear);
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse(" 3 4 + "), Command::Evaluate("3 4 +"));
    }
}
