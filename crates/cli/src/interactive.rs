//! Interactive prompt loop.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use vidpipe_core::VideoPipeline;

use crate::render::{self, colors::*};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Process(PathBuf),
    Exit,
    Help,
    Empty,
    Unknown(String),
}

/// Parses one prompt line. Paths may be wrapped in matching quotes.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "exit" | "quit" if rest.is_empty() => Command::Exit,
        "help" if rest.is_empty() => Command::Help,
        "process" if !rest.is_empty() => Command::Process(PathBuf::from(unquote(rest))),
        _ => Command::Unknown(line.to_string()),
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

fn prompt() {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{BOLD}You:{RESET} ");
    let _ = stdout.flush();
}

/// Reads commands from stdin until `exit` or end of input.
pub async fn run(pipeline: &VideoPipeline) -> Result<()> {
    print!("{}", render::header());
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            println!("\n{DIM}Goodbye!{RESET}");
            return Ok(());
        };

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Exit => {
                println!("\n{DIM}Goodbye!{RESET}");
                return Ok(());
            }
            Command::Help => print!("{}", render::header()),
            Command::Unknown(input) => {
                println!("{YELLOW}Unknown command: {input}{RESET} (try `process <file>` or `exit`)");
            }
            Command::Process(path) => {
                println!("\n{CYAN}Processing{RESET} {}", path.display());
                match pipeline.run(&path, &render::print_progress).await {
                    Ok(result) => println!("{}", render::summary(&result)),
                    Err(e) => {
                        error!("Pipeline failed: {}", e);
                        println!("{YELLOW}Pipeline failed: {e}{RESET}\n");
                    }
                }
            }
        }
    }
}
