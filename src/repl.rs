use crate::runner::{self, ErrorStyle};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">> ";

/// Interactive loop on stdin/stdout. Every line is evaluated on its own;
/// nothing is remembered between lines.
pub fn start(style: ErrorStyle) {
    println!("yac v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(error) = run_session(stdin.lock(), stdout.lock(), style) {
        eprintln!("Error reading input: {}", error);
    }
}

pub fn run_session<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    style: ErrorStyle,
) -> io::Result<()> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF (Ctrl+D or piped input ended)
            writeln!(output)?;
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            writeln!(output, "Goodbye!")?;
            return Ok(());
        }

        runner::run_line(&mut output, line, None, style)?;
    }
}
