use clap::{Arg, ArgAction, Command};
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use yac::runner::{self, ErrorStyle};

fn build_cli() -> Command {
    Command::new("yac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluates integer arithmetic expressions, one per line")
        .arg(
            Arg::new("file")
                .help("A file with one expression per line")
                .value_name("FILE")
                .index(1)
                .conflicts_with("eval"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .help("Evaluate a single expression and exit")
                .value_name("EXPR")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode (the default without input)")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["file", "eval"]),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .help("Print syntax errors as plain text instead of diagnostics")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let style = if matches.get_flag("plain") {
        ErrorStyle::Plain
    } else {
        ErrorStyle::Pretty
    };

    if matches.get_flag("interactive") {
        yac::start_repl(style);
        return ExitCode::SUCCESS;
    }

    if let Some(expr) = matches.get_one::<String>("eval") {
        return eval_expression(expr, style);
    }

    if let Some(file_path) = matches.get_one::<String>("file") {
        return run_file(file_path, style);
    }

    yac::start_repl(style);
    ExitCode::SUCCESS
}

fn eval_expression(expr: &str, style: ErrorStyle) -> ExitCode {
    let stdout = io::stdout();
    match runner::run_line(&mut stdout.lock(), expr, Some("<eval>"), style) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &str, style: ErrorStyle) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let name = path.display().to_string();
            if runner::run(&source, Some(&name), style) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_arg(args: &[&str]) -> Option<String> {
        build_cli()
            .try_get_matches_from(args.iter().copied())
            .unwrap()
            .get_one::<String>("eval")
            .cloned()
    }

    #[test]
    fn test_eval_accepts_leading_minus() {
        assert_eq!(eval_arg(&["yac", "-e", "-3 + 4"]).as_deref(), Some("-3 + 4"));
        assert_eq!(eval_arg(&["yac", "--eval", "-(2 * 3)"]).as_deref(), Some("-(2 * 3)"));
        assert_eq!(eval_arg(&["yac", "--plain", "-e", "-1"]).as_deref(), Some("-1"));
    }

    #[test]
    fn test_eval_plain_expression() {
        assert_eq!(eval_arg(&["yac", "-e", "2 * 3"]).as_deref(), Some("2 * 3"));
        assert_eq!(eval_arg(&["yac"]), None);
    }

    #[test]
    fn test_interactive_conflicts_with_eval() {
        assert!(build_cli()
            .try_get_matches_from(["yac", "-i", "-e", "1"])
            .is_err());
    }

    #[test]
    fn test_cli_is_consistent() {
        build_cli().debug_assert();
    }
}
