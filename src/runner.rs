use crate::error::{ErrorKind, YacError};
use crate::evaluator::evaluate_optional;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;
use std::io::{self, Write};

/// How syntax and usage errors are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStyle {
    /// Colored ariadne diagnostics on stderr.
    #[default]
    Pretty,
    /// A heading plus one indented line per message, on the output stream.
    Plain,
}

/// Lexes, parses and evaluates one line with fresh state.
///
/// `Ok(None)` means the line held no expression. Evaluation errors come back
/// as `Ok(Some(Object::Error(..)))`; only syntax and usage errors use `Err`.
pub fn interpret(source: &str) -> Result<Option<Object>, Vec<YacError>> {
    let mut parser = Parser::new(Lexer::new(source.to_string()));
    let nodes = parser.parse();

    if !parser.errors().is_empty() {
        return Err(parser.errors().to_vec());
    }

    if let Some(extra) = nodes.get(1) {
        return Err(vec![YacError::usage_error(
            extra.token().span.clone(),
            format!("expected a single expression, found {}", nodes.len()),
            "enter one expression per line, joined by operators".to_string(),
        )]);
    }

    Ok(evaluate_optional(nodes.first()))
}

/// Runs one line and writes its result to `out`.
///
/// Returns `Ok(false)` when the line produced any kind of error.
pub fn run_line<W: Write>(
    out: &mut W,
    source: &str,
    filename: Option<&str>,
    style: ErrorStyle,
) -> io::Result<bool> {
    match interpret(source) {
        Ok(Some(object)) => {
            writeln!(out, "{}", object)?;
            Ok(!object.is_error())
        }
        Ok(None) => Ok(true),
        Err(errors) => {
            report_errors(out, &errors, source, filename, style)?;
            Ok(false)
        }
    }
}

/// Runs every line of `source` as an independent expression.
pub fn run(source: &str, filename: Option<&str>, style: ErrorStyle) -> bool {
    let filename = filename.unwrap_or("<input>");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    for (index, line) in source.lines().enumerate() {
        let label = format!("{}:{}", filename, index + 1);
        match run_line(&mut out, line, Some(&label), style) {
            Ok(ok) => all_ok &= ok,
            Err(error) => {
                eprintln!("Error writing output: {}", error);
                return false;
            }
        }
    }

    all_ok
}

pub fn render_plain(errors: &[YacError]) -> String {
    let heading = match errors.first().map(|e| e.kind) {
        Some(ErrorKind::Usage) => "Usage Error",
        _ => "Syntax Error",
    };

    let mut rendered = format!("{}:\n", heading);
    for error in errors {
        rendered.push_str(&format!("\t-{}\n", error.message));
    }
    rendered
}

fn report_errors<W: Write>(
    out: &mut W,
    errors: &[YacError],
    source: &str,
    filename: Option<&str>,
    style: ErrorStyle,
) -> io::Result<()> {
    match style {
        ErrorStyle::Plain => write!(out, "{}", render_plain(errors)),
        ErrorStyle::Pretty => {
            for error in errors {
                error.report(source, filename)?;
            }
            Ok(())
        }
    }
}
