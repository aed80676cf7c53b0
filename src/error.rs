use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recorded by the parser while reading a line.
    Syntax,
    /// The line parsed, but not into something the runner can evaluate.
    Usage,
}

#[derive(Debug, Clone)]
pub struct YacError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl YacError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn syntax_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Syntax, span, message)
    }

    pub fn syntax_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::Syntax, span, message, help)
    }

    pub fn usage_error(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::Usage, span, message, help)
    }

    /// Prints a diagnostic for this error against the line it came from.
    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        self.write_report(source, filename, io::stderr(), true)
    }

    pub fn write_report<W: Write>(
        &self,
        source: &str,
        filename: Option<&str>,
        out: W,
        color: bool,
    ) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        let range = self.label_range(source);

        let color_for_kind = match self.kind {
            ErrorKind::Syntax => Color::Yellow,
            ErrorKind::Usage => Color::Magenta,
        };

        let kind_str = match self.kind {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Usage => "Usage Error",
        };

        // Spans are byte offsets into the line.
        let config = Config::default()
            .with_index_type(IndexType::Byte)
            .with_color(color);

        let mut report_builder = Report::build(ReportKind::Error, filename, range.start)
            .with_config(config)
            .with_message(format!("{}: {}", kind_str.fg(color_for_kind), self.message))
            .with_label(
                Label::new((filename, range))
                    .with_message(&self.message)
                    .with_color(color_for_kind),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .write((filename, Source::from(source)), out)
    }

    /// The span to underline. An end-of-input span sits past the last
    /// character, so it is pulled back onto that character.
    fn label_range(&self, source: &str) -> Range<usize> {
        if self.span.start < source.len() {
            return self.span.start..self.span.end.min(source.len());
        }
        match source.char_indices().next_back() {
            Some((last, _)) => last..source.len(),
            None => 0..0,
        }
    }
}

impl fmt::Display for YacError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for YacError {}
