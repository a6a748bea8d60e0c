//! Terminal rendering of reckon errors using ariadne.
//!
//! Parse errors are drawn against the expression text with the failing span
//! underlined. Evaluation errors carry no location, so they render as a
//! headline with their code.

use crate::{Diagnostic, Error, EvalError, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error with formatting to stderr.
///
/// # Example
/// ```no_run
/// use reckon::{Engine, Environment, render_error};
///
/// let engine = Engine::new();
/// if let Err(e) = engine.evaluate("1 + * 2", &Environment::new()) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation(err) => {
            render_diagnostic(&err.source, &err.to_diagnostic(), writer, use_color)
        }
        Error::Runtime(err) => render_runtime(err, writer, use_color),
    }
}

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    }
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let end = diag.span.0.end.min(source.len());
    let span = diag.span.start().min(end)..end;

    let mut report = Report::build(report_kind(diag.severity), (SOURCE_ID, span.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((SOURCE_ID, span))
            .with_message(&diag.message)
            .with_color(colors.next()),
    );

    for help_msg in &diag.help {
        report = report.with_help(help_msg);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

fn render_runtime(err: &EvalError, writer: &mut dyn Write, use_color: bool) -> std::io::Result<()> {
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, 0..0))
        .with_code(err.code())
        .with_message(err.to_string())
        .with_config(ariadne::Config::default().with_color(use_color));

    if let EvalError::ParameterNotDefined { name } = err {
        report = report.with_help(format!("Bind '{name}' as a parameter before evaluating"));
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from("")), &mut *writer)
}
