//! Error rendering using ariadne
//!
//! This module renders ceval errors with source code snippets, the offending
//! span labelled, and any help text attached to the diagnostic.

use crate::{Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use ceval::{Environment, Language, eval, render_error};
///
/// match eval("arr[4]", &Environment::new().with("arr", vec![1i64]), Language::C) {
///     Err(e) => render_error(&e),
///     Ok(value) => println!("{}", value),
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

/// Render an error to a String (useful for tests, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
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
    let diag = error.to_diagnostic();

    // Errors without source text have nothing to point at.
    let Some(source) = error.input() else {
        return writeln!(writer, "{}: {}", diag.severity, diag.message);
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
    };

    let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    let color = colors.next();
    report = report.with_label(
        Label::new((SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_color(color),
    );

    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Environment, Language, eval};

    fn rendered(source: &str, env: &Environment) -> String {
        let err = eval(source, env, Language::C).expect_err("evaluation should fail");
        render_error_to_string_no_color(&err)
    }

    #[test]
    fn test_render_parse_error() {
        let output = rendered("1 + + ", &Environment::new());

        assert!(output.contains("Error"));
        assert!(output.contains("P001"));
        // Should show the source
        assert!(output.contains("1 + +"));
    }

    #[test]
    fn test_render_eval_error() {
        let env = Environment::new().with("arr", vec![1i64, 2, 3, 4]);
        let output = rendered("arr[4] + 1", &env);

        assert!(output.contains("R006"));
        assert!(output.contains("Index 4 out of bounds (length: 4)"));
        assert!(output.contains("Valid indices are 0 to 3"));
        assert!(output.contains("arr[4] + 1"));
        // ariadne adds a multi-line frame around the snippet
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_undefined_variable() {
        let output = rendered("y * 2", &Environment::new());
        assert!(output.contains("Undefined variable 'y'"));
    }

    #[test]
    fn test_render_without_source() {
        let err = Error::UnsupportedLanguage("cobol".to_string());
        assert_eq!(
            render_error_to_string_no_color(&err),
            "error: Unsupported language 'cobol'\n"
        );
    }

    #[test]
    fn test_no_color_has_no_escape_codes() {
        let output = rendered("1 + true", &Environment::new());
        assert!(!output.contains('\u{1b}'));
    }
}
