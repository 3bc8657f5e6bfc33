//! Diagnostics for token builds.
//!
//! Recoverable problems (skipped files, unresolved references, duplicate
//! properties) are collected as [`Diagnostic`]s in a [`Report`] rather than
//! failing the build. Used by both `build` and `check`.

mod checks;
mod warning;

pub use checks::check_duplicate_properties;
pub use warning::{Diagnostic, Report, Severity};

use crate::output::{plural, Printer};

/// Print each diagnostic of a report through the printer.
pub fn print_report(report: &Report, printer: &Printer) {
    for d in report.iter() {
        let line = format!("{} {}", d.message, printer.dim(&format!("[{}]", d.code)));
        match d.severity {
            Severity::Error => printer.error("error", &line),
            Severity::Warning => printer.warning("warning", &line),
        }
        if let Some(help) = &d.help {
            printer.info("help", help);
        }
    }
}

/// One-line summary such as "2 warnings" or "1 error, 3 warnings".
pub fn summarize(report: &Report) -> String {
    let errors = report.error_count();
    let warnings = report.warning_count();
    if errors > 0 {
        format!(
            "{}, {}",
            plural(errors, "error", "errors"),
            plural(warnings, "warning", "warnings")
        )
    } else {
        plural(warnings, "warning", "warnings")
    }
}
