//! Checks over emitted declarations.

use std::collections::HashMap;

use crate::render::Declaration;

use super::warning::{Diagnostic, Report};

/// Warn when two tokens flatten to the same custom property name.
///
/// This happens when a composite expands into `--a-b` while a sibling
/// token is also called `a.b`, or when keys differ only by whitespace.
/// The later declaration wins in the browser.
pub fn check_duplicate_properties(declarations: &[Declaration]) -> Report {
    let mut report = Report::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for decl in declarations {
        let count = seen.entry(decl.name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            report.push(
                Diagnostic::warning(
                    "tokens::check::duplicate-property",
                    format!("--{} is declared more than once", decl.name),
                )
                .with_help("Rename one of the tokens; the last declaration wins"),
            );
        }
    }

    report
}
