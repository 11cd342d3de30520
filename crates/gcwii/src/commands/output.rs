use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// Print `value` as pretty JSON, or as the text `render` builds from it
pub(crate) fn print<T: Serialize>(
    value: &T,
    json: bool,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    } else {
        print!("{}", render(value));
    }
    Ok(())
}

/// A `name: value` line with the name padded to line up
pub(crate) fn field(name: &str, value: impl std::fmt::Display) -> String {
    format!("{:<18}{}\n", format!("{name}:"), value)
}
