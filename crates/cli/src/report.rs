//! Rendering parse results and error reports for the terminal.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use itertools::Itertools;
use optmatch_core::error::{Error, Result};
use optmatch_core::result::OptResult;

use crate::cli_args::OutputFormat;

/// Formats a successful result.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn format_result(result: &OptResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Yaml => serde_yaml::to_string(result).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "result".to_string(),
                "<stdout>".to_string(),
                e,
            )
        }),
    }
}

fn format_text(result: &OptResult) -> String {
    let values = result
        .values()
        .iter()
        .map(|(name, value)| format!("{name} = {value}"));
    let non_options = (!result.non_options().is_empty())
        .then(|| format!("-- {}", result.non_options().join(" ")));

    values.chain(non_options).join("\n")
}

/// Writes an error report, with the `* ` error lines in red when `colored`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_error_report<W: Write>(writer: &mut W, report: &str, colored: bool) -> Result<()> {
    for line in report.lines() {
        if colored && line.starts_with("* ") {
            queue!(
                writer,
                SetForegroundColor(Color::Red),
                Print(line),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(writer, Print(line), Print("\n"))?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes a "did you mean" hint below an error report.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_suggestion<W: Write>(writer: &mut W, suggestion: &str, colored: bool) -> Result<()> {
    let hint = format!("Did you mean \"{suggestion}\"?");

    if colored {
        queue!(
            writer,
            SetForegroundColor(Color::Yellow),
            Print(hint),
            ResetColor,
            Print("\n")
        )?;
    } else {
        queue!(writer, Print(hint), Print("\n"))?;
    }

    writer.flush()?;
    Ok(())
}
