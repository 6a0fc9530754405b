//! Rendering of the `--help` text.

use itertools::Itertools;

use crate::option::{hyphenate, CliOption, Kind};
use crate::registry::OptionRegistry;
use crate::usage::Usage;

/// Column at which the program description is wrapped.
pub const WRAP_WIDTH: usize = 75;

/// Builds the full help text: name, description, usage lines, then one block
/// per option kind that has any options.
#[must_use]
pub fn render_help(
    name: &str,
    description: &str,
    program_name: &str,
    usages: &[Usage],
    registry: &OptionRegistry,
) -> String {
    let mut output = format!("{name}\n\n{}\n\nUsage:\n", wrap(description, WRAP_WIDTH));

    for usage in usages {
        output.push_str(&usage.write(program_name, registry));
        output.push('\n');
    }
    output.push('\n');

    output.push_str(&render_option_blocks(registry));
    output
}

/// The `Commands:`, `Terms:`, `Parameters:` and `Flags:` listing.
#[must_use]
pub fn render_option_blocks(registry: &OptionRegistry) -> String {
    [
        (Kind::Command, "Commands"),
        (Kind::Term, "Terms"),
        (Kind::Param, "Parameters"),
        (Kind::Flag, "Flags"),
    ]
    .into_iter()
    .filter(|(kind, _)| registry.has_kind(*kind))
    .map(|(kind, title)| {
        let entries: String = registry
            .options_of_kind(kind)
            .map(|option| format!("  {}  {}\n", signature(option), option.description))
            .collect();
        format!("{title}:\n{entries}\n")
    })
    .collect()
}

fn signature(option: &CliOption) -> String {
    let names = || std::iter::once(&option.name).chain(&option.aliases);

    match option.kind() {
        Kind::Command => names().join(" | "),
        Kind::Term => match option.arg_type() {
            Some(arg_type) => format!("{}: {}", option.name, arg_type),
            None => option.name.clone(),
        },
        Kind::Param => {
            let hyphenated = names().map(|name| hyphenate(name)).join(" | ");
            match option.arg_type() {
                Some(arg_type) => format!("{hyphenated} = {arg_type}"),
                None => hyphenated,
            }
        }
        Kind::Flag => names().map(|name| hyphenate(name)).join(" | "),
    }
}

/// Greedy word wrap that keeps existing line breaks and never splits a word.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            let mut lines: Vec<String> = Vec::new();
            let mut current = String::new();

            for word in line.split_whitespace() {
                if !current.is_empty() && current.len() + 1 + word.len() > width {
                    lines.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
            lines.push(current);

            lines.join("\n")
        })
        .join("\n")
}
