//! Reading grammar definitions from disk.

use std::fs::File;

use log::debug;

use crate::error::{Error, Result};
use crate::grammar::GrammarDefinition;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Loads a grammar definition from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The YAML is malformed or doesn't match the grammar structure
/// - The grammar declares no options and no usages
///
/// # Examples
///
/// ```no_run
/// use optmatch_core::file_handling::get_grammar_definition;
///
/// let grammar = get_grammar_definition("grammar.yml")?;
/// let parser = grammar.build()?;
/// # Ok::<(), optmatch_core::error::Error>(())
/// ```
pub fn get_grammar_definition(grammar_path: &str) -> Result<GrammarDefinition> {
    let grammar_reader = get_reader("grammar", grammar_path)?;

    let grammar: GrammarDefinition = serde_yaml::from_reader(grammar_reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "grammar".to_string(),
            grammar_path.to_string(),
            e,
        )
    })?;

    if grammar.is_empty() {
        return Err(Error::empty_grammar(grammar_path.to_string()));
    }

    debug!("Loaded grammar `{}` from `{}`", grammar, grammar_path);

    Ok(grammar)
}
