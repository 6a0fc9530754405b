//! Path utilities for optmatch.
//!
//! This module resolves the grammar file location and expands shell
//! shorthand like `~` in user-supplied paths.

/// Default path for the grammar definition file
const DEFAULT_GRAMMAR_PATH: &str = "~/.optmatch/grammar.yml";

/// Resolves the grammar file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// grammar path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use optmatch_core::config::get_grammar_path;
///
/// // Use default path
/// let default_path = get_grammar_path(None);
///
/// // Use custom path
/// let custom_path = get_grammar_path(Some("/path/to/grammar.yml"));
/// assert_eq!(custom_path, "/path/to/grammar.yml");
/// ```
#[must_use]
pub fn get_grammar_path(grammar_path_arg: Option<&str>) -> String {
    expand_path(grammar_path_arg.unwrap_or(DEFAULT_GRAMMAR_PATH))
}

/// Expands a leading `~` to the current user's home directory.
///
/// Paths without a tilde are returned unchanged.
///
/// ```
/// use optmatch_core::config::expand_path;
///
/// assert_eq!(expand_path("/absolute/path"), "/absolute/path");
/// assert!(!expand_path("~/projects").starts_with('~'));
/// ```
#[must_use]
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_grammar_path_with_custom_path() {
        let result = get_grammar_path(Some("/custom/path/grammar.yml"));
        assert_eq!(result, "/custom/path/grammar.yml");
    }

    #[test]
    fn test_get_grammar_path_with_none() {
        let result = get_grammar_path(None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".optmatch/grammar.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_grammar_path_with_tilde() {
        let result = get_grammar_path(Some("~/my-grammar.yml"));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-grammar.yml"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(expand_path("relative/file.txt"), "relative/file.txt");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = expand_path("~/projects/optmatch");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("projects/optmatch"));
    }
}
