//! Splitting raw process arguments into marked options, unmarked options and
//! non-options.
//!
//! Marked options are dash-prefixed (`-v`, `--name=value`), unmarked options
//! are bare tokens (commands and terms), and non-options are everything after
//! a literal `--`. A flag-shaped token followed by a token that does not start
//! like a flag absorbs it as its value, so `-p secret` is read as `-p=secret`.
//! Negative numbers such as `-1` stay unmarked.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

static COMBINED_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[a-zA-Z]{2,}").expect("static regex must compile"));

static OPTION_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-[a-zA-Z]|--[a-z]\w*(-[a-z]\w*)*)$").expect("static regex must compile")
});

static OPTION_WITH_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-[a-zA-Z]|--[a-z]\w*(-[a-z]\w*)*)=.+").expect("static regex must compile")
});

static OPTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--?[a-zA-Z]").expect("static regex must compile"));

static MARKED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^--?([a-zA-Z]\w*(?:-[a-z]\w*)*)(?:=(.*))?$")
        .expect("static regex must compile")
});

/// Arguments sorted by role, with any format errors found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Base name of the first argument.
    pub program_name: String,
    /// Option name to value; an empty value means none was given.
    pub marked: IndexMap<String, String>,
    pub unmarked: Vec<String>,
    pub non_options: Vec<String>,
    pub errors: Vec<String>,
}

/// Tokenizes `args`, whose first element is the program path.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Tokens {
    let mut tokens = Tokens::default();

    let Some((program, rest)) = args.split_first() else {
        tokens.errors.push("No program name provided".to_string());
        return tokens;
    };

    tokens.program_name = base_name(program.as_ref());

    let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
    let (options, non_options) = match rest.iter().position(|arg| *arg == "--") {
        Some(index) => (&rest[..index], &rest[index + 1..]),
        None => (&rest[..], &[][..]),
    };
    tokens.non_options = non_options.iter().map(ToString::to_string).collect();

    for option in join_values(options, &mut tokens.errors) {
        match MARKED.captures(&option) {
            Some(captures) => {
                let name = captures[1].to_string();
                let value = captures.get(2).map_or("", |m| m.as_str()).to_string();
                tokens.marked.insert(name, value);
            }
            None => tokens.unmarked.push(option),
        }
    }

    debug!(
        "Tokenized {} marked, {} unmarked, {} non-option argument(s)",
        tokens.marked.len(),
        tokens.unmarked.len(),
        tokens.non_options.len()
    );

    tokens
}

fn base_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map_or_else(|| program.to_string(), |name| name.to_string_lossy().into_owned())
}

/// Joins each bare option word with the value token that follows it.
fn join_values(options: &[&str], errors: &mut Vec<String>) -> Vec<String> {
    let mut joined = Vec::with_capacity(options.len());
    let mut iter = options.iter().peekable();

    while let Some(&token) = iter.next() {
        if COMBINED_SHORT.is_match(token) {
            errors.push(format!("Combined short options are not allowed: {token}"));
        } else if OPTION_WORD.is_match(token) {
            match iter.next_if(|next| !OPTION_START.is_match(next)) {
                Some(value) => joined.push(format!("{token}={value}")),
                None => joined.push(token.to_string()),
            }
        } else if OPTION_WITH_VALUE.is_match(token) {
            joined.push(token.to_string());
        } else if OPTION_START.is_match(token) {
            errors.push(format!("Unrecognized flag or parameter format: {token}"));
        } else {
            joined.push(token.to_string());
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_sorts_arguments_by_role() {
        let tokens = tokenize(&[
            "prog", "file", "-1", "-a", "-b", "arg1", "--foo=bar", "--baz-fez", "-2", "--",
            "non1", "non2",
        ]);

        assert_eq!(tokens.program_name, "prog");
        assert_eq!(
            tokens.marked,
            marked(&[("a", ""), ("b", "arg1"), ("foo", "bar"), ("baz-fez", "-2")])
        );
        assert_eq!(tokens.unmarked, vec!["file", "-1"]);
        assert_eq!(tokens.non_options, vec!["non1", "non2"]);
        assert!(tokens.errors.is_empty());
    }

    #[test]
    fn test_program_name_is_base_name() {
        let tokens = tokenize(&["/usr/local/bin/users"]);
        assert_eq!(tokens.program_name, "users");
        assert!(tokens.marked.is_empty());
        assert!(tokens.unmarked.is_empty());
    }

    #[test]
    fn test_empty_args() {
        let tokens = tokenize::<&str>(&[]);
        assert_eq!(tokens.errors, vec!["No program name provided"]);
    }

    #[test]
    fn test_combined_short_options_rejected() {
        let tokens = tokenize(&["prog", "-ab"]);
        assert_eq!(
            tokens.errors,
            vec!["Combined short options are not allowed: -ab"]
        );
        assert!(tokens.marked.is_empty());
        assert!(tokens.unmarked.is_empty());
    }

    #[test]
    fn test_unrecognized_format() {
        let tokens = tokenize(&["prog", "--Foo", "--bar="]);
        assert_eq!(
            tokens.errors,
            vec![
                "Unrecognized flag or parameter format: --Foo",
                "Unrecognized flag or parameter format: --bar=",
            ]
        );
    }

    #[test]
    fn test_value_not_joined_when_explicit() {
        let tokens = tokenize(&["prog", "--name=john", "doe"]);
        assert_eq!(tokens.marked, marked(&[("name", "john")]));
        assert_eq!(tokens.unmarked, vec!["doe"]);
    }

    #[test]
    fn test_value_keeps_equals_signs() {
        let tokens = tokenize(&["prog", "--filter=a=b"]);
        assert_eq!(tokens.marked, marked(&[("filter", "a=b")]));
    }

    #[test]
    fn test_upper_case_short_option() {
        let tokens = tokenize(&["prog", "-V"]);
        assert_eq!(tokens.marked, marked(&[("V", "")]));
    }

    #[test]
    fn test_repeated_option_keeps_last_value() {
        let tokens = tokenize(&["prog", "--level=1", "-v", "--level=3"]);
        assert_eq!(tokens.marked, marked(&[("level", "3"), ("v", "")]));
    }

    #[test]
    fn test_only_first_separator_splits() {
        let tokens = tokenize(&["prog", "a", "--", "-b", "--", "c"]);
        assert_eq!(tokens.unmarked, vec!["a"]);
        assert_eq!(tokens.non_options, vec!["-b", "--", "c"]);
    }
}
