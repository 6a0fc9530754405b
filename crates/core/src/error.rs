use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring a program grammar or loading it from disk.
///
/// Problems with the arguments a user passes are never reported through this
/// type; those end up as plain strings in [`crate::result::OptResult`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate alias: {}", _0)]
    DuplicateAlias(String),

    #[error("Missing required long name among aliases: [{}]", .0.join(", "))]
    MissingLongName(Vec<String>),

    #[error("Alias is not hyphenated lower case or single-letter upper case: {}", _0)]
    InvalidAlias(String),

    #[error("Unsupported argument type: {}", _0)]
    UnsupportedArgType(String),

    #[error("Name not found: {}", _0)]
    NameNotFound(String),

    #[error("Usage argument not a command: {}", _0)]
    NotACommand(String),

    #[error("Multiple commands defined")]
    MultipleCommands,

    #[error("Must define command for each usage")]
    CommandRequired,

    #[error("Cannot add {}s after usages", _0)]
    DeclarationAfterUsage(String),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No options or usages were found in the grammar. Is `{}` empty?", .path)]
    EmptyGrammar { path: String },

    #[error("Error writing output: {}", _0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn empty_grammar(path: String) -> Self {
        Self::EmptyGrammar { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::DuplicateAlias("v".to_string()).to_string(),
            "Duplicate alias: v"
        );
        assert_eq!(
            Error::DeclarationAfterUsage("command".to_string()).to_string(),
            "Cannot add commands after usages"
        );
        assert_eq!(
            Error::MissingLongName(vec!["a".to_string(), "b".to_string()]).to_string(),
            "Missing required long name among aliases: [a, b]"
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let original = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = Error::io_error("grammar".to_string(), "/tmp/g.yml".to_string(), original);
        let message = error.to_string();
        assert!(message.contains("grammar"));
        assert!(message.contains("/tmp/g.yml"));
    }
}
