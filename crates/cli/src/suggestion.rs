//! Suggesting a command when the one given was not recognized.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;
use optmatch_core::option::Kind;
use optmatch_core::parser::OptParser;
use optmatch_core::tokenizer::tokenize;

/// The command input that the parser could not resolve, if any.
pub fn unrecognized_command<S: AsRef<str>>(parser: &OptParser, args: &[S]) -> Option<String> {
    if !parser.requires_command() {
        return None;
    }

    let tokens = tokenize(args);
    let input = tokens.unmarked.into_iter().next()?;

    match parser.registry().find_command(&input) {
        Some(_) => None,
        None => Some(input),
    }
}

/// The canonical name of the command whose name or alias best matches `input`.
#[must_use]
pub fn suggest_command(parser: &OptParser, input: &str) -> Option<String> {
    let matcher = SkimMatcherV2::default();

    let best = parser
        .registry()
        .options_of_kind(Kind::Command)
        .filter_map(|command| {
            std::iter::once(&command.name)
                .chain(&command.aliases)
                .filter_map(|name| matcher.fuzzy_match(name, input))
                .max()
                .map(|score| (score, command.name.clone()))
        })
        .max_by_key(|(score, _)| *score);

    debug!("Best command match for `{}`: {:?}", input, best);

    best.map(|(_, name)| name)
}
