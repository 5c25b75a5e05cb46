//! Cleaning of free-form move text before it is parsed.

use cube_sim::{Algorithm, NotationError};
use itertools::Itertools;
use log::debug;

use crate::{Error, Result};

/// Replaces typographic quotes and backticks with `'`.
#[must_use]
pub fn replace_quotes(text: &str) -> String {
    text.replace(['‘', '’', '`'], "'")
}

/// Drops everything after `//` on every line and joins the lines back
/// together. Quotes are replaced first.
#[must_use]
pub fn remove_comments(text: &str) -> String {
    replace_quotes(text)
        .split('\n')
        .map(|line| line.split("//").next().unwrap_or_default())
        .collect()
}

/// Joins the parts of a skeleton written by different people, each stripped
/// of its comments on its own so that a comment never swallows the next part.
pub fn join_skeleton<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts.into_iter().map(remove_comments).join("\n")
}

/// Rejects a contribution that uses both `NISS` and parentheses.
///
/// # Errors
///
/// If both notations are present.
pub fn reject_mixed_niss(text: &str) -> Result<()> {
    if text.contains("NISS") && text.contains('(') {
        return Err(Error::InvalidNotation(NotationError::MixedInverseNotation));
    }

    Ok(())
}

/// Parses text after stripping comments.
///
/// # Errors
///
/// If the text is not valid notation.
pub fn parse(text: &str) -> Result<Algorithm> {
    Ok(Algorithm::parse(&remove_comments(text))?)
}

/// The canonical form of a move sequence: comments and rotations removed and
/// every commuting opposite-face pair in face order. Moves are not cancelled.
///
/// # Errors
///
/// If the text is not valid notation.
pub fn normalize(text: &str) -> Result<String> {
    let mut algorithm = parse(text)?;
    algorithm.clear_placements();
    algorithm.normalize();

    let normalized = algorithm.to_string();
    debug!("Normalized {text:?} to {normalized:?}");

    Ok(normalized)
}

/// [`normalize`], split into tokens.
///
/// # Errors
///
/// If the text is not valid notation.
pub fn normalize_to_tokens(text: &str) -> Result<Vec<String>> {
    Ok(normalize(text)?
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect())
}

/// Number of space separated tokens, without parsing.
#[must_use]
pub fn algorithm_length(text: &str) -> usize {
    text.split(' ').filter(|token| !token.is_empty()).count()
}
