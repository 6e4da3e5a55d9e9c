use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, rest},
    sequence::separated_pair,
    IResult,
};

use crate::query::dimension::Dimension;
use crate::query::selection::FilterSelection;

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// One `key:value` pair. The value may be empty and may itself contain `:`.
fn keyed_pair(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(take_while1(is_key_char), char(':'), rest))(input)
}

/// Parse a serialized filter expression into a [`FilterSelection`].
///
/// Canonical grammar: a comma-separated token stream. A token containing `:`
/// opens a new `dimension:value` group; a bare token appends a further value
/// to the most recent group. Both observed wire encodings,
/// `dietary:vegan,be-gliuteno` and `dietary:vegan,cuisine:italu`, parse
/// under this one grammar.
///
/// Lenient by design: empty input yields an empty selection, unknown
/// dimensions are skipped together with their trailing values, and malformed
/// tokens are dropped rather than surfaced as errors. A bad URL parameter
/// degrades to fewer constraints, never to a failed request.
pub fn parse_filter_tokens(raw: &str) -> FilterSelection {
    let mut selection = FilterSelection::new();
    // The group the next bare value belongs to. `None` both before the first
    // keyed token and inside an unknown-dimension group.
    let mut current: Option<Dimension> = None;

    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match keyed_pair(segment) {
            Ok((_, (key, value))) => {
                current = Dimension::from_key(key);
                if let Some(dimension) = current {
                    selection.select(dimension, value.trim().to_lowercase());
                }
            }
            Err(_) => {
                if let Some(dimension) = current {
                    selection.select(dimension, segment.to_lowercase());
                }
            }
        }
    }

    selection
}
