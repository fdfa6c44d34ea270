use std::str::FromStr;

use crate::{error::ParseError, model::ActionCall};

pub use arguments::parse_arguments;

mod arguments;

/// Splits `name(args)` into the trimmed function name and the raw text
/// between the opening parenthesis and its matching closing one.
///
/// Anything after the closing parenthesis is ignored.
pub fn split_call(line: &str) -> Result<(&str, &str), ParseError> {
    let line = line.trim();
    let open = line
        .find('(')
        .ok_or_else(|| ParseError::MissingOpenParen(line.to_owned()))?;

    let name = line[..open].trim();
    if name.is_empty() {
        return Err(ParseError::EmptyFunctionName(line.to_owned()));
    }

    let rest = &line[open + 1..];
    let close =
        find_closing_paren(rest).ok_or_else(|| ParseError::UnterminatedCall(name.to_owned()))?;

    Ok((name, &rest[..close]))
}

fn find_closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(open)) if c == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(c),
            ('(', None) => depth += 1,
            (')', None) if depth == 0 => return Some(index),
            (')', None) => depth -= 1,
            _ => {}
        }
    }

    None
}

impl FromStr for ActionCall {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (function, raw_arguments) = split_call(s)?;

        Ok(ActionCall {
            function: function.to_owned(),
            arguments: parse_arguments(raw_arguments),
        })
    }
}
