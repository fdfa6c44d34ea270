use logos::{Lexer, Logos};

use crate::model::Argument;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Lexeme {
    #[token("...")]
    Ellipsis,
    #[regex(r"\\.", |lex| lex.slice().chars().nth(1))]
    Escaped(char),
    #[token("\\")]
    DanglingEscape,
    #[regex(r#"["']"#, first_char)]
    Quote(char),
    #[regex(r"[,\s]", first_char)]
    Separator(char),
    #[regex(r#"[^,\s"'\\]"#, first_char)]
    Char(char),
}

fn first_char(lex: &mut Lexer<Lexeme>) -> Option<char> {
    lex.slice().chars().next()
}

/// Splits the text between a call's parentheses into arguments.
///
/// Commas and whitespace separate arguments unless quoted. A quote is closed
/// only by the same mark that opened it, and an unterminated quote runs to the
/// end of the input. A backslash makes the next character literal. An unquoted
/// `...` becomes [`Argument::Variadic`].
pub fn parse_arguments(input: &str) -> Vec<Argument> {
    let mut arguments = Vec::new();
    let mut pending: Option<String> = None;
    let mut quote: Option<char> = None;

    let mut lexer = Lexeme::lexer(input);
    while let Some(lexeme) = lexer.next() {
        let Ok(lexeme) = lexeme else {
            pending
                .get_or_insert_with(String::new)
                .push_str(lexer.slice());
            continue;
        };

        match (lexeme, quote) {
            (Lexeme::Escaped(c), _) | (Lexeme::Char(c), _) => {
                pending.get_or_insert_with(String::new).push(c);
            }
            (Lexeme::DanglingEscape, _) => {}
            (Lexeme::Quote(c), Some(open)) if c == open => quote = None,
            (Lexeme::Quote(c), None) => {
                quote = Some(c);
                // `""` still yields an (empty) argument
                pending.get_or_insert_with(String::new);
            }
            (Lexeme::Quote(c), Some(_)) | (Lexeme::Separator(c), Some(_)) => {
                pending.get_or_insert_with(String::new).push(c);
            }
            (Lexeme::Separator(_), None) => flush(&mut arguments, &mut pending),
            (Lexeme::Ellipsis, Some(_)) => {
                pending.get_or_insert_with(String::new).push_str("...");
            }
            (Lexeme::Ellipsis, None) => {
                flush(&mut arguments, &mut pending);
                arguments.push(Argument::Variadic);
            }
        }
    }
    flush(&mut arguments, &mut pending);

    arguments
}

fn flush(arguments: &mut Vec<Argument>, pending: &mut Option<String>) {
    if let Some(argument) = pending.take() {
        arguments.push(Argument::Literal(argument));
    }
}
