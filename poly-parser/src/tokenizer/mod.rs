pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot match is kept as [`TokenKind::Symbol`], so every byte of the source is
/// covered by some token.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn product_of_sum() {
        compare_tokens(
            "(1.5+foo)*\tX",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Number, "1.5"),
                (TokenKind::Add, "+"),
                (TokenKind::Name, "foo"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Mul, "*"),
                (TokenKind::Whitespace, "\t"),
                (TokenKind::Name, "X"),
            ],
        );
    }

    #[test]
    fn juxtaposed_and_stray() {
        compare_tokens(
            "3x - 2.",
            [
                (TokenKind::Number, "3"),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2."),
            ],
        );
    }

    #[test]
    fn complete_covers_input() {
        let tokens = tokenize_complete("x1 $");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Name,
            TokenKind::Number,
            TokenKind::Whitespace,
            TokenKind::Symbol,
        ]);
        assert_eq!(tokens.last().map(|token| token.span.clone()), Some(3..4));
    }
}
