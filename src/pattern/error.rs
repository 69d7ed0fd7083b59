//! Errors raised while compiling pattern text.
//!
//! The `Display` output of every variant is part of the pattern language's
//! contract: callers embed patterns in rule files and surface these messages
//! verbatim.

use thiserror::Error;

/// Failure to split pattern text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    /// The next non-whitespace character starts no valid token.
    #[error("Unexpected character: \"{ch}\".")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// Digits that do not fit a signed 64-bit integer.
    #[error("Integer literal out of range: \"{text}\".")]
    IntegerOutOfRange { text: String, offset: usize },
}

impl LexicalError {
    /// Byte offset into the pattern text where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            LexicalError::UnexpectedCharacter { offset, .. }
            | LexicalError::IntegerOutOfRange { offset, .. } => *offset,
        }
    }
}

/// A well-formed token stream that does not follow the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Unexpected token: \"{text}\".")]
    UnexpectedToken { text: String, offset: usize },

    #[error("Unexpected end of input.")]
    UnexpectedEnd { offset: usize },
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { offset, .. } | SyntaxError::UnexpectedEnd { offset } => {
                *offset
            }
        }
    }
}

/// Any error produced by [`parse`](super::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.offset(),
            ParseError::Syntax(e) => e.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_quote_the_offending_text() {
        let lex = LexicalError::UnexpectedCharacter { ch: '@', offset: 0 };
        assert_eq!(lex.to_string(), "Unexpected character: \"@\".");

        let syn = SyntaxError::UnexpectedToken {
            text: "43".to_string(),
            offset: 3,
        };
        assert_eq!(syn.to_string(), "Unexpected token: \"43\".");
    }

    #[test]
    fn parse_error_is_transparent() {
        let err: ParseError = SyntaxError::UnexpectedEnd { offset: 4 }.into();
        assert_eq!(err.to_string(), "Unexpected end of input.");
        assert_eq!(err.offset(), 4);
    }
}
