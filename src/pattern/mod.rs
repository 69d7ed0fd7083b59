//! Pattern language: lexer, parser, matcher model and evaluator.
//!
//! Patterns describe the shape of AST nodes:
//! `SendWithArguments<name = :send_file | :send_data>`.

pub mod error;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod target;

pub use error::{LexicalError, ParseError, SyntaxError};
pub use lexer::{Lexer, Token, TokenKind};
pub use matcher::{Literal, Matcher, NodeMatcher, matches};
pub use parser::Parser;
pub use target::{Target, TargetValue};

/// Compile pattern text into a [`Matcher`].
pub fn parse(text: &str) -> Result<Matcher, ParseError> {
    let matcher = Parser::new(text)?.parse()?;
    log::trace!("compiled pattern {text:?}");
    Ok(matcher)
}
