//! Pattern language lexer.
//!
//! Tokenizes pattern strings like `SendWithArguments<name = :foo | :bar>`.
//! Tokens are produced on demand so the parser only ever looks one token ahead.

use super::error::LexicalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Integer(i64),
    String(String),
    Symbol(String),    // :sym, stored without the colon
    ClassName(String), // SendWithArguments
    VarName(String),   // attribute names
    True,
    False,
    Nil,
    LAngle,   // <
    RAngle,   // >
    Equals,   // =
    Comma,    // ,
    Pipe,     // |
    LBracket, // [
    RBracket, // ]
}

/// A token together with the exact text it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character of `text` in the input.
    pub offset: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + n).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn read_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn is_ident_start(ch: u8) -> bool {
        ch.is_ascii_alphabetic() || ch == b'_'
    }

    fn is_ident_char(ch: u8) -> bool {
        ch.is_ascii_alphanumeric() || ch == b'_'
    }

    fn unexpected_character(&self, offset: usize) -> LexicalError {
        // Only ever called at a character boundary: the lexer advances over
        // ASCII bytes or whole string literals.
        let ch = self.input[offset..].chars().next().unwrap_or('\0');
        LexicalError::UnexpectedCharacter { ch, offset }
    }

    /// Lex the next token, or `Ok(None)` once only whitespace remains.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, LexicalError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let kind = match ch {
            b'<' | b'>' | b'=' | b',' | b'|' | b'[' | b']' => {
                self.pos += 1;
                match ch {
                    b'<' => TokenKind::LAngle,
                    b'>' => TokenKind::RAngle,
                    b'=' => TokenKind::Equals,
                    b',' => TokenKind::Comma,
                    b'|' => TokenKind::Pipe,
                    b'[' => TokenKind::LBracket,
                    _ => TokenKind::RBracket,
                }
            }
            b':' => {
                if !self.peek_at(1).is_some_and(Self::is_ident_start) {
                    return Err(self.unexpected_character(start));
                }
                self.pos += 1;
                let name = self.read_while(Self::is_ident_char);
                TokenKind::Symbol(name.to_string())
            }
            b'\'' | b'"' => {
                let body = &self.input[start + 1..];
                let Some(len) = body.find(char::from(ch)) else {
                    return Err(self.unexpected_character(start));
                };
                self.pos = start + 1 + len + 1;
                TokenKind::String(body[..len].to_string())
            }
            b'+' | b'-' | b'0'..=b'9' => {
                let sign = usize::from(!ch.is_ascii_digit());
                if !self.peek_at(sign).is_some_and(|c| c.is_ascii_digit()) {
                    return Err(self.unexpected_character(start));
                }
                self.pos += sign;
                self.read_while(|c| c.is_ascii_digit());
                let text = &self.input[start..self.pos];
                // i64's FromStr accepts a leading '+' as well as '-'.
                match text.parse::<i64>() {
                    Ok(n) => TokenKind::Integer(n),
                    Err(_) => {
                        return Err(LexicalError::IntegerOutOfRange {
                            text: text.to_string(),
                            offset: start,
                        });
                    }
                }
            }
            b'A'..=b'Z' => {
                let name = self.read_while(Self::is_ident_char);
                TokenKind::ClassName(name.to_string())
            }
            _ if ch.is_ascii_lowercase() || ch == b'_' => {
                let word = self.read_while(Self::is_ident_char);
                match word {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "nil" => TokenKind::Nil,
                    _ => TokenKind::VarName(word.to_string()),
                }
            }
            _ => return Err(self.unexpected_character(start)),
        };

        let text = &self.input[start..self.pos];
        self.skip_whitespace();
        Ok(Some(Token {
            kind,
            text,
            offset: start,
        }))
    }

    /// Lex the whole input eagerly.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'a>>, LexicalError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Whether `s` is exactly one token of the kind selected by `accept`.
fn is_single_token(s: &str, accept: impl Fn(&TokenKind) -> bool) -> bool {
    match Lexer::new(s).tokenize().as_deref() {
        Ok([token]) => token.text == s && accept(&token.kind),
        _ => false,
    }
}

/// `[A-Z][A-Za-z0-9_]*`
pub fn is_class_name(s: &str) -> bool {
    is_single_token(s, |kind| matches!(kind, TokenKind::ClassName(_)))
}

/// `[a-z_][A-Za-z0-9_]*`, excluding the literal keywords.
pub fn is_var_name(s: &str) -> bool {
    is_single_token(s, |kind| matches!(kind, TokenKind::VarName(_)))
}
