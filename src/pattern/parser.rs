//! Pattern language parser.
//!
//! Recursive descent with one token of lookahead:
//!
//! ```text
//! expression := primary ('|' primary)*
//! primary    := node | array | literal
//! node       := CLASS_NAME ('<' attrs? '>')?
//! attrs      := attr (',' attr)*
//! attr       := VAR_NAME '=' expression
//! array      := '[' (expression (',' expression)*)? ']'
//! literal    := INTEGER | STRING | SYMBOL | true | false | nil
//! ```

use super::error::{ParseError, SyntaxError};
use super::lexer::{Lexer, Token, TokenKind};
use super::matcher::{Literal, Matcher, NodeMatcher};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.current.as_ref().map(|t| &t.kind)
    }

    /// Consume the current token and lex the next one.
    fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        let Some(token) = self.current.take() else {
            return Err(self.unexpected());
        };
        self.current = self.lexer.next_token()?;
        Ok(token)
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.peek() == Some(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Error for the current position: the token there, or end of input.
    fn unexpected(&self) -> ParseError {
        match &self.current {
            Some(token) => SyntaxError::UnexpectedToken {
                text: token.text.to_string(),
                offset: token.offset,
            },
            None => SyntaxError::UnexpectedEnd {
                offset: self.lexer.offset(),
            },
        }
        .into()
    }

    /// Parse one expression and require that it spans the whole input.
    pub fn parse(mut self) -> Result<Matcher, ParseError> {
        let matcher = self.parse_expression()?;
        if self.current.is_some() {
            return Err(self.unexpected());
        }
        Ok(matcher)
    }

    fn parse_expression(&mut self) -> Result<Matcher, ParseError> {
        let first = self.parse_primary()?;
        if !self.eat(&TokenKind::Pipe)? {
            return Ok(first);
        }

        let mut alternatives = vec![first];
        loop {
            alternatives.push(self.parse_primary()?);
            if !self.eat(&TokenKind::Pipe)? {
                break;
            }
        }
        Ok(Matcher::Choice(alternatives))
    }

    fn parse_primary(&mut self) -> Result<Matcher, ParseError> {
        let literal = match self.peek() {
            Some(TokenKind::ClassName(_)) => return self.parse_node(),
            Some(TokenKind::LBracket) => return self.parse_array(),
            Some(TokenKind::Integer(n)) => Literal::Integer(*n),
            Some(TokenKind::String(s)) => Literal::String(s.clone()),
            Some(TokenKind::Symbol(s)) => Literal::Symbol(s.clone()),
            Some(TokenKind::True) => Literal::Boolean(true),
            Some(TokenKind::False) => Literal::Boolean(false),
            Some(TokenKind::Nil) => Literal::Nil,
            _ => return Err(self.unexpected()),
        };
        self.advance()?;
        Ok(Matcher::Literal(literal))
    }

    fn parse_node(&mut self) -> Result<Matcher, ParseError> {
        let Some(TokenKind::ClassName(type_name)) = self.peek() else {
            return Err(self.unexpected());
        };
        let mut node = NodeMatcher::new(type_name.clone());
        self.advance()?;

        if self.eat(&TokenKind::LAngle)? && !self.eat(&TokenKind::RAngle)? {
            loop {
                let (name, value) = self.parse_attr()?;
                node.attributes.insert(name, value);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(&TokenKind::RAngle)?;
        }

        Ok(Matcher::Node(node))
    }

    fn parse_attr(&mut self) -> Result<(String, Matcher), ParseError> {
        let Some(TokenKind::VarName(name)) = self.peek() else {
            return Err(self.unexpected());
        };
        let name = name.clone();
        self.advance()?;
        self.expect(&TokenKind::Equals)?;
        let value = self.parse_expression()?;
        Ok((name, value))
    }

    fn parse_array(&mut self) -> Result<Matcher, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if !self.eat(&TokenKind::RBracket)? {
            loop {
                elements.push(self.parse_expression()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(&TokenKind::RBracket)?;
        }
        Ok(Matcher::Array(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Matcher {
        Parser::new(input).and_then(Parser::parse).unwrap()
    }

    fn parse_error(input: &str) -> String {
        Parser::new(input)
            .and_then(Parser::parse)
            .unwrap_err()
            .to_string()
    }

    fn i(n: i64) -> Matcher {
        Matcher::from(n)
    }

    fn foo_with(attr: &str) -> Matcher {
        Matcher::node("Foo").with(attr, 42_i64).into()
    }

    #[test]
    fn test_parser_expression() {
        assert_eq!(parse("42"), i(42));
        assert_eq!(parse("42 | 43"), Matcher::Choice(vec![i(42), i(43)]));
        assert_eq!(
            parse("42 | 43 | 44"),
            Matcher::Choice(vec![i(42), i(43), i(44)])
        );
    }

    #[test]
    fn test_parser_node() {
        assert_eq!(parse("Foo"), Matcher::node("Foo").into());
        assert_eq!(parse("Foo<>"), Matcher::node("Foo").into());
        assert_eq!(
            parse("Foo<a = 42, b = 43>"),
            Matcher::node("Foo").with("a", 42_i64).with("b", 43_i64).into()
        );
    }

    #[test]
    fn test_parser_attribute_order_is_preserved() {
        let Matcher::Node(node) = parse("Foo<b = 1, a = 2, c = 3>") else {
            panic!("Expected Node");
        };
        assert_eq!(node.attributes.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parser_repeated_attribute_last_wins() {
        assert_eq!(
            parse("Foo<a = 1, b = 2, a = 3>"),
            Matcher::node("Foo").with("a", 3_i64).with("b", 2_i64).into()
        );
    }

    #[test]
    fn test_parser_attribute_choice() {
        assert_eq!(
            parse("Foo<a = 42 | 43>"),
            Matcher::node("Foo")
                .with("a", Matcher::Choice(vec![i(42), i(43)]))
                .into()
        );
    }

    #[test]
    fn test_parser_choice_of_nodes() {
        assert_eq!(
            parse("Foo<a = 1> | Bar"),
            Matcher::Choice(vec![
                Matcher::node("Foo").with("a", 1_i64).into(),
                Matcher::node("Bar").into(),
            ])
        );
    }

    #[test]
    fn test_parser_nested_nodes() {
        assert_eq!(
            parse("Foo<a = Bar<b = Baz>>"),
            Matcher::node("Foo")
                .with("a", Matcher::node("Bar").with("b", Matcher::node("Baz")))
                .into()
        );
    }

    #[test]
    fn test_parser_literals() {
        assert_eq!(parse(":a"), Matcher::Literal(Literal::symbol("a")));
        assert_eq!(parse("\"abcd\""), Matcher::Literal(Literal::string("abcd")));
        assert_eq!(parse("''"), Matcher::Literal(Literal::string("")));
        assert_eq!(parse("true"), Matcher::from(true));
        assert_eq!(parse("false"), Matcher::from(false));
        assert_eq!(parse("nil"), Matcher::Literal(Literal::Nil));
        assert_eq!(parse("+1"), i(1));
        assert_eq!(parse("-1"), i(-1));
    }

    #[test]
    fn test_parser_var_names() {
        for name in ["a", "z", "_", "aa", "aA", "aZ", "a0", "a9", "a_", "abcd"] {
            assert_eq!(
                parse(&format!("Foo<{name} = 42>")),
                foo_with(name),
                "Failed for attribute: {name}"
            );
        }
    }

    #[test]
    fn test_parser_class_names() {
        for name in ["A", "Z", "Aa", "Az", "AA", "AZ", "A0", "A9", "A_", "Abcd"] {
            assert_eq!(parse(name), Matcher::node(name).into(), "Failed for: {name}");
        }
    }

    #[test]
    fn test_parser_arrays() {
        assert_eq!(parse("[]"), Matcher::Array(vec![]));
        assert_eq!(parse("[1, 2]"), Matcher::Array(vec![i(1), i(2)]));
        assert_eq!(
            parse("[1 | 2, Foo]"),
            Matcher::Array(vec![
                Matcher::Choice(vec![i(1), i(2)]),
                Matcher::node("Foo").into(),
            ])
        );
    }

    #[test]
    fn test_parser_whitespace() {
        assert_eq!(parse(" 1 \t"), parse("1"));
        assert_eq!(
            parse("\nFoo < a=42 ,b\t=\r43 >\n"),
            parse("Foo<a = 42, b = 43>")
        );
    }

    #[test]
    fn test_parser_lexical_error() {
        assert_eq!(parse_error("@#%"), "Unexpected character: \"@\".");
        assert_eq!(parse_error("Foo<a = 1, @>"), "Unexpected character: \"@\".");
    }

    #[test]
    fn test_parser_trailing_tokens() {
        assert_eq!(parse_error("42 43"), "Unexpected token: \"43\".");
        assert_eq!(parse_error("Foo Bar"), "Unexpected token: \"Bar\".");
        assert_eq!(parse_error("Foo<a = 1>>"), "Unexpected token: \">\".");
        assert_eq!(parse_error("'a' 'b'"), "Unexpected token: \"'b'\".");
    }

    #[test]
    fn test_parser_unexpected_tokens() {
        assert_eq!(parse_error("Foo<A = 1>"), "Unexpected token: \"A\".");
        assert_eq!(parse_error("Foo<a 1>"), "Unexpected token: \"1\".");
        assert_eq!(parse_error("Foo<a = 1,>"), "Unexpected token: \">\".");
        assert_eq!(parse_error("| 1"), "Unexpected token: \"|\".");
        assert_eq!(parse_error("a"), "Unexpected token: \"a\".");
        assert_eq!(parse_error("Foo<true = 1>"), "Unexpected token: \"true\".");
    }

    #[test]
    fn test_parser_premature_end() {
        assert_eq!(parse_error(""), "Unexpected end of input.");
        assert_eq!(parse_error("   "), "Unexpected end of input.");
        assert_eq!(parse_error("Foo<a = 1"), "Unexpected end of input.");
        assert_eq!(parse_error("1 |"), "Unexpected end of input.");
        assert_eq!(parse_error("[1,"), "Unexpected end of input.");
    }

    #[test]
    fn test_parser_error_offsets() {
        let err = Parser::new("42 43").and_then(Parser::parse).unwrap_err();
        assert_eq!(err.offset(), 3);
        let err = Parser::new("Foo<a = 1").and_then(Parser::parse).unwrap_err();
        assert_eq!(err.offset(), 9);
    }
}
