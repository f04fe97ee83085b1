use super::ast::{Filter, FilterOp};
use super::token::{tokenize, Token};
use crate::error::ScimError;
use serde_json::Value;

/// Parses a SCIM filter string into a [`Filter`] AST.
///
/// Grammar (RFC 7644 Section 3.4.2.2), precedence low to high:
/// `Expr := Or`, `Or := And ("or" And)*`, `And := Unary ("and" Unary)*`,
/// `Unary := "not" "(" Expr ")" | Primary`,
/// `Primary := "(" Expr ")" | Ident ["[" Expr "]"] | Ident "pr" | Ident Op Literal`.
pub fn parse(input: &str) -> Result<Filter, ScimError> {
    if input.trim().is_empty() {
        return Ok(Filter::Empty);
    }
    let tokens = tokenize(input)?;
    parse_tokens(tokens)
}

/// Parses a filter from an already-tokenized slice, consuming it entirely. Shared with
/// the path parser, which tokenizes a whole PATCH path up front and hands this the
/// bracketed sub-slice belonging to a `valuePath`.
pub(crate) fn parse_tokens(tokens: Vec<Token>) -> Result<Filter, ScimError> {
    let mut parser = Parser { tokens, pos: 0 };
    let filter = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ScimError::InvalidFilter(format!(
            "unexpected trailing input at token {}",
            parser.pos
        )));
    }
    Ok(filter)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ScimError> {
        match self.next() {
            Some(ref t) if t == expected => Ok(()),
            other => Err(ScimError::InvalidFilter(format!(
                "expected {:?}, found {:?}",
                expected, other
            ))),
        }
    }

    fn parse_or(&mut self) -> Result<Filter, ScimError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.next();
            let right = self.parse_and()?;
            left = Filter::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Filter, ScimError> {
        let mut left = self.parse_unary()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.next();
            let right = self.parse_unary()?;
            left = Filter::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Filter, ScimError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.next();
            if matches!(self.peek(), Some(Token::LParen)) {
                self.next();
                let inner = self.parse_or()?;
                self.expect(&Token::RParen)?;
                return Ok(Filter::Not(Box::new(inner)));
            }
            // `not` also binds directly to a bare primary (e.g. `not active eq true`,
            // `not emails[type eq "work"]`) — RFC 7644's ABNF always parenthesizes, but
            // real-world clients and this engine's own test corpus send it bare too.
            let inner = self.parse_unary()?;
            return Ok(Filter::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Filter, ScimError> {
        match self.next() {
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                self.expect(&Token::RParen)?;
                Ok(Filter::Group(Box::new(inner)))
            }
            Some(Token::Ident(name)) => self.parse_attr_expr(name),
            other => Err(ScimError::InvalidFilter(format!(
                "expected attribute path or '(', found {:?}",
                other
            ))),
        }
    }

    fn parse_attr_expr(&mut self, name: String) -> Result<Filter, ScimError> {
        if matches!(self.peek(), Some(Token::LBracket)) {
            self.next();
            let inner = self.parse_or()?;
            self.expect(&Token::RBracket)?;

            // A value-path filter may carry a trailing sub-attribute reference, e.g.
            // `emails[type eq "work"].value ew "@example.com"`. The tokenizer glues the
            // leading `.` onto the following identifier since `.` isn't a word-stop
            // character, so an indexed attribute's continuation always surfaces as a
            // single `Ident` token starting with `.`.
            if let Some(Token::Ident(trailing)) = self.peek() {
                if let Some(sub) = trailing.strip_prefix('.') {
                    let sub = sub.to_string();
                    self.next();
                    return match self.next() {
                        Some(Token::Present) => {
                            Ok(Filter::IndexedPresent(name, Box::new(inner), sub))
                        }
                        Some(Token::Op(op)) => {
                            let literal = self.parse_literal()?;
                            let op = FilterOp::from_str(op).ok_or_else(|| {
                                ScimError::InvalidFilter(format!(
                                    "unknown comparison operator '{}'",
                                    op
                                ))
                            })?;
                            Ok(Filter::IndexedAttr(name, Box::new(inner), sub, op, literal))
                        }
                        other => Err(ScimError::InvalidFilter(format!(
                            "expected 'pr' or a comparison operator after '{}.{}', found {:?}",
                            name, sub, other
                        ))),
                    };
                }
            }

            return Ok(Filter::ValuePath(name, Box::new(inner)));
        }
        match self.next() {
            Some(Token::Present) => Ok(Filter::Present(name)),
            Some(Token::Op(op)) => {
                let literal = self.parse_literal()?;
                let op = FilterOp::from_str(op).ok_or_else(|| {
                    ScimError::InvalidFilter(format!("unknown comparison operator '{}'", op))
                })?;
                Ok(Filter::Attr(name, op, literal))
            }
            other => Err(ScimError::InvalidFilter(format!(
                "expected 'pr' or a comparison operator after '{}', found {:?}",
                name, other
            ))),
        }
    }

    fn parse_literal(&mut self) -> Result<Value, ScimError> {
        match self.next() {
            Some(Token::StringLit(s)) => Ok(Value::String(s)),
            Some(Token::NumberLit(n)) => Ok(serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            Some(Token::BoolLit(b)) => Ok(Value::Bool(b)),
            Some(Token::NullLit) => Ok(Value::Null),
            other => Err(ScimError::InvalidFilter(format!(
                "expected a literal value, found {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_empty() {
        assert_eq!(parse("").unwrap(), Filter::Empty);
        assert_eq!(parse("   ").unwrap(), Filter::Empty);
    }

    #[test]
    fn parses_simple_equality() {
        let filter = parse(r#"userName eq "bjensen""#).unwrap();
        assert_eq!(
            filter,
            Filter::Attr("userName".to_string(), FilterOp::Eq, Value::String("bjensen".to_string()))
        );
    }

    #[test]
    fn parses_present() {
        assert_eq!(parse("title pr").unwrap(), Filter::Present("title".to_string()));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let filter = parse(r#"a eq "1" or b eq "2" and c eq "3""#).unwrap();
        match filter {
            Filter::Or(left, right) => {
                assert_eq!(
                    *left,
                    Filter::Attr("a".to_string(), FilterOp::Eq, Value::String("1".to_string()))
                );
                match *right {
                    Filter::And(_, _) => {}
                    other => panic!("expected And on the right of Or, got {:?}", other),
                }
            }
            other => panic!("expected top-level Or, got {:?}", other),
        }
    }

    #[test]
    fn parses_not_with_parens() {
        let filter = parse(r#"not (userName eq "bjensen")"#).unwrap();
        match filter {
            Filter::Not(inner) => assert_eq!(
                *inner,
                Filter::Attr("userName".to_string(), FilterOp::Eq, Value::String("bjensen".to_string()))
            ),
            other => panic!("expected Not, got {:?}", other),
        }
    }

    #[test]
    fn parses_not_without_parens() {
        let filter = parse(r#"not active eq true"#).unwrap();
        match filter {
            Filter::Not(inner) => assert_eq!(
                *inner,
                Filter::Attr("active".to_string(), FilterOp::Eq, Value::Bool(true))
            ),
            other => panic!("expected Not, got {:?}", other),
        }
    }

    #[test]
    fn parses_grouped_filter_round_trip_shape() {
        let filter = parse(r#"(userName eq "bjensen")"#).unwrap();
        assert!(matches!(filter, Filter::Group(_)));
    }

    #[test]
    fn parses_value_path() {
        let filter = parse(r#"emails[type eq "work" and value co "example.com"]"#).unwrap();
        match filter {
            Filter::ValuePath(attr, inner) => {
                assert_eq!(attr, "emails");
                assert!(matches!(*inner, Filter::And(_, _)));
            }
            other => panic!("expected ValuePath, got {:?}", other),
        }
    }

    #[test]
    fn parses_value_path_with_trailing_subattribute() {
        // S2: `emails[type eq "work"].value ew "@example.com"`.
        let filter = parse(r#"emails[type eq "work"].value ew "@example.com""#).unwrap();
        match filter {
            Filter::IndexedAttr(attr, inner, sub, op, literal) => {
                assert_eq!(attr, "emails");
                assert!(matches!(*inner, Filter::Attr(_, FilterOp::Eq, _)));
                assert_eq!(sub, "value");
                assert_eq!(op, FilterOp::Ew);
                assert_eq!(literal, Value::String("@example.com".to_string()));
            }
            other => panic!("expected IndexedAttr, got {:?}", other),
        }
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse(r#"userName eq "bjensen" garbage"#).is_err());
    }

    #[test]
    fn rejects_unknown_operator() {
        assert!(parse(r#"userName xx "bjensen""#).is_err());
    }
}
