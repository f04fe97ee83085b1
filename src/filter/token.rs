use crate::error::ScimError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    StringLit(String),
    NumberLit(f64),
    BoolLit(bool),
    NullLit,
    And,
    Or,
    Not,
    Op(&'static str),
    Present,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

const KEYWORD_OPS: &[&str] = &["eq", "ne", "co", "sw", "ew", "gt", "ge", "lt", "le"];

/// Tokenizes a SCIM filter string. Attribute paths (including `schemas`-style URN
/// prefixes with colons, and dotted sub-attribute references) are scanned as a single
/// `Ident` token; quoted literals honor backslash escapes.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScimError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            '"' => {
                let (literal, next) = scan_string(&chars, i)?;
                tokens.push(Token::StringLit(literal));
                i = next;
            }
            _ => {
                let (word, next) = scan_word(&chars, i);
                if word.is_empty() {
                    return Err(ScimError::InvalidFilter(format!(
                        "unexpected character '{}' at position {}",
                        c, i
                    )));
                }
                tokens.push(classify_word(&word));
                i = next;
            }
        }
    }

    Ok(tokens)
}

fn scan_string(chars: &[char], start: usize) -> Result<(String, usize), ScimError> {
    let mut i = start + 1;
    let mut out = String::new();
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '"' => return Ok((out, i + 1)),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Err(ScimError::InvalidFilter("unterminated string literal".to_string()))
}

fn scan_word(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    let mut out = String::new();
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '"') {
            break;
        }
        out.push(c);
        i += 1;
    }
    (out, i)
}

fn classify_word(word: &str) -> Token {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "and" => return Token::And,
        "or" => return Token::Or,
        "not" => return Token::Not,
        "pr" => return Token::Present,
        "true" => return Token::BoolLit(true),
        "false" => return Token::BoolLit(false),
        "null" => return Token::NullLit,
        _ => {}
    }
    if let Some(op) = KEYWORD_OPS.iter().find(|op| **op == lower) {
        return Token::Op(op);
    }
    if let Ok(n) = word.parse::<f64>() {
        return Token::NumberLit(n);
    }
    Token::Ident(word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_simple_equality() {
        let tokens = tokenize(r#"userName eq "bjensen""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("userName".to_string()),
                Token::Op("eq"),
                Token::StringLit("bjensen".to_string()),
            ]
        );
    }

    #[test]
    fn tokenizes_brackets_and_logical_ops() {
        let tokens = tokenize(r#"emails[type eq "work" and primary eq true]"#).unwrap();
        assert_eq!(tokens[0], Token::Ident("emails".to_string()));
        assert_eq!(tokens[1], Token::LBracket);
        assert!(tokens.contains(&Token::And));
        assert!(tokens.contains(&Token::BoolLit(true)));
        assert_eq!(*tokens.last().unwrap(), Token::RBracket);
    }

    #[test]
    fn handles_escaped_quotes_in_strings() {
        let tokens = tokenize(r#"displayName eq "say \"hi\"""#).unwrap();
        assert_eq!(tokens[2], Token::StringLit("say \"hi\"".to_string()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize(r#"userName eq "bjensen"#).is_err());
    }
}
