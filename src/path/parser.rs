use super::ast::{Path, PathSegment};
use crate::error::ScimError;
use crate::filter::token::{tokenize, Token};
use crate::filter::parser::parse_tokens;

/// Parses a PATCH path string into a [`Path`].
///
/// Reuses the filter tokenizer so a bracketed `valuePath` filter — which can itself
/// contain nested brackets inside a quoted literal, e.g. `emails[value eq "a[b]"]` — is
/// split on token boundaries rather than raw `find('[')`/`find(']')` substring search.
pub fn parse(input: &str) -> Result<Path, ScimError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ScimError::InvalidPath("empty path".to_string()));
    }

    let mut pos = 0;
    let first_ident = match &tokens[pos] {
        Token::Ident(name) => name.clone(),
        other => {
            return Err(ScimError::InvalidPath(format!(
                "expected attribute name, found {:?}",
                other
            )))
        }
    };
    pos += 1;

    let mut segments = Vec::new();
    let (attr, leading_sub) = split_attr_and_subattr(&first_ident);

    if matches!(tokens.get(pos), Some(Token::LBracket)) {
        pos += 1;
        let close = find_matching_bracket(&tokens, pos)?;
        let inner_tokens = tokens[pos..close].to_vec();
        let filter = parse_tokens(inner_tokens)?;
        segments.push(PathSegment::IndexedAttribute(attr, filter));
        pos = close + 1;

        if let Some(Token::Ident(trailing)) = tokens.get(pos) {
            segments.push(PathSegment::SubAttribute(strip_leading_dot(trailing)));
            pos += 1;
        }
    } else {
        segments.push(PathSegment::Attribute(attr));
        if let Some(sub) = leading_sub {
            segments.push(PathSegment::SubAttribute(sub));
        }
    }

    if pos != tokens.len() {
        return Err(ScimError::InvalidPath(
            "unexpected trailing tokens in path".to_string(),
        ));
    }

    Ok(Path { segments })
}

fn find_matching_bracket(tokens: &[Token], start: usize) -> Result<usize, ScimError> {
    let mut depth = 1;
    let mut i = start;
    while i < tokens.len() {
        match tokens[i] {
            Token::LBracket => depth += 1,
            Token::RBracket => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ScimError::InvalidPath("unbalanced '[' in path".to_string()))
}

fn strip_leading_dot(ident: &str) -> String {
    ident.strip_prefix('.').unwrap_or(ident).to_string()
}

/// Splits `"name.givenName"` into `("name", Some("givenName"))`, and a URN-prefixed
/// extension attribute like `"urn:...:enterprise:2.0:User:manager.displayName"` into
/// `("urn:...:User:manager", Some("displayName"))` — only a dot after the last `:` is a
/// sub-attribute separator, since extension URNs themselves contain dots (`2.0`).
fn split_attr_and_subattr(ident: &str) -> (String, Option<String>) {
    let search_start = ident.rfind(':').map(|i| i + 1).unwrap_or(0);
    let tail = &ident[search_start..];
    match tail.find('.') {
        Some(dot_pos) => {
            let attr = format!("{}{}", &ident[..search_start], &tail[..dot_pos]);
            let sub = tail[dot_pos + 1..].to_string();
            (attr, Some(sub))
        }
        None => (ident.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ast::FilterOp;

    #[test]
    fn parses_simple_attribute() {
        let path = parse("displayName").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Attribute("displayName".to_string())]);
        assert_eq!(path.base_attribute(), "displayName");
    }

    #[test]
    fn parses_dotted_subattribute() {
        let path = parse("name.givenName").unwrap();
        assert_eq!(
            path.segments,
            vec![
                PathSegment::Attribute("name".to_string()),
                PathSegment::SubAttribute("givenName".to_string()),
            ]
        );
        assert_eq!(path.sub_attribute(), Some("givenName"));
    }

    #[test]
    fn parses_enterprise_extension_attribute_with_dotted_version() {
        let path = parse("urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:manager.displayName").unwrap();
        assert_eq!(path.base_attribute(), "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:manager");
        assert_eq!(path.sub_attribute(), Some("displayName"));
    }

    #[test]
    fn parses_indexed_attribute() {
        let path = parse(r#"emails[type eq "work"]"#).unwrap();
        assert_eq!(path.base_attribute(), "emails");
        match path.value_filter().unwrap() {
            crate::filter::Filter::Attr(attr, op, _) => {
                assert_eq!(attr, "type");
                assert_eq!(*op, FilterOp::Eq);
            }
            other => panic!("expected Attr filter, got {:?}", other),
        }
        assert_eq!(path.sub_attribute(), None);
    }

    #[test]
    fn parses_indexed_attribute_with_trailing_subattribute() {
        let path = parse(r#"emails[type eq "work"].value"#).unwrap();
        assert_eq!(path.base_attribute(), "emails");
        assert_eq!(path.sub_attribute(), Some("value"));
        assert!(path.value_filter().is_some());
    }

    #[test]
    fn handles_nested_brackets_inside_quoted_literal() {
        let path = parse(r#"emails[value eq "a[b]"]"#).unwrap();
        assert_eq!(path.base_attribute(), "emails");
        match path.value_filter().unwrap() {
            crate::filter::Filter::Attr(_, _, literal) => {
                assert_eq!(literal, &serde_json::json!("a[b]"));
            }
            other => panic!("unexpected filter shape: {:?}", other),
        }
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        assert!(parse(r#"emails[type eq "work""#).is_err());
    }

    #[test]
    fn rejects_empty_path() {
        assert!(parse("").is_err());
    }
}
