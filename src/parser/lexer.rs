//! Lexer for the PTL page language using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Keywords
    #[token("template")]
    Template,
    #[token("slot")]
    Slot,
    #[token("text")]
    Text,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1])
    })]
    String(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Resolve escape sequences in a string literal body.
///
/// `\"` and `\\` map to the escaped character, `\n` to a newline; an
/// unrecognized escape is kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let tokens: Vec<_> = lex("template slot text").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Template, Token::Slot, Token::Text]);
    }

    #[test]
    fn test_hyphenated_identifier() {
        let tokens: Vec<_> = lex("body-preview").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Ident("body-preview".to_string())]);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // "text-block" must not split into the `text` keyword plus a remainder
        let tokens: Vec<_> = lex("text-block templated").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("text-block".to_string()),
                Token::Ident("templated".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifiers_and_strings() {
        let tokens: Vec<_> = lex(r#"article "Read more""#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("article".to_string()),
                Token::String("Read more".to_string())
            ]
        );
    }

    #[test]
    fn test_escaped_quotes_in_string() {
        let tokens: Vec<_> = lex(r#""say \"hi\"""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::String(r#"say "hi""#.to_string())]);
    }

    #[test]
    fn test_escaped_backslash_and_newline() {
        let tokens: Vec<_> = lex(r#""a\\b\nc""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::String("a\\b\nc".to_string())]);
    }

    #[test]
    fn test_unknown_escape_kept_verbatim() {
        let tokens: Vec<_> = lex(r#""semver \d+""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::String(r"semver \d+".to_string())]);
    }

    #[test]
    fn test_delimiters() {
        let tokens: Vec<_> = lex("{ } [ ] ,").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Comma
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens: Vec<_> = lex("slot // comment\ntitle").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Slot, Token::Ident("title".to_string())]);
    }

    #[test]
    fn test_block_comments_skipped() {
        let tokens: Vec<_> = lex("slot /* block comment */ title")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(tokens, vec![Token::Slot, Token::Ident("title".to_string())]);
    }

    #[test]
    fn test_complete_example() {
        let input = r#"
            template post-card {
                h2 { slot title }
                pre { slot code [preserve] }
            }
        "#;
        let tokens: Vec<_> = lex(input).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Template,
                Token::Ident("post-card".to_string()),
                Token::BraceOpen,
                Token::Ident("h2".to_string()),
                Token::BraceOpen,
                Token::Slot,
                Token::Ident("title".to_string()),
                Token::BraceClose,
                Token::Ident("pre".to_string()),
                Token::BraceOpen,
                Token::Slot,
                Token::Ident("code".to_string()),
                Token::BracketOpen,
                Token::Ident("preserve".to_string()),
                Token::BracketClose,
                Token::BraceClose,
                Token::BraceClose,
            ]
        );
    }
}
