//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse PTL source code into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Basic token parsers
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let string_literal = select! {
        Token::String(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Slot option block: [preserve, ...]
    let option_block = identifier
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    // Recursive node parser
    let node = recursive(|node| {
        // Slot: `slot name [options]`
        let slot_node = just(Token::Slot)
            .ignore_then(identifier.clone())
            .then(option_block.clone().or_not())
            .try_map(|(name, options), span: SimpleSpan| {
                let mut preserve_whitespace = false;
                for option in options.unwrap_or_default() {
                    match option.node.as_str() {
                        "preserve" => preserve_whitespace = true,
                        other => {
                            return Err(Rich::custom(
                                span,
                                format!("unknown slot option '{}'", other),
                            ))
                        }
                    }
                }
                Ok(Node::Slot(SlotDecl {
                    name,
                    preserve_whitespace,
                }))
            });

        // Literal text: `text "content"`
        let text_node = just(Token::Text)
            .ignore_then(string_literal.clone())
            .map(|s| Node::Text(s.node));

        // Element: `tag name? { children }`
        // The braces are mandatory, which keeps a bare identifier from being
        // ambiguous with the following element's tag.
        let element = identifier
            .clone()
            .then(identifier.clone().or_not())
            .then(
                node.clone()
                    .repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            )
            .map(|((tag, name), children)| {
                Node::Element(ElementDecl {
                    tag,
                    name,
                    children,
                })
            });

        choice((slot_node, text_node, element))
            .map_with(|n, e| Spanned::new(n, span_range(&e.span())))
            .boxed()
    });

    // Template declaration: `template name { body }`
    let template_decl = just(Token::Template)
        .ignore_then(identifier.clone())
        .then(
            node.clone()
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
        )
        .map(|(name, body)| Statement::Template(TemplateDecl { name, body }));

    // All statements; `template` is a keyword so ordering is unambiguous
    let statement = choice((template_decl, node.map(|n| Statement::Node(n.node))))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Document is a list of statements
    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Document { statements })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_element() {
        let doc = parse("section post-list { }").expect("Should parse");
        assert_eq!(doc.statements.len(), 1);
        match &doc.statements[0].node {
            Statement::Node(Node::Element(el)) => {
                assert_eq!(el.tag.node.as_str(), "section");
                assert_eq!(el.name.as_ref().unwrap().node.as_str(), "post-list");
                assert!(el.children.is_empty());
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_anonymous_element() {
        let doc = parse(r#"div { text "hello" }"#).expect("Should parse");
        match &doc.statements[0].node {
            Statement::Node(Node::Element(el)) => {
                assert!(el.name.is_none());
                assert_eq!(el.children.len(), 1);
                match &el.children[0].node {
                    Node::Text(t) => assert_eq!(t, "hello"),
                    other => panic!("Expected text, got {:?}", other),
                }
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_slot() {
        let doc = parse("h2 { slot title }").expect("Should parse");
        match &doc.statements[0].node {
            Statement::Node(Node::Element(el)) => match &el.children[0].node {
                Node::Slot(slot) => {
                    assert_eq!(slot.name.node.as_str(), "title");
                    assert!(!slot.preserve_whitespace);
                }
                other => panic!("Expected slot, got {:?}", other),
            },
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_slot_with_preserve() {
        let doc = parse("pre { slot code [preserve] }").expect("Should parse");
        match &doc.statements[0].node {
            Statement::Node(Node::Element(el)) => match &el.children[0].node {
                Node::Slot(slot) => {
                    assert_eq!(slot.name.node.as_str(), "code");
                    assert!(slot.preserve_whitespace);
                }
                other => panic!("Expected slot, got {:?}", other),
            },
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_slot_option_error() {
        let result = parse("pre { slot code [bogus] }");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_derived_slot_name() {
        let doc = parse("div { slot body-preview }").expect("Should parse");
        match &doc.statements[0].node {
            Statement::Node(Node::Element(el)) => match &el.children[0].node {
                Node::Slot(slot) => assert_eq!(slot.name.node.as_str(), "body-preview"),
                other => panic!("Expected slot, got {:?}", other),
            },
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_template_declaration() {
        let doc = parse(
            r#"template post-card {
                article {
                    h2 { slot title }
                    div { slot body-preview }
                }
            }"#,
        )
        .expect("Should parse");
        assert_eq!(doc.statements.len(), 1);
        match &doc.statements[0].node {
            Statement::Template(t) => {
                assert_eq!(t.name.node.as_str(), "post-card");
                assert_eq!(t.body.len(), 1);
            }
            other => panic!("Expected template declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_elements() {
        let input = r#"
            main {
                article {
                    header {
                        h2 { slot title }
                    }
                }
            }
        "#;
        let doc = parse(input).expect("Should parse");
        assert_eq!(doc.statements.len(), 1);
    }

    #[test]
    fn test_parse_template_and_mount() {
        let input = r#"
            template post-card {
                article { slot title }
            }
            section post-list { }
        "#;
        let doc = parse(input).expect("Should parse");
        assert_eq!(doc.statements.len(), 2);
        assert!(matches!(&doc.statements[0].node, Statement::Template(_)));
        assert!(matches!(
            &doc.statements[1].node,
            Statement::Node(Node::Element(_))
        ));
    }

    #[test]
    fn test_parse_missing_brace_error() {
        let result = parse("article { slot title");
        assert!(result.is_err());
    }
}
