//! Integration tests for the Post Press parser

use post_press::parser::{Node, Statement};
use post_press::parse;

#[test]
fn test_simple_page() {
    let input = r#"
        template post-card {
            article {
                h2 { slot title }
            }
        }
        section post-list { }
    "#;

    let doc = parse(input).expect("Should parse");
    assert_eq!(doc.statements.len(), 2);
}

#[test]
fn test_nested_structure() {
    let input = r#"
        main site {
            header {
                h1 { text "My Blog" }
            }
            section post-list { }
            footer {
                text "All rights reserved."
            }
        }
    "#;

    let doc = parse(input).expect("Should parse");
    assert_eq!(doc.statements.len(), 1);
    match &doc.statements[0].node {
        Statement::Node(Node::Element(el)) => {
            assert_eq!(el.tag.node.as_str(), "main");
            assert_eq!(el.children.len(), 3);
        }
        other => panic!("Expected element, got {:?}", other),
    }
}

#[test]
fn test_multiple_templates() {
    let input = r#"
        template post-card {
            article { slot title }
        }
        template compact-card {
            div { slot title }
        }
        section post-list { }
    "#;

    let doc = parse(input).expect("Should parse");
    assert_eq!(doc.statements.len(), 3);
}

#[test]
fn test_slots_with_options() {
    let input = r#"
        template post-card {
            h2 { slot title }
            pre { slot code [preserve] }
            div { slot body-preview }
        }
    "#;

    let doc = parse(input).expect("Should parse");
    let Statement::Template(t) = &doc.statements[0].node else {
        panic!("Expected template declaration");
    };
    assert_eq!(t.body.len(), 3);
}

#[test]
fn test_comments_ignored() {
    let input = r#"
        // page skeleton
        template post-card {
            /* the headline */
            h2 { slot title }
        }
        section post-list { }
    "#;

    let doc = parse(input).expect("Should parse");
    assert_eq!(doc.statements.len(), 2);
}

#[test]
fn test_unclosed_brace_is_error() {
    let result = parse("template post-card { article {");
    assert!(result.is_err());
}

#[test]
fn test_reserved_keyword_as_name_is_error() {
    let result = parse("div { slot slot }");
    assert!(result.is_err());
}

#[test]
fn test_error_reports_span() {
    let input = "template post-card { slot }";
    let errors = parse(input).expect_err("Should fail");
    assert!(!errors.is_empty());
    // The formatted report names the offending location
    let report = errors[0].format(input, "test.ptl");
    assert!(report.contains("test.ptl"));
}
