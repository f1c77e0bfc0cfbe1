use bumpalo::Bump;
use pretty_assertions::assert_eq;

use super::parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};
use crate::parser::{ParseErrorKind, Rule, Span};
use crate::syntax::{Element, ElementKind, SyntaxTree};

fn parse_error(source: &str) -> super::ParseError {
    let arena = Bump::new();
    match parse(&arena, source) {
        Ok(tree) => panic!("Expected '{}' to fail, got:\n{}", source, tree),
        Err(err) => err,
    }
}

#[test]
fn test_root_is_expression() {
    let arena = Bump::new();
    let tree = parse(&arena, "1 + 2").unwrap();
    let root = tree.get(tree.root()).unwrap();
    assert_eq!(root.rule, Rule::expression);
    assert_eq!(root.span, Span(0..5));
    assert_eq!(tree.source(), "1 + 2");
}

/// Every element reachable from the root, in pre-order.
fn elements<'t, 'a>(tree: &'t SyntaxTree<'a>) -> Vec<&'t Element<'a>> {
    let mut found = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        found.extend(tree.get(id));
        stack.extend(tree.children(id).into_iter().rev());
    }
    found
}

#[test]
fn test_whitespace_is_insignificant() {
    let arena = Bump::new();
    let compact = parse(&arena, "a+b*2").unwrap();
    let spaced = parse(&arena, "  a +\n\tb * 2 ").unwrap();
    assert_eq!(compact.len(), spaced.len());
    assert_eq!(compact.to_string(), spaced.to_string());
}

#[test]
fn test_tokens_keep_source_text() {
    let arena = Bump::new();
    let tree = parse(&arena, "arr[i] <= 2.5e1").unwrap();
    let texts: Vec<(Rule, &str)> = elements(&tree)
        .into_iter()
        .filter_map(|element| element.text().map(|text| (element.rule, text)))
        .collect();

    assert_eq!(
        texts,
        vec![
            (Rule::identifier, "arr"),
            (Rule::open_bracket, "["),
            (Rule::identifier, "i"),
            (Rule::close_bracket, "]"),
            (Rule::op_le, "<="),
            (Rule::number_literal, "2.5e1"),
        ]
    );
}

#[test]
fn test_chained_operators_share_one_repetition() {
    let arena = Bump::new();
    let tree = parse(&arena, "1 - 2 - 3 + 4").unwrap();

    let repetitions: Vec<usize> = elements(&tree)
        .into_iter()
        .filter(|element| element.rule == Rule::expression_additive_many)
        .filter_map(|element| match element.kind {
            ElementKind::Repetition { groups } => Some(groups.len()),
            _ => None,
        })
        .collect();
    assert_eq!(repetitions, vec![3]);
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse_error("1 +");
    assert!(
        matches!(&err.kind, ParseErrorKind::UnexpectedToken { found, .. } if found == "end of input"),
        "unexpected error: {:?}",
        err
    );
    assert_eq!(err.span, Span(3..3));
    assert_eq!(err.input, "1 +");
}

#[test]
fn test_unexpected_token() {
    let err = parse_error("1 + )");
    assert!(
        matches!(&err.kind, ParseErrorKind::UnexpectedToken { found, .. } if found == "')'"),
        "unexpected error: {:?}",
        err
    );
    assert_eq!(err.span, Span(4..4));
}

#[test]
fn test_invalid_inputs_fail() {
    for source in ["", "(1", "1 2", "arr[]", "a ? b : c", "x = 1", "1 == 1"] {
        let err = parse_error(source);
        assert!(
            matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }),
            "'{}' failed with {:?}",
            source,
            err
        );
    }
}

#[test]
fn test_max_depth_exceeded() {
    let arena = Bump::new();
    let err = parse_with_max_depth(&arena, "((((((1))))))", 5).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MaxDepthExceeded {
            depth: 6,
            max_depth: 5
        }
    );
    assert_eq!(err.span, Span(5..6));
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("P004"));

    assert!(parse_with_max_depth(&arena, "((((((1))))))", 6).is_ok());
    assert!(parse(&arena, "((((((1))))))").is_ok());
}

#[test]
fn test_nesting_counts_brackets_and_prefixes() {
    let arena = Bump::new();
    // -( a[ ( 1 ) ] ): prefix, paren, bracket, paren.
    assert!(parse_with_max_depth(&arena, "-(a[(1)])", 4).is_ok());
    assert!(matches!(
        parse_with_max_depth(&arena, "-(a[(1)])", 3).unwrap_err().kind,
        ParseErrorKind::MaxDepthExceeded { depth: 4, max_depth: 3 }
    ));

    // Binary operators and sibling groups do not nest.
    assert!(parse_with_max_depth(&arena, "(1) - (2) * -(3)", 2).is_ok());
    assert!(parse_with_max_depth(&arena, "1 - -2 && x[1] < 3", 1).is_ok());
    assert!(matches!(
        parse_with_max_depth(&arena, "! ! ! flag", 2).unwrap_err().kind,
        ParseErrorKind::MaxDepthExceeded { depth: 3, max_depth: 2 }
    ));
}

#[test]
fn test_deep_input_is_rejected_before_parsing() {
    let arena = Bump::new();
    for depth in [1_000, 10_000] {
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let err = parse(&arena, &source).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MaxDepthExceeded {
                depth: DEFAULT_MAX_DEPTH + 1,
                max_depth: DEFAULT_MAX_DEPTH
            }
        );
    }
}

#[test]
fn test_default_limit_fits_small_thread_stack() {
    let parenthesized = format!(
        "{}1{}",
        "(".repeat(DEFAULT_MAX_DEPTH),
        ")".repeat(DEFAULT_MAX_DEPTH)
    );
    let negated = format!("{}1", "- ".repeat(DEFAULT_MAX_DEPTH));

    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            [parenthesized, negated]
                .iter()
                .map(|source| {
                    let arena = Bump::new();
                    parse(&arena, source).map(|tree| tree.len()).map_err(|err| err.kind)
                })
                .collect::<Vec<_>>()
        })
        .unwrap();

    let sizes = handle.join().unwrap();
    assert_eq!(sizes.len(), 2);
    assert!(sizes.iter().all(Result::is_ok), "{:?}", sizes);
}
