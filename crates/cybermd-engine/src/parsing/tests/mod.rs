//! Parser behavior tests.
//!
//! Trees are asserted with `insta` inline snapshots of the normalized
//! rendering; every input is also run through the invariant checker.


use crate::parsing::{AnomalyKind, NodeKind, parse, parse_with_diagnostics, snapshot};

fn tree(md: &str) -> String {
    let ast = parse(md);
    snapshot::invariants(&ast, md);
    snapshot::normalize(&ast, md).to_string()
}

#[test]
fn heading_with_text() {
    insta::assert_snapshot!(tree("# Title"), @r#"
    Document 0..7
      Heading(1) 0..7
        Text 2..7 "Title"
    "#);
}

#[test]
fn strong_followed_by_text() {
    insta::assert_snapshot!(tree("**bold** text"), @r#"
    Document 0..13
      Paragraph 0..13
        Strong 0..8
          Text 2..6 "bold"
        Text 8..13 " text"
    "#);
}

#[test]
fn fenced_code_with_language() {
    insta::assert_snapshot!(tree("```rust\nfn main() {}\n```\n"), @r"
    Document 0..25
      CodeBlock(rust) 0..24
    ");
}

#[test]
fn bullet_list_items() {
    insta::assert_snapshot!(tree("- one\n- two\n"), @r#"
    Document 0..12
      List(bullet) 0..11
        ListItem 0..5 marker=0..1
          Paragraph 2..5
            Text 2..5 "one"
        ListItem 6..11 marker=6..7
          Paragraph 8..11
            Text 8..11 "two"
    "#);
}

#[test]
fn link_inside_block_quote() {
    insta::assert_snapshot!(tree("> see [docs](https://d.io)\n"), @r#"
    Document 0..27
      BlockQuote 0..26
        Paragraph 2..26
          Text 2..6 "see "
          Link 6..26 label=6..12 target=13..25
            Text 7..11 "docs"
    "#);
}

#[test]
fn ordered_item_with_emphasis_and_code() {
    insta::assert_snapshot!(tree("1. *a* and `b`"), @r#"
    Document 0..14
      List(ordered) 0..14
        ListItem 0..14 marker=0..2
          Paragraph 3..14
            Emphasis 3..6
              Text 4..5 "a"
            Text 6..11 " and "
            Code 11..14 "`b`"
    "#);
}

#[test]
fn emphasis_does_not_cross_into_link_label() {
    insta::assert_snapshot!(tree("*[text*](url)"), @r#"
    Document 0..13
      Paragraph 0..13
        Text 0..1 "*"
        Link 1..13 label=1..8 target=9..12
          Text 2..7 "text*"
    "#);
}

#[test]
fn empty_document() {
    insta::assert_snapshot!(tree(""), @"Document 0..0");
}

#[test]
fn blank_lines_only() {
    let ast = parse("\n\n\n");
    assert!(ast.is_empty());
    assert_eq!(ast.len(), 1);
}

#[test]
fn parsing_is_deterministic() {
    let md = "# T\n\n> a *b* [c](d)\n\n- x\n  - y\n";
    assert_eq!(parse(md), parse(md));
}

#[test]
fn clean_input_reports_no_anomalies() {
    let outcome = parse_with_diagnostics("# Title\n\nSome *text*.\n");
    assert!(outcome.is_clean());
    assert!(outcome.anomalies().is_empty());
}

#[test]
fn unterminated_fence_is_recovered() {
    let md = "text\n\n```\nnever closed\n";
    let outcome = parse_with_diagnostics(md);
    assert!(!outcome.is_clean());
    let kinds: Vec<_> = outcome.anomalies().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AnomalyKind::UnterminatedCodeFence]);

    let ast = outcome.ast();
    let code = ast.blocks().last().unwrap();
    assert_eq!(code.kind, NodeKind::CodeBlock { language: None });
    assert_eq!(code.span.start, 6);
    assert_eq!(code.span.end, md.trim_end().len());
}

#[test]
fn fence_inside_quote_ends_with_the_quote() {
    let md = "> ```\n> code\n\nafter\n";
    let outcome = parse_with_diagnostics(md);
    let ast = outcome.ast();
    let names: Vec<_> = ast.blocks().map(|n| n.kind.name()).collect();
    assert_eq!(names, vec!["BlockQuote", "Paragraph"]);
    assert_eq!(
        outcome.anomalies()[0].kind,
        AnomalyKind::UnterminatedCodeFence
    );
}

#[test]
fn leftover_delimiter_is_text_and_reported() {
    let outcome = parse_with_diagnostics("**bold");
    let ast = outcome.ast();
    let para = ast.blocks().next().unwrap();
    let kinds: Vec<_> = ast
        .children(ast.root())
        .flat_map(|block| block.children.iter())
        .map(|&c| ast.node(c).kind.clone())
        .collect();
    assert_eq!(kinds, vec![NodeKind::Text]);
    assert_eq!(ast.node(para.children[0]).span, para.span);
    assert_eq!(
        outcome.anomalies()[0].kind,
        AnomalyKind::UnmatchedDelimiter
    );
}

#[test]
fn thematic_break_beats_list_item() {
    let ast = parse("* * *\n");
    let block = ast.blocks().next().unwrap();
    assert_eq!(block.kind, NodeKind::ThematicBreak);
}

#[test]
fn heading_levels_and_closing_hashes() {
    let md = "###### Six ##\n";
    let ast = parse(md);
    let heading = ast.blocks().next().unwrap();
    assert_eq!(heading.kind, NodeKind::Heading { level: 6 });
    assert_eq!(heading.span.end, 13);
    let inner = ast.node(heading.children[0]);
    assert_eq!(&md[inner.span.as_range()], "Six");
}
