// Each bench target compiles this module separately and uses part of it.
#![allow(dead_code)]

const NOTE: &str = "# Title\n\n## Section\n\nParagraph with **strong**, *emphasis*, `code` and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted *text*\n> continues\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";

/// `copies` back-to-back copies of a short note touching every block kind.
pub fn notes(copies: usize) -> String {
    NOTE.repeat(copies)
}

/// A long document whose sections nest lists and quotes `depth` levels deep.
pub fn nested_sections(sections: usize, depth: usize) -> String {
    let mut out = String::new();
    for section in 0..sections {
        out.push_str(&format!("# Section {section}\n\n"));
        for level in 0..depth {
            let quote = "> ".repeat(level % 2);
            let indent = "  ".repeat(level);
            out.push_str(&format!(
                "{quote}{} Level *{level}* with `code`\n\n",
                "#".repeat((level + 2).min(6))
            ));
            for item in 0..3 {
                out.push_str(&format!(
                    "{quote}{indent}- item {item} has **bold** and [a link](#s{section}i{item})\n"
                ));
            }
            out.push('\n');
        }
        if section % 4 == 0 {
            out.push_str("```\nlet fenced = \"*not emphasis*\";\n```\n\n");
        }
    }
    out
}

pub fn large_document() -> String {
    nested_sections(50, 4)
}
