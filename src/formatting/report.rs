use colored::*;

use super::utils::{format_date, indent, normalize_description, pluralize};
use crate::models::{IssueNode, Tree};

const CHILD_PREFIX: &str = "|  ";
const SEPARATOR_WIDTH: usize = 110;

/// Render a filtered tree as a plain-text report.
pub fn render(tree: &Tree) -> String {
    let mut r = String::new();

    if tree.is_embedder() {
        r.push_str("< This top issue is tracking all children work here");
        if let Tree::Issue(node) = tree {
            if !node.issue_type.is_empty() {
                r.push_str(" and its Title and Description are here only for context");
            }
        }
        r.push_str(". >\n");
    }

    match tree {
        Tree::Issue(node) => write_node(&mut r, node),
        Tree::Virtual { children } => write_children(&mut r, children),
    }

    r.trim_end_matches(|c| matches!(c, '|' | ' ' | '\n')).to_string()
}

fn write_node(r: &mut String, node: &IssueNode) {
    r.push_str(&format!("{}\n", node.summary));
    r.push_str(&format!("Link: {}\n", node.url));
    r.push_str(&format!("Created on {}\n", format_date(&node.created)));

    if let Some(changed_at) = &node.status.changed_at {
        if !node.status.is_empty() {
            r.push_str(&format!(
                "Status changed to `{}` on {} by {}\n",
                node.status.name,
                format_date(changed_at),
                node.status.changed_by
            ));
        }
    }

    let description = normalize_description(&node.description);
    if !description.is_empty() {
        r.push_str("Description:\n");
        r.push_str(&indent(&description, "  "));
        r.push('\n');
    }

    if !node.comments.is_empty() {
        r.push_str("Comments:\n");
        for comment in &node.comments {
            r.push_str(&format!(
                "  - {} on {}:\n",
                comment.author,
                format_date(&comment.created_at)
            ));
            let content = normalize_description(&comment.content);
            if !content.is_empty() {
                r.push_str(&indent(&content, "    "));
                r.push('\n');
            }
        }
    }

    if !node.children.is_empty() {
        write_children(r, &node.children);
    }
}

fn write_children(r: &mut String, children: &[IssueNode]) {
    r.push_str(&format!(
        "{}:\n",
        pluralize(children.len(), "child issue", "child issues")
    ));

    for child in children {
        let mut block = format!("* {}:\n", child.key);
        write_node(&mut block, child);
        r.push_str(&indent(&block, CHILD_PREFIX));
        r.push_str("\n|\n");
    }
}

/// Print a report between separators for review on the terminal.
pub fn print_report(report: &str) {
    println!("{}", "-".repeat(SEPARATOR_WIDTH).dimmed());
    println!("{}", highlight(report));
    println!();
}

/// Style the headings of a rendered report, leaving its text unchanged.
fn highlight(report: &str) -> String {
    report.lines().map(highlight_line).collect::<Vec<_>>().join("\n")
}

fn highlight_line(line: &str) -> String {
    let body = line.trim_start_matches(CHILD_PREFIX);
    let pipes = &line[..line.len() - body.len()];

    let styled = if body.starts_with("< ") && body.ends_with(" >") {
        body.dimmed().italic()
    } else if is_heading(body) {
        body.bold()
    } else {
        return line.to_string();
    };
    format!("{}{}", pipes, styled)
}

fn is_heading(line: &str) -> bool {
    let child_count = line.starts_with(|c: char| c.is_ascii_digit())
        && (line.ends_with(" child issue:") || line.ends_with(" child issues:"));

    matches!(line, "Description:" | "Comments:")
        || (line.starts_with("* ") && line.ends_with(':'))
        || child_count
}
