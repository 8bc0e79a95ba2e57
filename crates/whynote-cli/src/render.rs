//! Plain-text rendering of sidebar trees and decorations.

use whynote::v1::projection::{Decoration, TreeNode};

pub fn tree(nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::File {
            file_path,
            description,
            children,
            ..
        } => {
            out.push_str(&format!("{}{} ({})\n", indent, file_path, description));
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
        TreeNode::Line {
            label,
            description,
            children,
            ..
        } => {
            out.push_str(&format!("{}{} ({})\n", indent, label, description));
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
        TreeNode::Leaf {
            annotation_id,
            label,
            description,
            reveal,
            ..
        } => {
            out.push_str(&format!(
                "{}{}: {} ({}) [{}]\n",
                indent,
                u64::from(reveal.range.start_line) + 1,
                label,
                description,
                annotation_id
            ));
        }
    }
}

pub fn decorations(decos: &[Decoration]) -> String {
    let mut out = String::new();
    for d in decos {
        out.push_str(&format!("{} [{}]\n", d.range, d.annotation_id));
        for line in d.hover.lines() {
            if !line.is_empty() {
                out.push_str("    ");
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
