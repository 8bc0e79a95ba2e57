//! Derived views of an [`AnnotationCollection`] for presentation.
//!
//! Every function here is a pure projection, recomputed on demand after a
//! mutation or a change of the current file. The results are plain data
//! (`TreeNode`, `Decoration`); turning them into editor widgets is the job of
//! whatever front end consumes them.

use crate::ops;
use crate::types::{Annotation, AnnotationCollection, AnnotationRange};
use serde::Serialize;
use std::collections::BTreeMap;

const LABEL_MAX_CHARS: usize = 60;

/// Annotations on `file_path` (exact string match), in collection order.
pub fn by_file<'a>(collection: &'a AnnotationCollection, file_path: &str) -> Vec<&'a Annotation> {
    collection
        .annotations
        .iter()
        .filter(|a| a.file_path == file_path)
        .collect()
}

/// Group by `range.start_line`. Keys ascend; each group keeps input order.
///
/// # Examples
///
/// ```
/// use whynote::v1::{Annotation, AnnotationRange, projection};
///
/// let a = Annotation::new("/a.ts", AnnotationRange::line(3), "a", vec![], "x").unwrap();
/// let b = Annotation::new("/a.ts", AnnotationRange::line(0), "b", vec![], "x").unwrap();
///
/// let groups = projection::group_by_line([&a, &b]);
/// assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
/// ```
pub fn group_by_line<'a, I>(annotations: I) -> BTreeMap<u32, Vec<&'a Annotation>>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut groups: BTreeMap<u32, Vec<&'a Annotation>> = BTreeMap::new();
    for annotation in annotations {
        groups
            .entry(annotation.range.start_line)
            .or_default()
            .push(annotation);
    }
    groups
}

/// Stable ascending sort by start line only; ties keep input order.
pub fn sort_for_display<'a, I>(annotations: I) -> Vec<&'a Annotation>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut sorted: Vec<&'a Annotation> = annotations.into_iter().collect();
    sorted.sort_by_key(|a| a.range.start_line);
    sorted
}

// ============================================================================
// Decorations
// ============================================================================

/// An inline marker: where to draw it and what to show on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub annotation_id: String,
    pub range: AnnotationRange,
    pub hover: String,
}

/// Markdown hover text for one annotation.
pub fn hover_content(annotation: &Annotation) -> String {
    let mut out = format!("**Why:** {}", annotation.text);
    if !annotation.tags.is_empty() {
        out.push_str(&format!("\n\n**Tags:** {}", annotation.tags.join(", ")));
    }
    out.push_str(&format!(
        "\n\n*{}, {}*",
        annotation.author, annotation.created_at
    ));
    out
}

/// Decorations for `file_path`, ordered by start line.
pub fn decorations(collection: &AnnotationCollection, file_path: &str) -> Vec<Decoration> {
    sort_for_display(by_file(collection, file_path))
        .into_iter()
        .map(|a| Decoration {
            annotation_id: a.id.clone(),
            range: a.range,
            hover: hover_content(a),
        })
        .collect()
}

// ============================================================================
// Sidebar tree
// ============================================================================

/// Where a click on a leaf should take the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealTarget {
    pub file_path: String,
    pub range: AnnotationRange,
}

/// One node of the sidebar hierarchy.
///
/// A line with a single annotation is rendered directly as a [`TreeNode::Leaf`];
/// a line with several becomes a [`TreeNode::Line`] holding one leaf each.
/// [`TreeNode::File`] only appears in the workspace-wide view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeNode {
    #[serde(rename_all = "camelCase")]
    File {
        file_path: String,
        label: String,
        description: String,
        children: Vec<TreeNode>,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        line: u32,
        label: String,
        description: String,
        children: Vec<TreeNode>,
    },
    #[serde(rename_all = "camelCase")]
    Leaf {
        annotation_id: String,
        label: String,
        description: String,
        tooltip: String,
        reveal: RevealTarget,
    },
}

impl TreeNode {
    pub fn label(&self) -> &str {
        match self {
            TreeNode::File { label, .. }
            | TreeNode::Line { label, .. }
            | TreeNode::Leaf { label, .. } => label.as_str(),
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::File { children, .. } | TreeNode::Line { children, .. } => {
                children.as_slice()
            }
            TreeNode::Leaf { .. } => &[],
        }
    }

    /// Leaves are the only nodes that carry edit/delete actions.
    pub fn annotation_id(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf { annotation_id, .. } => Some(annotation_id.as_str()),
            _ => None,
        }
    }
}

fn leaf(annotation: &Annotation) -> TreeNode {
    TreeNode::Leaf {
        annotation_id: annotation.id.clone(),
        label: leaf_label(&annotation.text),
        description: if annotation.tags.is_empty() {
            annotation.author.clone()
        } else {
            annotation.tags.join(", ")
        },
        tooltip: hover_content(annotation),
        reveal: RevealTarget {
            file_path: annotation.file_path.clone(),
            range: annotation.range,
        },
    }
}

fn leaf_label(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > LABEL_MAX_CHARS {
        let cut: String = first.chars().take(LABEL_MAX_CHARS - 1).collect();
        format!("{}…", cut.trim_end())
    } else {
        first.to_string()
    }
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 annotation".to_string()
    } else {
        format!("{} annotations", n)
    }
}

fn line_nodes<'a, I>(annotations: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    group_by_line(annotations)
        .into_iter()
        .map(|(line, group)| match group.as_slice() {
            [single] => leaf(single),
            many => TreeNode::Line {
                line,
                label: format!("Line {}", u64::from(line) + 1),
                description: count_label(many.len()),
                children: many.iter().map(|a| leaf(a)).collect(),
            },
        })
        .collect()
}

/// Sidebar hierarchy for a single file.
pub fn tree(collection: &AnnotationCollection, file_path: &str) -> Vec<TreeNode> {
    line_nodes(by_file(collection, file_path))
}

/// Sidebar hierarchy for every file in the workspace, files in first-seen order.
pub fn workspace_tree(collection: &AnnotationCollection) -> Vec<TreeNode> {
    ops::files(collection)
        .into_iter()
        .map(|file| {
            let in_file = by_file(collection, file);
            TreeNode::File {
                file_path: file.to_string(),
                label: file_label(file),
                description: count_label(in_file.len()),
                children: line_nodes(in_file),
            }
        })
        .collect()
}

fn file_label(file_path: &str) -> String {
    std::path::Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_path)
        .to_string()
}
