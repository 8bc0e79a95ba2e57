//! Repository operations over an [`AnnotationCollection`].
//!
//! Mutations take the collection by value and hand it back, leaving every
//! record other than the target untouched and in place. `update` and `remove`
//! are silent no-ops when the id is unknown; callers that need to report a
//! miss must check with [`find_by_id`] first.

use crate::types::{Annotation, AnnotationCollection};

/// First annotation whose id equals `id` exactly.
///
/// # Examples
///
/// ```
/// use whynote::v1::{Annotation, AnnotationCollection, AnnotationRange, ops};
///
/// let a = Annotation::new("/a.rs", AnnotationRange::line(0), "why", vec![], "alex")
///     .unwrap()
///     .with_id("a1");
/// let c = ops::add(AnnotationCollection::new(), a);
///
/// assert_eq!(ops::find_by_id(&c, "a1").unwrap().text, "why");
/// assert!(ops::find_by_id(&c, "nope").is_none());
/// ```
pub fn find_by_id<'a>(collection: &'a AnnotationCollection, id: &str) -> Option<&'a Annotation> {
    collection.annotations.iter().find(|a| a.id == id)
}

/// Append `annotation`. The caller supplies a fully populated record.
pub fn add(mut collection: AnnotationCollection, annotation: Annotation) -> AnnotationCollection {
    collection.annotations.push(annotation);
    collection
}

/// Replace `text` and `tags` of the record with `id`, keeping its identity,
/// location, author and creation time.
///
/// # Examples
///
/// ```
/// use whynote::v1::{Annotation, AnnotationCollection, AnnotationRange, ops};
///
/// let a = Annotation::new("/a.rs", AnnotationRange::line(3), "old", vec!["bug".into()], "alex")
///     .unwrap()
///     .with_id("a1");
/// let c = ops::add(AnnotationCollection::new(), a);
///
/// let c = ops::update(c, "a1", "new text", vec![]);
/// let updated = ops::find_by_id(&c, "a1").unwrap();
/// assert_eq!(updated.text, "new text");
/// assert!(updated.tags.is_empty());
/// assert_eq!(updated.range.start_line, 3);
///
/// // Unknown ids leave the collection as it was.
/// let before = c.clone();
/// assert_eq!(ops::update(c, "missing", "x", vec![]), before);
/// ```
pub fn update(
    mut collection: AnnotationCollection,
    id: &str,
    new_text: impl Into<String>,
    new_tags: Vec<String>,
) -> AnnotationCollection {
    if let Some(annotation) = collection.annotations.iter_mut().find(|a| a.id == id) {
        annotation.text = new_text.into();
        annotation.tags = new_tags;
    }
    collection
}

/// Drop the record with `id`, if present.
pub fn remove(mut collection: AnnotationCollection, id: &str) -> AnnotationCollection {
    collection.annotations.retain(|a| a.id != id);
    collection
}

/// Distinct file paths in first-seen order.
pub fn files(collection: &AnnotationCollection) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for a in &collection.annotations {
        if !seen.contains(&a.file_path.as_str()) {
            seen.push(&a.file_path);
        }
    }
    seen
}

/// Distinct tags across all annotations, in first-seen order.
pub fn all_tags(collection: &AnnotationCollection) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for tag in collection.annotations.iter().flat_map(|a| &a.tags) {
        if !seen.contains(&tag.as_str()) {
            seen.push(tag);
        }
    }
    seen
}

/// Annotations carrying `tag` (exact match), in collection order.
pub fn filter_by_tag<'a>(collection: &'a AnnotationCollection, tag: &str) -> Vec<&'a Annotation> {
    collection
        .annotations
        .iter()
        .filter(|a| a.tags.iter().any(|t| t == tag))
        .collect()
}
