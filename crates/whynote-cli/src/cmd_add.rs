use crate::config::absolutize;
use crate::prompt::Prompter;
use crate::session::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use whynote::v1::author::{AuthorSource, resolve_author};
use whynote::v1::{Annotation, AnnotationRange, ops, parse_tags, validate_text};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// File the annotation belongs to (relative paths are resolved against the current directory)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Selected range, zero-based: "L:C-L:C", "L-L" or "L"
    #[arg(short, long)]
    pub range: AnnotationRange,

    /// Explanation text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

/// Returns the new annotation's id, or `None` when the user backed out.
pub fn run(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    author: &dyn AuthorSource,
    args: AddArgs,
) -> Result<Option<String>> {
    let file = absolutize(&args.file)?;
    let file = file
        .to_str()
        .with_context(|| format!("file path is not valid UTF-8: {:?}", file))?
        .to_string();

    let prompted = args.text.is_none();
    let Some(text) = args
        .text
        .or_else(|| prompter.input("Why is this code written this way?", None))
    else {
        tracing::info!("add cancelled at explanation prompt");
        return Ok(None);
    };
    let text = match validate_text(text) {
        Ok(text) => text,
        Err(e) => {
            tracing::info!(reason = %e, "add abandoned");
            return Ok(None);
        }
    };

    let tags = match args.tags {
        Some(tags) => parse_tags(&tags),
        None if prompted => match prompter.input("Tags (comma-separated)", None) {
            Some(tags) => parse_tags(&tags),
            None => {
                tracing::info!("add cancelled at tags prompt");
                return Ok(None);
            }
        },
        None => Vec::new(),
    };

    let annotation = Annotation::new(file, args.range, text, tags, resolve_author(author))?;
    let id = annotation.id.clone();
    session.set_current_file(annotation.file_path.clone());
    session.commit(ops::add(session.collection().clone(), annotation))?;
    tracing::info!(id = %id, "annotation added");
    Ok(Some(id))
}
