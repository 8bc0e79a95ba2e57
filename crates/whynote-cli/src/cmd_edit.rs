use crate::prompt::Prompter;
use crate::session::{AnnotationRef, Session};
use anyhow::Result;
use clap::Args;
use whynote::v1::{ops, parse_tags, validate_text};

/// Answer at the tags prompt that removes every tag.
const CLEAR_TAGS: &str = "-";

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Annotation ID
    pub id: AnnotationRef,

    /// New explanation text
    #[arg(short, long)]
    pub text: Option<String>,

    /// New comma-separated tags (an empty string clears them)
    #[arg(long)]
    pub tags: Option<String>,
}

/// Returns the edited id, or `None` when the user backed out.
pub fn run(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    args: EditArgs,
) -> Result<Option<String>> {
    let current = session.require(&args.id)?.clone();

    let prompted = args.text.is_none();
    let Some(text) = args
        .text
        .or_else(|| prompter.input("Edit explanation", Some(current.text.as_str())))
    else {
        tracing::info!(id = %args.id, "edit cancelled at explanation prompt");
        return Ok(None);
    };
    let text = match validate_text(text) {
        Ok(text) => text,
        Err(e) => {
            tracing::info!(id = %args.id, reason = %e, "edit abandoned");
            return Ok(None);
        }
    };

    let tags = match args.tags {
        Some(tags) => parse_tags(&tags),
        None if prompted => {
            let joined = current.tags.join(", ");
            let initial = (!joined.is_empty()).then_some(joined.as_str());
            match prompter.input(
                "Edit tags (comma-separated; blank keeps current, - clears)",
                initial,
            ) {
                Some(tags) if tags.trim() == CLEAR_TAGS => Vec::new(),
                Some(tags) => parse_tags(&tags),
                None => {
                    tracing::info!(id = %args.id, "edit cancelled at tags prompt");
                    return Ok(None);
                }
            }
        }
        None => current.tags.clone(),
    };

    session.set_current_file(current.file_path.clone());
    session.commit(ops::update(
        session.collection().clone(),
        args.id.id(),
        text,
        tags,
    ))?;
    tracing::info!(id = %args.id, "annotation updated");
    Ok(Some(current.id))
}
