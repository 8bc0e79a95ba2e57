use crate::prompt::Prompter;
use crate::session::{AnnotationRef, Session};
use anyhow::Result;
use clap::Args;
use whynote::v1::ops;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Annotation ID
    pub id: AnnotationRef,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Returns the deleted id, or `None` when the user declined.
pub fn run(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    args: DeleteArgs,
) -> Result<Option<String>> {
    let target = session.require(&args.id)?;
    let question = format!("Delete annotation \"{}\"?", target.text);
    let file = target.file_path.clone();

    if !args.yes && !prompter.confirm(&question) {
        tracing::info!(id = %args.id, "delete declined");
        return Ok(None);
    }

    session.set_current_file(file);
    session.commit(ops::remove(session.collection().clone(), args.id.id()))?;
    tracing::info!(id = %args.id, "annotation deleted");
    Ok(Some(args.id.id().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Scripted;
    use crate::session::testing::session;
    use whynote::v1::{Annotation, AnnotationRange, AnnotationStore};

    fn seeded() -> (tempfile::TempDir, Session, Vec<String>) {
        let (dir, mut s) = session();
        let mut ids = Vec::new();
        for (text, line) in [("one", 0), ("two", 3), ("three", 1)] {
            let a = Annotation::new("/a.ts", AnnotationRange::line(line), text, vec![], "A").unwrap();
            ids.push(a.id.clone());
            s.commit(ops::add(s.collection().clone(), a)).unwrap();
        }
        (dir, s, ids)
    }

    fn args(id: &str, yes: bool) -> DeleteArgs {
        DeleteArgs {
            id: AnnotationRef::Id(id.to_string()),
            yes,
        }
    }

    #[test]
    fn test_delete_confirmed() {
        let (dir, mut s, ids) = seeded();
        let mut p = Scripted::new(&[], &[true]);
        let deleted = run(&mut s, &mut p, args(&ids[1], false)).unwrap();
        assert_eq!(deleted.as_deref(), Some(ids[1].as_str()));
        assert!(ops::find_by_id(s.collection(), &ids[1]).is_none());

        let remaining: Vec<&str> = s.collection().iter().map(|a| a.text.as_str()).collect();
        assert_eq!(remaining, vec!["one", "three"]);
        assert_eq!(AnnotationStore::new(dir.path()).load().unwrap(), *s.collection());
    }

    #[test]
    fn test_delete_declined() {
        let (_dir, mut s, ids) = seeded();
        let mut p = Scripted::new(&[], &[false]);
        assert_eq!(run(&mut s, &mut p, args(&ids[0], false)).unwrap(), None);
        assert_eq!(s.collection().len(), 3);
        assert_eq!(p.asked, vec!["Delete annotation \"one\"?"]);
    }

    #[test]
    fn test_delete_yes_skips_prompt() {
        let (_dir, mut s, ids) = seeded();
        let mut p = Scripted::new(&[], &[]);
        assert!(run(&mut s, &mut p, args(&ids[2], true)).unwrap().is_some());
        assert!(p.asked.is_empty());
        assert_eq!(s.collection().len(), 2);
    }

    #[test]
    fn test_delete_unknown_id() {
        let (_dir, mut s, _ids) = seeded();
        let mut p = Scripted::new(&[], &[true]);
        let err = run(&mut s, &mut p, args("missing", true)).unwrap_err();
        assert!(err.to_string().contains("annotation not found: missing"));
        assert_eq!(s.collection().len(), 3);
    }
}
