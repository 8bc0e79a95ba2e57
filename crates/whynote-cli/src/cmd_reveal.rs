use crate::session::{AnnotationRef, Session};
use anyhow::Result;
use std::fmt;
use whynote::v1::projection::{RevealTarget, hover_content};

/// Where to jump, and what to show once there.
#[derive(Debug)]
pub struct Revealed {
    pub target: RevealTarget,
    pub hover: String,
}

/// `file:line:col`, 1-based like compiler diagnostics, then the hover text.
impl fmt::Display for Revealed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}:{}:{}",
            self.target.file_path,
            u64::from(self.target.range.start_line) + 1,
            u64::from(self.target.range.start_character) + 1
        )?;
        writeln!(f)?;
        write!(f, "{}", self.hover)
    }
}

pub fn run(session: &Session, id: &AnnotationRef) -> Result<Revealed> {
    let annotation = session.require(id)?;
    Ok(Revealed {
        target: RevealTarget {
            file_path: annotation.file_path.clone(),
            range: annotation.range,
        },
        hover: hover_content(annotation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::session;
    use whynote::v1::{Annotation, AnnotationRange, ops};

    #[test]
    fn test_reveal() {
        let (_dir, mut s) = session();
        let a = Annotation::new(
            "/src/a.ts",
            AnnotationRange::new(9, 4, 9, 20).unwrap(),
            "guard against empty input",
            vec!["edge".into()],
            "Alex",
        )
        .unwrap()
        .with_created_at("2026-01-29T10:00:00.000Z");
        s.commit(ops::add(s.collection().clone(), a.clone())).unwrap();

        let revealed = run(&s, &AnnotationRef::Id(a.id.clone())).unwrap();
        assert_eq!(revealed.target.range, a.range);
        assert_eq!(
            revealed.to_string(),
            "/src/a.ts:10:5\n\n**Why:** guard against empty input\n\n**Tags:** edge\n\n*Alex, 2026-01-29T10:00:00.000Z*"
        );
    }

    #[test]
    fn test_reveal_last_representable_position() {
        let (_dir, mut s) = session();
        let a = Annotation::new(
            "/f",
            AnnotationRange::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX).unwrap(),
            "far away",
            vec![],
            "Alex",
        )
        .unwrap();
        s.commit(ops::add(s.collection().clone(), a.clone())).unwrap();

        let revealed = run(&s, &AnnotationRef::Id(a.id)).unwrap();
        assert!(revealed.to_string().starts_with("/f:4294967296:4294967296\n"));
    }

    #[test]
    fn test_reveal_unknown() {
        let (_dir, s) = session();
        assert!(run(&s, &AnnotationRef::Id("nope".into())).is_err());
    }
}
