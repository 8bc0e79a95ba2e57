#![doc = include_str!("../README.md")]

mod author;
mod error;
mod ops;
mod projection;
mod store;
mod types;

pub use error::{Error, Result};

pub mod v1 {
    //! Versioned public API for whynote types, operations and projections.
    //!
    //! # Data
    //!
    //! - [`Annotation`]: an explanation attached to a range of one file
    //! - [`AnnotationRange`]: zero-based line/character span
    //! - [`AnnotationCollection`]: every annotation in a workspace, in order
    //!
    //! # Persistence
    //!
    //! - [`store::load`] / [`store::save`] and the [`AnnotationStore`] handle
    //!
    //! # Operations and views
    //!
    //! - [`ops`]: find, add, update, remove
    //! - [`projection`]: per-file filtering, line grouping, sidebar tree and
    //!   inline decorations
    //!
    //! # Example
    //!
    //! ```
    //! use whynote::v1::*;
    //!
    //! let a = Annotation::new(
    //!     "/src/a.ts",
    //!     AnnotationRange::new(3, 0, 3, 12)?,
    //!     "Retry here because the upstream API drops the first request",
    //!     parse_tags("network, workaround"),
    //!     "alex",
    //! )?;
    //! let id = a.id.clone();
    //!
    //! let c = ops::add(AnnotationCollection::new(), a);
    //! let c = ops::update(c, &id, "Retry: upstream drops the first request", vec![]);
    //!
    //! let nodes = projection::tree(&c, "/src/a.ts");
    //! assert_eq!(nodes.len(), 1);
    //! assert_eq!(nodes[0].annotation_id(), Some(id.as_str()));
    //! # Ok::<(), whynote::Error>(())
    //! ```

    pub mod ops {
        pub use crate::ops::{
            add, all_tags, files, filter_by_tag, find_by_id, remove, update,
        };
    }

    pub mod projection {
        pub use crate::projection::{
            Decoration, RevealTarget, TreeNode, by_file, decorations, group_by_line,
            hover_content, sort_for_display, tree, workspace_tree,
        };
    }

    pub mod store {
        pub use crate::store::{AnnotationStore, STORE_FILE, load, save, store_path};
    }

    pub mod author {
        pub use crate::author::{
            AuthorSource, DEFAULT_LOOKUP_TIMEOUT, NoAuthor, StaticAuthor, Timed, resolve_author,
        };
    }

    pub use crate::store::AnnotationStore;
    pub use crate::types::{
        Annotation, AnnotationCollection, AnnotationRange, UNKNOWN_AUTHOR, now_iso8601,
        parse_tags, validate_text,
    };
}
