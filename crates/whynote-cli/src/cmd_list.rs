use crate::config::absolutize;
use crate::render;
use crate::session::Session;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use whynote::v1::projection::{self, TreeNode};
use whynote::v1::{AnnotationCollection, ops};

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn file_key(file: &Path) -> Result<String> {
    let file = absolutize(file)?;
    file.to_str()
        .map(str::to_string)
        .with_context(|| format!("file path is not valid UTF-8: {:?}", file))
}

fn list(
    session: &mut Session,
    file: Option<PathBuf>,
    tag: Option<String>,
    json: bool,
    pretty: bool,
) -> Result<String> {
    if let Some(file) = file {
        session.set_current_file(file_key(&file)?);
    }

    let nodes: Vec<TreeNode> = match tag {
        Some(tag) => {
            let tagged: AnnotationCollection = ops::filter_by_tag(session.collection(), &tag)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
                .into();
            match session.current_file() {
                Some(file) => projection::tree(&tagged, file),
                None => projection::workspace_tree(&tagged),
            }
        }
        None => session.tree(),
    };

    if json {
        to_json(&nodes, pretty)
    } else {
        Ok(render::tree(&nodes))
    }
}

fn decorations(session: &mut Session, file: PathBuf, json: bool, pretty: bool) -> Result<String> {
    session.set_current_file(file_key(&file)?);
    let decos = session.decorations();
    if json {
        to_json(&decos, pretty)
    } else {
        Ok(render::decorations(&decos))
    }
}

fn tags(session: &Session, json: bool, pretty: bool) -> Result<String> {
    let tags = ops::all_tags(session.collection());
    if json {
        to_json(&tags, pretty)
    } else {
        Ok(tags.iter().map(|t| format!("{}\n", t)).collect())
    }
}

fn emit(output: String) {
    if output.ends_with('\n') || output.is_empty() {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

pub fn run_list(
    session: &mut Session,
    file: Option<PathBuf>,
    tag: Option<String>,
    json: bool,
    pretty: bool,
) -> Result<()> {
    emit(list(session, file, tag, json, pretty)?);
    Ok(())
}

pub fn run_decorations(session: &mut Session, file: PathBuf, json: bool, pretty: bool) -> Result<()> {
    emit(decorations(session, file, json, pretty)?);
    Ok(())
}

pub fn run_tags(session: &Session, json: bool, pretty: bool) -> Result<()> {
    emit(tags(session, json, pretty)?);
    Ok(())
}
