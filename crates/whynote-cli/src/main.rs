mod cmd_add;
mod cmd_delete;
mod cmd_edit;
mod cmd_list;
mod cmd_reveal;
mod config;
mod prompt;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "why")]
#[command(about = "Attach, list, and reveal why-annotations on ranges of source code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: config::GlobalArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotate a range of a file; prompts for anything not given as a flag
    Add(cmd_add::AddArgs),
    /// Change the text and tags of an annotation
    Edit(cmd_edit::EditArgs),
    /// Delete an annotation after confirmation
    Delete(cmd_delete::DeleteArgs),
    /// Print where an annotation points and its hover text
    Reveal {
        /// Annotation ID
        id: session::AnnotationRef,
    },
    /// Show annotations grouped by file and line
    List {
        /// Only this file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only annotations carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inline decorations (range and hover text) for a file
    Decorations {
        /// File to decorate
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the distinct tags in use
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WHY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::Config::from_args(&cli.global)?;
    let mut session = session::Session::open(&config)?;
    let pretty = config.pretty;

    match cli.command {
        Commands::Add(args) => {
            let author = config.author_source();
            let mut prompter = prompt::StdinPrompter::new();
            if let Some(id) = cmd_add::run(&mut session, &mut prompter, author.as_ref(), args)? {
                println!("{}", id);
            }
            Ok(())
        }
        Commands::Edit(args) => {
            let mut prompter = prompt::StdinPrompter::new();
            if let Some(id) = cmd_edit::run(&mut session, &mut prompter, args)? {
                println!("updated {}", id);
            }
            Ok(())
        }
        Commands::Delete(args) => {
            let mut prompter = prompt::StdinPrompter::new();
            if let Some(id) = cmd_delete::run(&mut session, &mut prompter, args)? {
                println!("deleted {}", id);
            }
            Ok(())
        }
        Commands::Reveal { id } => {
            let revealed = cmd_reveal::run(&session, &id)?;
            println!("{}", revealed);
            Ok(())
        }
        Commands::List { file, tag, json } => {
            cmd_list::run_list(&mut session, file, tag, json, pretty)
        }
        Commands::Decorations { file, json } => {
            cmd_list::run_decorations(&mut session, file, json, pretty)
        }
        Commands::Tags { json } => cmd_list::run_tags(&session, json, pretty),
    }
}
