//! Command-line front end.
//!
//! Each sub-command is a short script of [`Event`]s run against a fresh
//! [`Store`]: load the collection, select or build an entry, then act on it.
//! The resulting list or form is printed to stdout followed by the status
//! line. Failures print the status line to stderr and exit non-zero.
//!
//! # Configuration Sources
//!
//! Lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `--config <file>`, or `~/.config/gallery-admin/config.toml` if present
//! 3. `--set key=value` overrides
//! 4. Dedicated flags (`--api-base`, `--mock`, ...)

use clap::{Args, Parser, Subcommand};
use gallery_admin::domain::MediaKind;
use gallery_admin::form::FormField;
use gallery_admin::infrastructure::{expand_tilde, get_config_file};
use gallery_admin::service::UploadFile;
use gallery_admin::ui::{render_form, render_list, render_status};
use gallery_admin::{handle_event, initialize, observability, Config, Event, Result, Store};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gallery-admin")]
#[command(about = "Manage gallery entries on a REST gallery service")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Override a configuration key (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Collection URL of the gallery service
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Multipart upload URL
    #[arg(long, global = true)]
    upload_endpoint: Option<String>,

    /// Use the in-memory service instead of HTTP
    #[arg(long, global = true)]
    mock: bool,

    /// JSON file seeding the in-memory service (implies --mock)
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<String>,

    /// Tracing filter, e.g. `debug` (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    trace_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entries, newest first
    List {
        /// Only show entries whose id, date, source label or tags contain this text
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Print one entry as form fields
    Show { id: String },
    /// Create or replace an entry
    Save {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Change fields of an existing entry
    Edit {
        id: String,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry
    Delete { id: String },
    /// Upload a media file and print its location
    Upload { path: PathBuf },
}

/// Entry fields settable from the command line.
///
/// Omitted fields keep their current value. Passing any `--image` or
/// `--video` replaces all media, images first.
#[derive(Args, Debug, Default)]
struct EntryFields {
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    source_type: Option<String>,
    #[arg(long)]
    source_label: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    #[arg(long = "image", value_name = "SRC")]
    images: Vec<String>,
    #[arg(long = "video", value_name = "SRC")]
    videos: Vec<String>,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let file = match &self.config {
            Some(path) => Some(expand_tilde(path)),
            None => get_config_file().filter(|path| path.is_file()),
        };
        let base = match file {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };

        let overrides: BTreeMap<String, String> = self.overrides.iter().cloned().collect();
        let mut config = base.merge_map(&overrides);

        if let Some(api_base) = &self.api_base {
            config.api_base.clone_from(api_base);
        }
        if let Some(endpoint) = &self.upload_endpoint {
            config.upload_endpoint = Some(endpoint.clone()).filter(|e| !e.trim().is_empty());
        }
        if let Some(seed) = &self.seed {
            config.seed_file = Some(seed.clone());
            config.mock = true;
        }
        if self.mock {
            config.mock = true;
        }
        if let Some(level) = &self.trace_level {
            config.trace_level = Some(level.clone());
        }
        Ok(config)
    }
}

async fn apply_fields(store: &mut Store, fields: EntryFields) -> Result<()> {
    let edits = [
        (FormField::Date, fields.date),
        (FormField::SourceType, fields.source_type),
        (FormField::SourceLabel, fields.source_label),
        (FormField::Tags, fields.tags),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            handle_event(store, Event::EditField(field, value)).await?;
        }
    }

    if fields.images.is_empty() && fields.videos.is_empty() {
        return Ok(());
    }

    for index in (0..store.form.media.len()).rev() {
        handle_event(store, Event::RemoveMediaRow(index)).await?;
    }
    let media = fields
        .images
        .into_iter()
        .map(|src| (MediaKind::Image, src))
        .chain(fields.videos.into_iter().map(|src| (MediaKind::Video, src)));
    for (index, (kind, src)) in media.enumerate() {
        handle_event(store, Event::AddMediaRow(kind)).await?;
        handle_event(store, Event::SetMediaRow { index, kind, src }).await?;
    }
    Ok(())
}

/// Runs one sub-command and returns what to print above the status line.
async fn run(store: &mut Store, command: Command) -> Result<String> {
    match command {
        Command::List { query } => {
            handle_event(store, Event::Load).await?;
            if let Some(query) = query {
                handle_event(store, Event::Search(query)).await?;
            }
            Ok(render_list(&store.compute_list_view()))
        }
        Command::Show { id } => {
            handle_event(store, Event::Load).await?;
            handle_event(store, Event::Select(id)).await?;
            Ok(render_form(&store.form))
        }
        Command::Save { id, fields } => {
            handle_event(store, Event::Load).await?;
            handle_event(store, Event::NewEntry).await?;
            handle_event(store, Event::EditField(FormField::Id, id)).await?;
            apply_fields(store, fields).await?;
            handle_event(store, Event::Submit).await?;
            Ok(render_list(&store.compute_list_view()))
        }
        Command::Edit { id, fields } => {
            handle_event(store, Event::Load).await?;
            handle_event(store, Event::Select(id)).await?;
            apply_fields(store, fields).await?;
            handle_event(store, Event::Submit).await?;
            Ok(render_list(&store.compute_list_view()))
        }
        Command::Delete { id } => {
            handle_event(store, Event::Remove(id)).await?;
            Ok(String::new())
        }
        Command::Upload { path } => {
            let file = UploadFile::from_path(&path).await?;
            handle_event(store, Event::Upload(Some(file))).await?;
            Ok(String::new())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    observability::init_tracing(&config);
    tracing::debug!(?config, "configuration resolved");

    let mut store = match initialize(&config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut store, cli.command).await {
        Ok(output) => {
            print!("{output}");
            println!("{}", render_status(store.status()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            if store.status().is_error {
                eprintln!("{}", render_status(store.status()));
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
