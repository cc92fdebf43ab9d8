//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{build_rows, ApplicationError, IoResultExt, TreeDocument};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Item, ItemId, TreeStore};
use crate::tree_traits::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `treestore --help`".into(),
        ));
    };

    match command {
        Commands::Completion { shell } => return cmd_completion(*shell),
        Commands::Config => {
            let settings = load_settings(cli)?;
            return cmd_config(&settings);
        }
        _ => {}
    }

    let settings = load_settings(cli)?;
    let (path, mut store) = open_store(cli, &settings)?;

    match command {
        Commands::Tree => cmd_tree(&store, &path),
        Commands::Rows => cmd_rows(&store, &settings),
        Commands::Get { id } => cmd_get(&store, id),
        Commands::Children { id } => cmd_list(&store, id, TreeStore::children),
        Commands::Descendants { id } => cmd_list(&store, id, TreeStore::all_children),
        Commands::Parents { id } => cmd_list(&store, id, TreeStore::all_parents),
        Commands::Path { id } => cmd_path(&store, id, &settings),
        Commands::Add { id, label, parent } => cmd_add(&mut store, &path, id, label, parent.as_ref()),
        Commands::Move { id, parent } => cmd_move(&mut store, &path, id, parent.as_ref()),
        Commands::Relabel { id, label } => cmd_relabel(&mut store, &path, id, label),
        Commands::Remove { id } => cmd_remove(&mut store, &path, id),
        Commands::Export => cmd_export(&store),
        Commands::Completion { .. } | Commands::Config => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().with_path_context("resolve working directory", Path::new("."))?,
    };
    Ok(Settings::load(Some(project_dir.as_path()))?)
}

#[instrument(level = "debug", skip(settings))]
fn open_store(cli: &Cli, settings: &Settings) -> CliResult<(PathBuf, TreeStore)> {
    let path = cli
        .file
        .clone()
        .or_else(|| settings.data_file.clone())
        .ok_or(ApplicationError::NoDataFile)?;
    let store = TreeDocument::load(&path)?.into_store();
    debug!("opened {} with {} items", path.display(), store.len());
    Ok((path, store))
}

fn title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_tree(store: &TreeStore, path: &Path) -> CliResult<()> {
    output::line(&store.to_tree(&title(path)));
    Ok(())
}

fn cmd_rows(store: &TreeStore, settings: &Settings) -> CliResult<()> {
    for row in build_rows(store) {
        output::line(&format!(
            "{}\t{}\t{}",
            row.display_path(&settings.path_separator),
            row.label,
            row.category.display(&settings.group_label).unwrap_or("")
        ));
    }
    Ok(())
}

fn cmd_get(store: &TreeStore, id: &ItemId) -> CliResult<()> {
    let item = store.get(id).ok_or_else(|| CliError::NotFound(id.clone()))?;
    output::item_header(item);
    match &item.parent {
        Some(parent) => output::field("parent", parent),
        None => output::field("parent", "-"),
    }
    for (key, value) in &item.meta {
        output::field(key, value);
    }
    Ok(())
}

/// Prints the listing `query` returns for a live `id`.
fn cmd_list<'a>(
    store: &'a TreeStore,
    id: &ItemId,
    query: impl Fn(&'a TreeStore, &ItemId) -> Vec<&'a Item>,
) -> CliResult<()> {
    if !store.contains(id) {
        return Err(CliError::NotFound(id.clone()));
    }
    for item in query(store, id) {
        output::line(item);
    }
    Ok(())
}

fn cmd_path(store: &TreeStore, id: &ItemId, settings: &Settings) -> CliResult<()> {
    let path = store.path(id);
    if path.is_empty() {
        return Err(CliError::NotFound(id.clone()));
    }
    output::line(&path.iter().join(&settings.path_separator));
    Ok(())
}

fn existing(store: &TreeStore, id: &ItemId) -> CliResult<Item> {
    store
        .get(id)
        .cloned()
        .ok_or_else(|| CliError::NotFound(id.clone()))
}

#[instrument(level = "debug", skip(store, path))]
fn cmd_add(
    store: &mut TreeStore,
    path: &Path,
    id: &ItemId,
    label: &str,
    parent: Option<&ItemId>,
) -> CliResult<()> {
    store.add(Item::new(id.clone(), parent.cloned(), label))?;
    output::mutation("added", id);
    cmd_tree(store, path)
}

#[instrument(level = "debug", skip(store, path))]
fn cmd_move(
    store: &mut TreeStore,
    path: &Path,
    id: &ItemId,
    parent: Option<&ItemId>,
) -> CliResult<()> {
    let mut item = existing(store, id)?;
    item.parent = parent.cloned();
    store.update(item)?;
    output::mutation("moved", id);
    cmd_tree(store, path)
}

#[instrument(level = "debug", skip(store, path))]
fn cmd_relabel(store: &mut TreeStore, path: &Path, id: &ItemId, label: &str) -> CliResult<()> {
    let mut item = existing(store, id)?;
    item.label = label.to_string();
    store.update(item)?;
    output::mutation("relabeled", id);
    cmd_tree(store, path)
}

#[instrument(level = "debug", skip(store, path))]
fn cmd_remove(store: &mut TreeStore, path: &Path, id: &ItemId) -> CliResult<()> {
    let removed = store.remove(id);
    if removed.is_empty() {
        return Err(CliError::NotFound(id.clone()));
    }
    output::mutation("removed", id);
    output::field("items", &removed.len());
    for item in &removed {
        output::removed(item);
    }
    cmd_tree(store, path)
}

fn cmd_export(store: &TreeStore) -> CliResult<()> {
    let rendered = TreeDocument::from_store(store).to_toml_string()?;
    output::line(&rendered);
    Ok(())
}

fn cmd_config(settings: &Settings) -> CliResult<()> {
    output::line(&settings.to_toml_string()?);
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
