//! Vault commands: init, watch, sort, preview.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use tmv_core::{Note, Settings, SettingsStore};
use tmv_vault::{
    FrontmatterSource, LocalVault, Outcome, Relocator, SkipReason, VaultEvent, VaultWatcher,
    CREATE_SETTLE_DELAY,
};

type VaultRelocator = Relocator<LocalVault, FrontmatterSource>;

fn open(vault_root: &Path) -> Result<(LocalVault, SettingsStore, Settings)> {
    let vault = LocalVault::open(vault_root)
        .with_context(|| format!("opening vault {}", vault_root.display()))?;
    let store = SettingsStore::new(vault.root());
    let settings = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    Ok((vault, store, settings))
}

fn relocator(vault: &LocalVault, settings: Settings) -> VaultRelocator {
    Relocator::new(settings, vault.clone(), FrontmatterSource::new(vault.clone()))
}

pub fn init(vault_root: &Path) -> Result<()> {
    let (vault, store, settings) = open(vault_root)?;
    if store.exists() {
        println!("Settings already present at {}", store.path().display());
        return Ok(());
    }
    store.save(&settings)?;
    println!("Initialized tmv in {}", vault.root().display());
    Ok(())
}

pub fn watch(vault_root: &Path) -> Result<()> {
    let (vault, store, settings) = open(vault_root)?;
    let watcher = VaultWatcher::start(vault.root())?;
    let mut mover = relocator(&vault, settings);
    info!(vault = %vault.root().display(), "watching for note changes");

    loop {
        if let Some(event) = watcher.recv_timeout(Duration::from_secs(1)) {
            handle_event(&mut mover, &store, &vault, &event);
        }
    }
}

/// Run one watcher event through the mover.
///
/// Newly created notes get [`CREATE_SETTLE_DELAY`] for their content to land
/// before being read. Settings are reloaded from disk for every event.
/// Returns `None` for events outside the vault.
pub fn handle_event(
    mover: &mut VaultRelocator,
    store: &SettingsStore,
    vault: &LocalVault,
    event: &VaultEvent,
) -> Option<Outcome> {
    if matches!(event, VaultEvent::Created(_)) {
        thread::sleep(CREATE_SETTLE_DELAY);
    }
    let path = vault.relative(event.path())?;

    match store.load() {
        Ok(settings) => mover.set_settings(settings),
        Err(e) => warn!(error = %e, "keeping previous settings"),
    }

    let note = Note::new(&path);
    let outcome = mover.handle_modification(&note);
    debug!(note = %note, outcome = %outcome, "handled event");
    Some(outcome)
}

#[derive(Debug, Default)]
struct Summary {
    moved: usize,
    in_place: usize,
    skipped: usize,
    failed: usize,
}

pub fn sort(vault_root: &Path, dry_run: bool) -> Result<()> {
    let (vault, _store, settings) = open(vault_root)?;
    let mut mover = relocator(&vault, settings);

    if dry_run {
        for note in vault.notes() {
            match mover.plan(&note) {
                Outcome::Moved { from, to } => println!("{from} -> {to}"),
                Outcome::Skipped(
                    reason @ (SkipReason::EmptyFolderName
                    | SkipReason::FolderMissing
                    | SkipReason::NotAFolder),
                ) => println!("{}: would skip ({reason})", note.path),
                _ => {}
            }
        }
        return Ok(());
    }

    if !mover.settings().enabled {
        warn!("moving is disabled; enable it with `tmv config set enabled true`");
        return Ok(());
    }

    let mut summary = Summary::default();
    for note in vault.notes() {
        match mover.handle_modification(&note) {
            Outcome::Moved { from, to } => {
                println!("{from} -> {to}");
                summary.moved += 1;
            }
            Outcome::AlreadyInPlace => summary.in_place += 1,
            Outcome::Skipped(_) => summary.skipped += 1,
            Outcome::Failed { .. } => summary.failed += 1,
        }
    }

    println!(
        "{} moved, {} already in place, {} skipped, {} failed",
        summary.moved, summary.in_place, summary.skipped, summary.failed
    );
    Ok(())
}

pub fn preview(vault_root: &Path, note: &str) -> Result<()> {
    let (vault, _store, settings) = open(vault_root)?;
    let mover = relocator(&vault, settings);
    let note = Note::new(note);

    match mover.plan(&note) {
        Outcome::Moved { from, to } => println!("{from} -> {to}"),
        Outcome::AlreadyInPlace => println!("{} is already in place", note.path),
        Outcome::Skipped(reason @ (SkipReason::NoMetadata | SkipReason::MissingProperty)) => {
            println!("{}: no target ({reason})", note.path);
        }
        Outcome::Skipped(reason) => println!("{}: would skip ({reason})", note.path),
        Outcome::Failed { .. } => {}
    }
    Ok(())
}
