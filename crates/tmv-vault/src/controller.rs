//! File relocation controller.
//!
//! Reacts to "note changed" notifications: reads the note's frontmatter,
//! works out which folder it belongs in and moves it there. Every attempt is
//! isolated; failures are logged and reported as an [`Outcome`], never
//! propagated.

use std::fmt;

use tracing::{debug, error, info, warn};

use tmv_core::{
    build_target_path, is_usable_folder_name, join_path, normalize_folder_name, Note, Settings,
};

use crate::guard::{Clock, MovingSet, SystemClock};
use crate::metadata::MetadataSource;
use crate::storage::{Entry, Storage};

/// Why a note was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The mover is switched off.
    Disabled,
    /// The note is being moved or has just been moved.
    InFlight,
    /// The note has no frontmatter.
    NoMetadata,
    /// The configured property is absent or empty.
    MissingProperty,
    /// The property value normalizes to an empty folder name.
    EmptyFolderName,
    /// The target folder is missing and auto-create is off.
    FolderMissing,
    /// Something other than a folder sits at the target folder path.
    NotAFolder,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "moving disabled",
            Self::InFlight => "move in flight",
            Self::NoMetadata => "no frontmatter",
            Self::MissingProperty => "property missing",
            Self::EmptyFolderName => "empty folder name",
            Self::FolderMissing => "folder missing",
            Self::NotAFolder => "target folder is a file",
        })
    }
}

/// Which storage operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    CreateFolder,
    Move,
}

/// Result of one relocation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    AlreadyInPlace,
    Moved { from: String, to: String },
    Failed { stage: Failure, error: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::AlreadyInPlace => f.write_str("already in place"),
            Self::Moved { from, to } => write!(f, "moved {from} -> {to}"),
            Self::Failed { stage, error } => write!(f, "failed ({stage:?}): {error}"),
        }
    }
}

/// State of a target folder before a move.
enum FolderState {
    Ready,
    NeedsCreate,
}

/// Moves notes into the folder named by their frontmatter.
pub struct Relocator<S, M, C: Clock = SystemClock> {
    settings: Settings,
    storage: S,
    metadata: M,
    moving: MovingSet<C>,
}

impl<S: Storage, M: MetadataSource> Relocator<S, M, SystemClock> {
    #[must_use]
    pub fn new(settings: Settings, storage: S, metadata: M) -> Self {
        Self::with_clock(settings, storage, metadata, SystemClock)
    }
}

impl<S: Storage, M: MetadataSource, C: Clock> Relocator<S, M, C> {
    #[must_use]
    pub fn with_clock(settings: Settings, storage: S, metadata: M, clock: C) -> Self {
        Self {
            settings,
            storage,
            metadata,
            moving: MovingSet::new(clock),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings used for subsequent attempts.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Whether `path` is currently suppressed by the re-entrancy guard.
    pub fn is_moving(&mut self, path: &str) -> bool {
        self.moving.contains(path)
    }

    /// Handle a change notification for `note`.
    pub fn handle_modification(&mut self, note: &Note) -> Outcome {
        if !self.settings.enabled {
            return Outcome::Skipped(SkipReason::Disabled);
        }
        if self.moving.contains(&note.path) {
            debug!(note = %note, "ignoring event for note in flight");
            return Outcome::Skipped(SkipReason::InFlight);
        }
        match self.property_values(note) {
            Ok((main_value, subfolder_value)) => {
                self.move_file_to_folder(note, &main_value, subfolder_value.as_deref())
            }
            Err(reason) => Outcome::Skipped(reason),
        }
    }

    /// Move `note` into the folder derived from the given property values.
    ///
    /// The note's path stays flagged in the re-entrancy guard until the
    /// settle delay has passed, whatever the outcome.
    pub fn move_file_to_folder(
        &mut self,
        note: &Note,
        main_value: &str,
        subfolder_value: Option<&str>,
    ) -> Outcome {
        self.moving.begin(&note.path);
        let outcome = self.relocate(note, main_value, subfolder_value);
        self.moving.settle(&note.path);
        outcome
    }

    /// Predict what handling `note` would do, without touching anything.
    ///
    /// Runs the same folder checks as a real attempt, so a missing folder
    /// with auto-create off or a file in the folder's place is reported as
    /// a skip. A folder that would be created counts as a move. The
    /// `enabled` toggle and the re-entrancy guard are not consulted.
    #[must_use]
    pub fn plan(&self, note: &Note) -> Outcome {
        let (main_value, subfolder_value) = match self.property_values(note) {
            Ok(values) => values,
            Err(reason) => return Outcome::Skipped(reason),
        };
        let Some(folder) = self.target_folder(&main_value, subfolder_value.as_deref()) else {
            return Outcome::Skipped(SkipReason::EmptyFolderName);
        };
        if let Err(reason) = self.folder_state(&folder) {
            return Outcome::Skipped(reason);
        }

        let target = join_path(&folder, &note.name);
        if note.path == target {
            Outcome::AlreadyInPlace
        } else {
            Outcome::Moved {
                from: note.path.clone(),
                to: target,
            }
        }
    }

    fn property_values(&self, note: &Note) -> Result<(String, Option<String>), SkipReason> {
        let metadata = self
            .metadata
            .metadata(note)
            .ok_or(SkipReason::NoMetadata)?;
        let main_value = metadata
            .folder_value(&self.settings.property_name)
            .ok_or(SkipReason::MissingProperty)?;
        let subfolder_value = if self.settings.use_subfolders {
            metadata.folder_value(&self.settings.subfolder_property)
        } else {
            None
        };
        Ok((main_value, subfolder_value))
    }

    fn target_folder(&self, main_value: &str, subfolder_value: Option<&str>) -> Option<String> {
        let normalize = self.settings.normalize_folder_names;
        let main_folder = normalize_folder_name(main_value, normalize);
        if !is_usable_folder_name(&main_folder) {
            return None;
        }
        Some(build_target_path(
            &main_folder,
            subfolder_value,
            &self.settings.base_folder,
            self.settings.use_subfolders,
            normalize,
        ))
    }

    fn folder_state(&self, folder: &str) -> Result<FolderState, SkipReason> {
        match self.storage.resolve(folder) {
            Some(Entry::Folder) => Ok(FolderState::Ready),
            Some(Entry::File) => Err(SkipReason::NotAFolder),
            None if self.settings.create_folders => Ok(FolderState::NeedsCreate),
            None => Err(SkipReason::FolderMissing),
        }
    }

    fn relocate(&self, note: &Note, main_value: &str, subfolder_value: Option<&str>) -> Outcome {
        let Some(folder) = self.target_folder(main_value, subfolder_value) else {
            warn!(
                note = %note,
                property = %self.settings.property_name,
                value = main_value,
                "property value is not a usable folder name"
            );
            return Outcome::Skipped(SkipReason::EmptyFolderName);
        };

        match self.folder_state(&folder) {
            Ok(FolderState::Ready) => {}
            Ok(FolderState::NeedsCreate) => {
                if let Err(e) = self.storage.create_folder(&folder) {
                    error!(folder = %folder, error = %e, "failed to create folder");
                    return Outcome::Failed {
                        stage: Failure::CreateFolder,
                        error: e.to_string(),
                    };
                }
                debug!(folder = %folder, "created folder");
            }
            Err(SkipReason::NotAFolder) => {
                warn!(folder = %folder, "target folder path is occupied by a file");
                return Outcome::Skipped(SkipReason::NotAFolder);
            }
            Err(reason) => {
                warn!(
                    folder = %folder,
                    "target folder does not exist and auto-create is disabled"
                );
                return Outcome::Skipped(reason);
            }
        }

        let target = join_path(&folder, &note.name);
        if note.path == target {
            return Outcome::AlreadyInPlace;
        }

        match self.storage.rename(&note.path, &target) {
            Ok(()) => {
                info!(from = %note.path, to = %target, "moved note");
                Outcome::Moved {
                    from: note.path.clone(),
                    to: target,
                }
            }
            Err(e) => {
                error!(note = %note, to = %target, error = %e, "failed to move note");
                Outcome::Failed {
                    stage: Failure::Move,
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tmv_core::error::{Result, TmvError};
    use tmv_core::Metadata;

    use super::*;
    use crate::guard::testing::ManualClock;
    use crate::guard::SETTLE_DELAY;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        CreateFolder(String),
        Rename(String, String),
    }

    /// In-memory vault acting as both storage and metadata source.
    #[derive(Default)]
    struct FakeVault {
        notes: RefCell<BTreeMap<String, Metadata>>,
        folders: RefCell<BTreeSet<String>>,
        ops: RefCell<Vec<Op>>,
        fail_create: bool,
        fail_move: bool,
    }

    impl FakeVault {
        fn with_note(self, path: &str, yaml: &str) -> Self {
            let meta = if yaml.is_empty() {
                Metadata::default()
            } else {
                Metadata::new(serde_yaml::from_str(yaml).unwrap())
            };
            self.notes.borrow_mut().insert(path.to_string(), meta);
            self
        }

        fn with_bare_note(self, path: &str) -> Self {
            self.notes.borrow_mut().insert(path.to_string(), Metadata::default());
            self
        }

        fn with_folder(self, path: &str) -> Self {
            self.folders.borrow_mut().insert(path.to_string());
            self
        }

        fn ops(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }

        fn renames(&self) -> usize {
            self.ops()
                .iter()
                .filter(|op| matches!(op, Op::Rename(..)))
                .count()
        }
    }

    impl Storage for FakeVault {
        fn resolve(&self, path: &str) -> Option<Entry> {
            if self.folders.borrow().contains(path) {
                Some(Entry::Folder)
            } else if self.notes.borrow().contains_key(path) {
                Some(Entry::File)
            } else {
                None
            }
        }

        fn create_folder(&self, path: &str) -> Result<()> {
            self.ops.borrow_mut().push(Op::CreateFolder(path.to_string()));
            if self.fail_create {
                return Err(TmvError::Storage("read-only vault".to_string()));
            }
            self.folders.borrow_mut().insert(path.to_string());
            Ok(())
        }

        fn rename(&self, from: &str, to: &str) -> Result<()> {
            self.ops
                .borrow_mut()
                .push(Op::Rename(from.to_string(), to.to_string()));
            if self.fail_move {
                return Err(TmvError::Storage("locked".to_string()));
            }
            let mut notes = self.notes.borrow_mut();
            let meta = notes
                .remove(from)
                .ok_or_else(|| TmvError::Storage(format!("{from} does not exist")))?;
            notes.insert(to.to_string(), meta);
            Ok(())
        }
    }

    impl MetadataSource for FakeVault {
        fn metadata(&self, note: &Note) -> Option<Metadata> {
            self.notes
                .borrow()
                .get(&note.path)
                .filter(|meta| !meta.is_empty())
                .cloned()
        }
    }

    fn relocator(
        vault: &FakeVault,
        settings: Settings,
    ) -> (Relocator<&FakeVault, &FakeVault, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let relocator = Relocator::with_clock(settings, vault, vault, clock.clone());
        (relocator, clock)
    }

    /// Log sink shared between the capture subscriber and the test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records every event as plain text.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
        (result, logs)
    }

    fn moved(from: &str, to: &str) -> Outcome {
        Outcome::Moved {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn moves_into_topic_folder() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert_eq!(outcome, moved("Match.md", "soccer/Match.md"));
        assert_eq!(
            vault.ops(),
            vec![
                Op::CreateFolder("soccer".to_string()),
                Op::Rename("Match.md".to_string(), "soccer/Match.md".to_string()),
            ]
        );
    }

    #[test]
    fn base_folder_and_custom_property() {
        let vault = FakeVault::default().with_note("inbox/Plan.md", "category: work");
        let settings = Settings {
            base_folder: "Notes".to_string(),
            property_name: "category".to_string(),
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("inbox/Plan.md"));
        assert_eq!(outcome, moved("inbox/Plan.md", "Notes/work/Plan.md"));
    }

    #[test]
    fn subfolders_nest_under_main_folder() {
        let vault =
            FakeVault::default().with_note("Derby.md", "topic: sports\nsubtopic: soccer");
        let settings = Settings {
            use_subfolders: true,
            subfolder_property: "subtopic".to_string(),
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("Derby.md"));
        assert_eq!(outcome, moved("Derby.md", "sports/soccer/Derby.md"));
    }

    #[test]
    fn missing_subfolder_value_keeps_main_relocation() {
        let vault = FakeVault::default().with_note("Derby.md", "topic: sports\nsubtopic: ''");
        let settings = Settings {
            use_subfolders: true,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("Derby.md"));
        assert_eq!(outcome, moved("Derby.md", "sports/Derby.md"));
    }

    #[test]
    fn subfolder_ignored_when_toggle_off() {
        let vault =
            FakeVault::default().with_note("Derby.md", "topic: sports\nsubtopic: soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Derby.md"));
        assert_eq!(outcome, moved("Derby.md", "sports/Derby.md"));
    }

    #[test]
    fn list_values_use_first_entry() {
        let vault = FakeVault::default().with_note("Derby.md", "topic: [Sports, Leisure]");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Derby.md"));
        assert_eq!(outcome, moved("Derby.md", "sports/Derby.md"));
    }

    #[test]
    fn missing_property_is_a_silent_no_op() {
        let vault = FakeVault::default().with_note("Todo.md", "status: open");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Todo.md"));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingProperty));
        assert!(vault.ops().is_empty());
        assert!(!mover.is_moving("Todo.md"));
    }

    #[test]
    fn notes_without_frontmatter_are_ignored() {
        let vault = FakeVault::default().with_bare_note("Plain.md");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Plain.md"));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NoMetadata));
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn disabled_mover_does_nothing() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let settings = Settings {
            enabled: false,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::Disabled));
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn missing_folder_without_auto_create_is_skipped() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let settings = Settings {
            create_folders: false,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let (outcome, logs) = capture_logs(|| mover.handle_modification(&Note::new("Match.md")));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::FolderMissing));
        assert!(vault.ops().is_empty());
        assert_eq!(vault.resolve("soccer"), None);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("auto-create is disabled"), "{logs}");
    }

    #[test]
    fn existing_folder_without_auto_create_is_used() {
        let vault = FakeVault::default()
            .with_note("Match.md", "topic: Soccer")
            .with_folder("soccer");
        let settings = Settings {
            create_folders: false,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert_eq!(outcome, moved("Match.md", "soccer/Match.md"));
        assert_eq!(vault.renames(), 1);
    }

    #[test]
    fn note_already_in_place_is_not_moved() {
        let vault = FakeVault::default()
            .with_note("soccer/Match.md", "topic: Soccer")
            .with_folder("soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("soccer/Match.md"));
        assert_eq!(outcome, Outcome::AlreadyInPlace);
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn empty_folder_name_issues_no_storage_calls() {
        let vault = FakeVault::default().with_note("Odd.md", "topic: '???'");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let (outcome, logs) = capture_logs(|| mover.handle_modification(&Note::new("Odd.md")));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::EmptyFolderName));
        assert!(vault.ops().is_empty());
        // The guard is still engaged for the attempt.
        assert!(mover.is_moving("Odd.md"));
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("not a usable folder name"), "{logs}");
    }

    #[test]
    fn dot_folder_names_are_skipped() {
        let vault = FakeVault::default()
            .with_note("a.md", "topic: '.'")
            .with_note("b.md", "topic: ' .. '");
        let (mut mover, _) = relocator(&vault, Settings::default());

        assert_eq!(
            mover.handle_modification(&Note::new("a.md")),
            Outcome::Skipped(SkipReason::EmptyFolderName)
        );
        mover.set_settings(Settings {
            normalize_folder_names: false,
            ..Settings::default()
        });
        assert_eq!(
            mover.handle_modification(&Note::new("b.md")),
            Outcome::Skipped(SkipReason::EmptyFolderName)
        );
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn file_at_folder_path_is_skipped() {
        let vault = FakeVault::default()
            .with_note("Match.md", "topic: Soccer")
            .with_bare_note("soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NotAFolder));
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn folder_creation_failure_abandons_move() {
        let vault = FakeVault {
            fail_create: true,
            ..FakeVault::default()
        }
        .with_note("Match.md", "topic: Soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert!(matches!(
            outcome,
            Outcome::Failed {
                stage: Failure::CreateFolder,
                ..
            }
        ));
        assert_eq!(vault.renames(), 0);
    }

    #[test]
    fn move_failure_is_reported_not_propagated() {
        let vault = FakeVault {
            fail_move: true,
            ..FakeVault::default()
        }
        .with_note("Match.md", "topic: Soccer")
        .with_note("Other.md", "topic: Rugby");
        let (mut mover, _) = relocator(&vault, Settings::default());

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert!(matches!(
            outcome,
            Outcome::Failed {
                stage: Failure::Move,
                ..
            }
        ));
        // Other notes are still processed.
        let outcome = mover.handle_modification(&Note::new("Other.md"));
        assert!(matches!(outcome, Outcome::Failed { .. }));
        assert_eq!(vault.renames(), 2);
    }

    #[test]
    fn events_for_a_moved_note_are_suppressed_while_settling() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let (mut mover, clock) = relocator(&vault, Settings::default());
        let note = Note::new("Match.md");

        assert_eq!(
            mover.handle_modification(&note),
            moved("Match.md", "soccer/Match.md")
        );

        // The vault echoes a change for the old path right after the move.
        assert_eq!(
            mover.handle_modification(&note),
            Outcome::Skipped(SkipReason::InFlight)
        );
        clock.advance(SETTLE_DELAY - Duration::from_millis(1));
        assert_eq!(
            mover.handle_modification(&note),
            Outcome::Skipped(SkipReason::InFlight)
        );
        assert_eq!(vault.renames(), 1);

        clock.advance(Duration::from_millis(1));
        assert!(!mover.is_moving("Match.md"));
        // Old path no longer has a note behind it.
        assert_eq!(
            mover.handle_modification(&note),
            Outcome::Skipped(SkipReason::NoMetadata)
        );
    }

    #[test]
    fn moved_note_settles_at_its_new_path() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let (mut mover, _) = relocator(&vault, Settings::default());

        mover.handle_modification(&Note::new("Match.md"));
        let outcome = mover.handle_modification(&Note::new("soccer/Match.md"));
        assert_eq!(outcome, Outcome::AlreadyInPlace);
        assert_eq!(vault.renames(), 1);
    }

    #[test]
    fn guard_is_released_after_failures_too() {
        let vault = FakeVault {
            fail_move: true,
            ..FakeVault::default()
        }
        .with_note("Match.md", "topic: Soccer");
        let (mut mover, clock) = relocator(&vault, Settings::default());

        mover.handle_modification(&Note::new("Match.md"));
        assert!(mover.is_moving("Match.md"));
        clock.advance(SETTLE_DELAY);
        assert!(!mover.is_moving("Match.md"));
    }

    #[test]
    fn normalization_can_be_turned_off() {
        let vault = FakeVault::default().with_note("Match.md", "topic: '  Big Ideas '");
        let settings = Settings {
            normalize_folder_names: false,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let outcome = mover.handle_modification(&Note::new("Match.md"));
        assert_eq!(outcome, moved("Match.md", "Big Ideas/Match.md"));
    }

    #[test]
    fn plan_has_no_side_effects() {
        let vault =
            FakeVault::default().with_note("Derby.md", "topic: Sports\nsubtopic: Table Tennis");
        let settings = Settings {
            use_subfolders: true,
            base_folder: "Notes".to_string(),
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        assert_eq!(
            mover.plan(&Note::new("Derby.md")),
            moved("Derby.md", "Notes/sports/table-tennis/Derby.md")
        );
        assert_eq!(
            mover.plan(&Note::new("Missing.md")),
            Outcome::Skipped(SkipReason::NoMetadata)
        );
        assert!(vault.ops().is_empty());
        assert!(!mover.is_moving("Derby.md"));
    }

    #[test]
    fn plan_agrees_with_folder_checks() {
        let vault = FakeVault::default()
            .with_note("Match.md", "topic: Soccer")
            .with_note("Plan.md", "topic: Work")
            .with_bare_note("work")
            .with_note("rugby/Derby.md", "topic: Rugby")
            .with_folder("rugby");
        let settings = Settings {
            create_folders: false,
            ..Settings::default()
        };
        let (mut mover, _) = relocator(&vault, settings);

        let cases = [
            ("Match.md", Outcome::Skipped(SkipReason::FolderMissing)),
            ("Plan.md", Outcome::Skipped(SkipReason::NotAFolder)),
            ("rugby/Derby.md", Outcome::AlreadyInPlace),
        ];
        for (path, expected) in &cases {
            assert_eq!(&mover.plan(&Note::new(path)), expected, "plan for {path}");
        }
        assert!(vault.ops().is_empty());

        // A real attempt lands on the same outcome.
        for (path, expected) in &cases {
            assert_eq!(&mover.handle_modification(&Note::new(path)), expected, "{path}");
        }
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn plan_counts_a_folder_to_create_as_a_move() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let (mover, _) = relocator(&vault, Settings::default());

        assert_eq!(
            mover.plan(&Note::new("Match.md")),
            moved("Match.md", "soccer/Match.md")
        );
        assert!(vault.ops().is_empty());
    }

    #[test]
    fn settings_changes_apply_to_next_event() {
        let vault = FakeVault::default().with_note("Match.md", "topic: Soccer");
        let (mut mover, _) = relocator(
            &vault,
            Settings {
                enabled: false,
                ..Settings::default()
            },
        );
        assert_eq!(
            mover.handle_modification(&Note::new("Match.md")),
            Outcome::Skipped(SkipReason::Disabled)
        );

        mover.set_settings(Settings::default());
        assert!(mover.settings().enabled);
        assert_eq!(
            mover.handle_modification(&Note::new("Match.md")),
            moved("Match.md", "soccer/Match.md")
        );
    }
}
