//! # tmv-vault
//!
//! The vault side of topic-mover: filesystem storage, frontmatter metadata,
//! change watching and the relocation controller that ties them together.
//!
//! The controller ([`Relocator`]) only talks to the [`Storage`] and
//! [`MetadataSource`] traits, so it runs unchanged against the local vault
//! or an in-memory fake.

pub mod controller;
pub mod frontmatter;
pub mod guard;
pub mod metadata;
pub mod storage;
pub mod watcher;

pub use controller::{Failure, Outcome, Relocator, SkipReason};
pub use guard::{Clock, MovingSet, SystemClock, SETTLE_DELAY};
pub use metadata::{FrontmatterSource, MetadataSource};
pub use storage::{Entry, LocalVault, Storage};
pub use watcher::{VaultEvent, VaultWatcher, CREATE_SETTLE_DELAY};
