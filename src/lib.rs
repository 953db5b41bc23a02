//! # Snipvault Architecture
//!
//! Snipvault is the **storage core** for user-submitted code snippets:
//! append-only version chains, latest-view resolution, tag grouping,
//! soft delete with a time-boxed recycle bin, consistent pagination,
//! and a read-through cache with user-scoped invalidation. It is a
//! library; transports (chat bots, HTTP handlers) sit on top and
//! consume the facade.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - The stable operation set transports call                 │
//! │  - Converts errors to safe defaults, logs the real cause    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - save: version chain manager                              │
//! │  - query: latest-view resolver (+ read-through cache)       │
//! │  - trash: recycle bin                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                        │
//!                   ▼                        ▼
//! ┌──────────────────────────┐  ┌───────────────────────────────┐
//! │  Storage (store/)        │  │  Cache Port (cache/)          │
//! │  - SnippetStore trait    │  │  - SnippetCache trait         │
//! │  - FileStore, Memory,    │  │  - MemoryCache, NullCache     │
//! │    NullStore             │  │  - user-scoped invalidation   │
//! └──────────────────────────┘  └───────────────────────────────┘
//! ```
//!
//! ## Key invariants
//!
//! - Version numbers within a `(owner_id, name)` chain move strictly
//!   forward and are never reused; edits append rows, never mutate
//!   them.
//! - At most one active row per name holds the maximum version; every
//!   listing resolves to that latest view, picked BEFORE sorting.
//! - `deleted_at` and `deleted_expires_at` travel together; once the
//!   expiry passes, the store expunges the row on its own.
//! - Pagination clamps out-of-range pages and never errors; repeated
//!   reads without writes are identical.
//! - The cache may vanish at any moment with no correctness impact.
//!
//! ## No hidden state
//!
//! Store, cache and config are constructed at startup and injected
//! into [`SnipVault`]. There are no globals, no singletons, and
//! nothing here ever touches stdout or a terminal.

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod store;
pub mod tags;

pub use api::SnipVault;
pub use commands::DeletedEntry;
pub use config::SnipConfig;
pub use error::{Result, SnipError};
pub use model::{FileMeta, FileRow, SnippetMeta, SnippetRow};
pub use pagination::Page;
