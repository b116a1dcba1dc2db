//! # gno-sync-examples Core Library
//!
//! This crate contains the building blocks of the `gno-sync-examples` tool, a small helper that keeps a
//! local gno examples project next to a cached working copy of the gno main repository.
//!
//! The binary is a thin dispatcher over this library: every operation returns a `Result` and the
//! process exit status is decided in one place, at the top of `main`.
//!
//! ## Modules Overview
//! - [`gnomod`] – Parsing of `gno.mod` manifest files and module path lookup
//! - [`cache`] – Clone-or-pull refresh and removal of the main repository cache
//! - [`config`] – Resolved runtime configuration (cache directory, skip-fetch) and the config file
//! - [`util`] – Shared helpers (home expansion, child processes)


pub mod gnomod;
pub mod cache;
pub mod config;
pub mod util;

pub use gnomod::*;
pub use cache::*;
pub use config::*;
pub use util::*;
