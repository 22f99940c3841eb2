#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Folio portfolio page interactivity.
//!
//! Layout: `core` holds DOM-free behavior behind small element/storage/transport
//! traits so it runs under native tests; `config` and `error` carry the page
//! configuration and typed failures; the wasm-only `app` module binds the core
//! to `web-sys` handles and owns the single page controller.

pub mod config;
pub mod core;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::{run_app, shutdown};

pub use config::PageConfig;
pub use error::{ConfigError, ContactError, HistoryError, StorageError};
