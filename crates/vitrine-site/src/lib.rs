//! Vitrine Site: config manifest, startup sequence and document orchestration
//!
//! # Flow
//!
//! ```text
//! config.page.yaml ─┐
//!                   ├─> boot() ─> Site ─> render_document(path) ─> <!DOCTYPE html>…
//! ModuleCatalog ────┘
//! ```
//!
//! [`boot`] is the write phase: it owns the registry mutably, loads every
//! module and validates the route table. The resulting [`Site`] holds the
//! registry behind an `Arc` and only reads from it.

pub mod config;
pub mod document;
pub mod startup;

pub use config::{ConfigError, HeadConfig, HtmlConfig, LinkRef, ScriptRef, SiteConfig, CONFIG_FILE};
pub use document::{RenderedDocument, Site, HOME_ROUTE};
pub use startup::{boot, boot_from_root, StartupError};
