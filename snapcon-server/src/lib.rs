//! # snapcon-server
//!
//! Server component for snapcon: the JSON API over snapper and the static
//! console page.

pub mod api;
pub mod assets;
pub mod config;
pub mod server;

pub use assets::{AssetProvider, DirAssets, EmbeddedAssets};
pub use config::ConsoleConfig;
pub use server::ConsoleServer;
