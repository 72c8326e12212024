use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const INDEX: &str = "index.html";
const EMBEDDED_INDEX: &str = include_str!("../ui/index.html");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: Cow<'static, [u8]>,
}

/// Read-only source of the console's static files.
pub trait AssetProvider: Send + Sync {
    /// Looks up `path` relative to the asset root. `""` means the index page.
    fn get(&self, path: &str) -> Option<Asset>;
}

/// The single-page console compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetProvider for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Asset> {
        match normalize(path)?.as_str() {
            INDEX => Some(Asset {
                content_type: content_type(INDEX),
                body: Cow::Borrowed(EMBEDDED_INDEX.as_bytes()),
            }),
            _ => None,
        }
    }
}

/// Files below a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetProvider for DirAssets {
    fn get(&self, path: &str) -> Option<Asset> {
        let relative = normalize(path)?;
        let full = self.root.join(&relative);
        match std::fs::read(&full) {
            Ok(body) => Some(Asset {
                content_type: content_type(&relative),
                body: Cow::Owned(body),
            }),
            Err(e) => {
                debug!(path = %full.display(), error = %e, "asset not readable");
                None
            }
        }
    }
}

/// Maps a request path to a relative file path, or `None` if it tries to
/// leave the asset root.
fn normalize(path: &str) -> Option<String> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(INDEX.to_string());
    }
    if trimmed.contains('\\') {
        return None;
    }

    let ok = Path::new(trimmed)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    ok.then(|| trimmed.to_string())
}

fn content_type(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
