//! Logo reference classification and resolution.
//!
//! # Precedence
//!
//! Within the `branding` map:
//!
//! 1. `logo: {"uri": "file:///…"}` → [`LogoReference::File`], loaded synchronously.
//! 2. `logo: {"uri": "https://…"}` (any other absolute URL) →
//!    [`LogoReference::Remote`], loaded asynchronously.
//! 3. `logo: {"uri": "name"}` (not an absolute URL) or `logo: "name"` →
//!    [`LogoReference::Bundled`], loaded synchronously from the catalog.
//! 4. No `logo` key → `navigationBarImage: "name"` as a bundled resource.
//!
//! # Completion guarantee
//!
//! [`AssetResolver::resolve_remote`] invokes its completion exactly once,
//! with `None` on any failure, even if the fetch task panics or the runtime
//! shuts down underneath it.  The completion runs on a runtime worker, not on
//! the UI context.  With no runtime to spawn on, it runs inline with `None`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;
use veriff_core::ImageHandle;

use super::{AssetError, RemoteFetcher, ResourceCatalog};
use crate::domain::keys;

/// Where a logo should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoReference {
    File(PathBuf),
    Remote(Url),
    Bundled(String),
}

impl LogoReference {
    /// Classifies the logo reference inside a `branding` map, if any.
    pub fn from_branding(branding: &Map<String, Value>) -> Option<Self> {
        match branding.get(keys::LOGO) {
            Some(logo) => Self::from_logo_value(logo),
            None => match branding.get(keys::NAVIGATION_BAR_IMAGE) {
                Some(Value::String(name)) if !name.is_empty() => {
                    Some(LogoReference::Bundled(name.clone()))
                }
                Some(Value::String(_)) | None => None,
                Some(other) => {
                    warn!("unexpected {} type: {}", keys::NAVIGATION_BAR_IMAGE, type_name(other));
                    None
                }
            },
        }
    }

    fn from_logo_value(logo: &Value) -> Option<Self> {
        match logo {
            Value::String(name) if name.is_empty() => {
                warn!("logo resource name is empty");
                None
            }
            Value::String(name) => Some(LogoReference::Bundled(name.clone())),
            Value::Object(image) => match image.get(keys::LOGO_URI) {
                Some(Value::String(uri)) if uri.is_empty() => {
                    warn!("logo uri is empty");
                    None
                }
                Some(Value::String(uri)) => Self::from_uri(uri),
                Some(other) => {
                    warn!("logo uri must be a string, got {}", type_name(other));
                    None
                }
                None => {
                    let found: Vec<&str> = image.keys().map(String::as_str).collect();
                    warn!("logo does not have a {:?} key; keys: {found:?}", keys::LOGO_URI);
                    None
                }
            },
            other => {
                warn!("unexpected logo type: {}", type_name(other));
                None
            }
        }
    }

    fn from_uri(uri: &str) -> Option<Self> {
        let Ok(url) = Url::parse(uri) else {
            // Not an absolute URL: the host passed a resource name in `uri`.
            return Some(LogoReference::Bundled(uri.to_string()));
        };
        if url.scheme() != "file" {
            return Some(LogoReference::Remote(url));
        }
        match url.to_file_path() {
            Ok(path) => Some(LogoReference::File(path)),
            Err(()) => {
                warn!("logo file url has no local path: {uri}");
                None
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

// ── Completion guard ──────────────────────────────────────────────────────────

/// Wraps a completion so it runs exactly once: explicitly via `finish`, or
/// with `None` when dropped unfinished.
struct Completion<F>
where
    F: FnOnce(Option<ImageHandle>),
{
    callback: Option<F>,
}

impl<F> Completion<F>
where
    F: FnOnce(Option<ImageHandle>),
{
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    fn finish(mut self, image: Option<ImageHandle>) {
        if let Some(callback) = self.callback.take() {
            callback(image);
        }
    }
}

impl<F> Drop for Completion<F>
where
    F: FnOnce(Option<ImageHandle>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            warn!("remote asset resolution abandoned; continuing without image");
            callback(None);
        }
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Loads logos from the resource catalog, the file system, or the network.
pub struct AssetResolver {
    catalog: Arc<dyn ResourceCatalog>,
    fetcher: Arc<dyn RemoteFetcher>,
}

impl AssetResolver {
    pub fn new(catalog: Arc<dyn ResourceCatalog>, fetcher: Arc<dyn RemoteFetcher>) -> Self {
        Self { catalog, fetcher }
    }

    /// Synchronously loads a file or bundled logo.
    ///
    /// Returns `None` on failure, and always for [`LogoReference::Remote`]
    /// (use [`resolve_remote`](Self::resolve_remote) for those).
    pub fn resolve_local(&self, reference: &LogoReference) -> Option<ImageHandle> {
        let loaded = match reference {
            LogoReference::File(path) => load_file(path),
            LogoReference::Bundled(name) => self.catalog.load(name).and_then(|b| decode(&b)),
            LogoReference::Remote(url) => {
                debug!("{url} is remote; not resolvable synchronously");
                return None;
            }
        };
        match loaded {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("failed to load logo {reference:?}: {err}");
                None
            }
        }
    }

    /// Fetches and decodes `url` in the background, then calls `completion`.
    ///
    /// A `file:` URL is read synchronously and `completion` runs before this
    /// method returns.  Otherwise the fetch is spawned onto the current Tokio
    /// runtime; called outside one, `completion` runs inline with `None`.
    pub fn resolve_remote<F>(&self, url: Url, completion: F)
    where
        F: FnOnce(Option<ImageHandle>) + Send + 'static,
    {
        let completion = Completion::new(completion);

        if url.scheme() == "file" {
            let image = match url.to_file_path() {
                Ok(path) => self.resolve_local(&LogoReference::File(path)),
                Err(()) => None,
            };
            completion.finish(image);
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime to fetch remote logo {url}; continuing without image");
            completion.finish(None);
            return;
        };

        let fetcher = Arc::clone(&self.fetcher);
        runtime.spawn(async move {
            let image = match fetcher.fetch(&url).await.and_then(|bytes| decode(&bytes)) {
                Ok(image) => {
                    debug!(
                        "remote logo {url} decoded ({}x{})",
                        image.width(),
                        image.height()
                    );
                    Some(image)
                }
                Err(err) => {
                    warn!("failed to load remote logo {url}: {err}");
                    None
                }
            };
            completion.finish(image);
        });
    }
}

fn load_file(path: &Path) -> Result<ImageHandle, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

fn decode(bytes: &[u8]) -> Result<ImageHandle, AssetError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(ImageHandle::new(decoded.to_rgba8()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
