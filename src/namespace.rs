//! Resource namespaces for controllers and templates.
//!
//! The routing and rendering pipeline never touches storage directly; it
//! goes through the two traits in this module. Implementations are built
//! once at startup, shared read-only behind an `Arc`, and injected into
//! the [`Dispatcher`](crate::dispatcher::Dispatcher) — no component here
//! may mutate a namespace after startup.
//!
//! Shipped implementations:
//!
//! - [`ControllerRegistry`] — in-memory controller mount table, the normal
//!   way a host wires its controllers in.
//! - [`TemplateRegistry`] — in-memory template sources, insertion-ordered,
//!   handy for tests and embedded apps.
//! - [`DirectoryTemplates`] — filesystem-backed template lookup rooted at
//!   a views directory.

use crate::controller::Controller;
use crate::error::Error;
use crate::inflect;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Extension marking a leaf controller resource in namespace queries.
///
/// The path resolver asks for `"<id>.ctrl"` to test for a leaf and for the
/// bare `"<id>"` to test for a namespace directory.
pub const CONTROLLER_EXT: &str = "ctrl";

/// Factory producing a fresh controller instance per request.
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Lookup surface for controller resources.
///
/// The resolver only needs existence tests plus instantiation; how the
/// controllers are stored (registry, generated table, anything else) is
/// the host's business.
pub trait ControllerNamespace: Send + Sync {
    /// Test whether a resource exists. Leaf queries carry the
    /// [`CONTROLLER_EXT`] suffix; bare paths ask for a namespace
    /// directory.
    fn exists(&self, path: &str) -> bool;

    /// Instantiate a fresh controller for a resolved identifier.
    ///
    /// Fails with [`Error::UnknownController`] when the resource exists
    /// but yields no controller type.
    fn load(&self, id: &str) -> Result<Box<dyn Controller>, Error>;
}

/// In-memory controller mount table.
///
/// Controllers are mounted at slash-delimited identifiers; intermediate
/// segments implicitly become namespace directories. An identifier can
/// also be mounted as a stub — the resource then exists but loading it
/// fails with [`Error::UnknownController`], mirroring a controller file
/// that defines no class of the expected name.
#[derive(Default)]
pub struct ControllerRegistry {
    entries: HashMap<String, Option<ControllerFactory>>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a controller factory at an identifier such as `"wiki"` or
    /// `"admin/users"`.
    pub fn mount<F>(&mut self, id: &str, factory: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        info!(controller_id = %id, "Controller mounted");
        self.entries.insert(id.to_string(), Some(Box::new(factory)));
    }

    /// Mount a resource that exists but yields no controller type.
    pub fn mount_stub(&mut self, id: &str) {
        info!(controller_id = %id, "Controller stub mounted");
        self.entries.insert(id.to_string(), None);
    }
}

impl ControllerNamespace for ControllerRegistry {
    fn exists(&self, path: &str) -> bool {
        let leaf_suffix = format!(".{CONTROLLER_EXT}");
        if let Some(id) = path.strip_suffix(&leaf_suffix) {
            return self.entries.contains_key(id);
        }
        // Directory query: anything mounted beneath this prefix?
        let prefix = format!("{path}/");
        self.entries.keys().any(|id| id.starts_with(&prefix))
    }

    fn load(&self, id: &str) -> Result<Box<dyn Controller>, Error> {
        let expected = format!("{}Controller", inflect::camelize(id));
        match self.entries.get(id) {
            Some(Some(factory)) => {
                debug!(controller_id = %id, type_name = %expected, "Controller loaded");
                Ok(factory())
            }
            _ => Err(Error::UnknownController(expected)),
        }
    }
}

/// Lookup surface for template resources.
///
/// `name` arguments are logical names without extension (`"foo/index"`);
/// returned candidate paths carry their extension (`"foo/index.html"`).
pub trait TemplateNamespace: Send + Sync {
    /// All resource paths whose base name equals `name` plus one
    /// extension, in whatever order this namespace enumerates. Callers
    /// take the first, so ambiguous names resolve non-deterministically
    /// for unordered namespaces.
    fn find_candidates(&self, name: &str) -> Vec<String>;

    /// Read the content source of a resource path.
    fn read(&self, path: &str) -> Result<String, Error>;
}

/// In-memory template store preserving insertion order.
#[derive(Default)]
pub struct TemplateRegistry {
    sources: Vec<(String, String)>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template source at a path such as `"foo/index.html"`.
    pub fn add(&mut self, path: &str, source: &str) {
        self.sources.push((path.to_string(), source.to_string()));
    }
}

impl TemplateNamespace for TemplateRegistry {
    fn find_candidates(&self, name: &str) -> Vec<String> {
        let prefix = format!("{name}.");
        self.sources
            .iter()
            .filter(|(path, _)| {
                path.strip_prefix(&prefix)
                    .is_some_and(|ext| !ext.is_empty() && !ext.contains('/') && !ext.contains('.'))
            })
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn read(&self, path: &str) -> Result<String, Error> {
        self.sources
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, source)| source.clone())
            .ok_or_else(|| Error::TemplateNotFound(path.to_string()))
    }
}

/// Filesystem-backed template lookup rooted at a views directory.
///
/// Candidate enumeration follows directory order, which the OS does not
/// guarantee; ambiguous names should be avoided.
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// Create a namespace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateNamespace for DirectoryTemplates {
    fn find_candidates(&self, name: &str) -> Vec<String> {
        let (dir, base) = match name.rfind('/') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("", name),
        };
        let Ok(read_dir) = fs::read_dir(self.root.join(dir)) else {
            return Vec::new();
        };
        let mut candidates = Vec::new();
        for entry in read_dir.flatten() {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let matches = file_name
                .strip_prefix(base)
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|ext| !ext.is_empty() && !ext.contains('.'));
            if matches {
                let path = if dir.is_empty() {
                    file_name.to_string()
                } else {
                    format!("{dir}/{file_name}")
                };
                candidates.push(path);
            }
        }
        candidates
    }

    fn read(&self, path: &str) -> Result<String, Error> {
        fs::read_to_string(self.root.join(path))
            .map_err(|_| Error::TemplateNotFound(path.to_string()))
    }
}
