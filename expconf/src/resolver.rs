//! Inheritance graph discovery and linearization.
//!
//! A configuration file may list the files it inherits from under the
//! reserved [`INHERIT_KEY`]. Entries are resolved relative to the directory
//! of the declaring file. The resolver walks these declarations depth-first
//! and flattens them into a [`LoadOrder`] in which every file comes after
//! all of its ancestors.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::decoder::DecoderRegistry;
use crate::error::{Error, Result};
use crate::path::{canonicalize, resolve_components, resolve_parent};
use crate::value::{Mapping, Value};

/// Reserved key holding the list of inherited files.
pub const INHERIT_KEY: &str = "__inherit__";

/// A declared "inherits from" relationship between two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceEdge {
    /// The file declaring the inheritance.
    pub child: PathBuf,
    /// The inherited file, resolved against the child's directory.
    pub parent: PathBuf,
}

/// Files in the order they must be merged, ancestors first.
///
/// # Examples
///
/// ```no_run
/// use expconf::{DecoderRegistry, InheritanceResolver};
///
/// let registry = DecoderRegistry::with_defaults();
/// let order = InheritanceResolver::new(&registry)
///     .resolve(&["configs/run.yaml"])
///     .unwrap();
/// for path in &order {
///     println!("{}", path.display());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOrder {
    paths: Vec<PathBuf>,
    edges: Vec<InheritanceEdge>,
}

impl LoadOrder {
    /// Build the load order from the walk's edge list.
    ///
    /// The edges are scanned newest first: parents are appended the first
    /// time they are seen, then children, then any root that declared no
    /// parents. No path is appended twice.
    #[must_use]
    pub fn linearize(roots: &[PathBuf], edges: Vec<InheritanceEdge>) -> Self {
        Self::linearize_keyed(roots, edges, &HashMap::new())
    }

    /// Like [`LoadOrder::linearize`], but two spellings that `aliases` maps
    /// to the same file count as one path. The first spelling seen is kept.
    fn linearize_keyed(
        roots: &[PathBuf],
        edges: Vec<InheritanceEdge>,
        aliases: &HashMap<PathBuf, PathBuf>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        let mut push = |path: &PathBuf| {
            let key = aliases.get(path).unwrap_or(path).clone();
            if seen.insert(key) {
                paths.push(path.clone());
            }
        };

        for edge in edges.iter().rev() {
            push(&edge.parent);
        }
        for edge in edges.iter().rev() {
            push(&edge.child);
        }
        for root in roots {
            push(root);
        }

        Self { paths, edges }
    }

    /// Paths in merge order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Every edge recorded during the walk, in discovery order.
    ///
    /// A file reached through several children contributes its edges once
    /// per visit.
    #[must_use]
    pub fn edges(&self) -> &[InheritanceEdge] {
        &self.edges
    }

    /// Number of distinct files to merge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if there is nothing to merge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Position of `path` in the order, if present.
    #[must_use]
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.paths.iter().position(|p| p == path)
    }

    /// Iterate over the paths in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a LoadOrder {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Walks inheritance declarations starting from a set of root files.
pub struct InheritanceResolver<'a> {
    registry: &'a DecoderRegistry,
}

/// A file currently being expanded, kept to detect cycles.
struct ChainEntry {
    canonical: PathBuf,
    path: PathBuf,
}

/// State accumulated over one resolution.
#[derive(Default)]
struct Walk {
    chain: Vec<ChainEntry>,
    edges: Vec<InheritanceEdge>,
    /// Canonical path of every spelling visited.
    canonical: HashMap<PathBuf, PathBuf>,
}

impl<'a> InheritanceResolver<'a> {
    /// Create a resolver that decodes files through `registry`.
    #[must_use]
    pub fn new(registry: &'a DecoderRegistry) -> Self {
        Self { registry }
    }

    /// Discover the inheritance graph below `roots` and linearize it.
    ///
    /// Every visit decodes the file again; a file inherited through two
    /// different children is walked twice. Spellings that canonicalize to
    /// the same file, such as a symlink and its target, appear once in the
    /// order.
    ///
    /// # Errors
    ///
    /// - Any decoder failure for a root or an inherited file
    /// - `InvalidInheritance` if an inheritance list is malformed
    /// - `CyclicInheritance` if a file inherits from itself, directly or not
    pub fn resolve<P: AsRef<Path>>(&self, roots: &[P]) -> Result<LoadOrder> {
        let roots = roots
            .iter()
            .map(|root| resolve_components(root.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut walk = Walk::default();
        for root in &roots {
            self.walk(root, &mut walk)?;
        }

        let order = LoadOrder::linearize_keyed(&roots, walk.edges, &walk.canonical);
        log::debug!(
            "Resolved {} file(s) from {} root(s) via {} inheritance edge(s)",
            order.len(),
            roots.len(),
            order.edges().len()
        );
        Ok(order)
    }

    fn walk(&self, file: &Path, walk: &mut Walk) -> Result<()> {
        let canonical = canonicalize(file)?;
        if let Some(start) = walk
            .chain
            .iter()
            .position(|entry| entry.canonical == canonical)
        {
            let mut cycle: Vec<PathBuf> =
                walk.chain[start..].iter().map(|e| e.path.clone()).collect();
            cycle.push(file.to_path_buf());
            return Err(Error::CyclicInheritance { chain: cycle });
        }
        walk.canonical.insert(file.to_path_buf(), canonical.clone());

        let document = self.registry.decode_mapping(file)?;
        let parents = declared_parents(file, &document)?;

        for parent in &parents {
            log::debug!("{} inherits {}", file.display(), parent.display());
            walk.edges.push(InheritanceEdge {
                child: file.to_path_buf(),
                parent: parent.clone(),
            });
        }

        walk.chain.push(ChainEntry {
            canonical,
            path: file.to_path_buf(),
        });
        for parent in &parents {
            self.walk(parent, walk)?;
        }
        walk.chain.pop();

        Ok(())
    }
}

/// Read the inheritance list of `document`, resolving each entry.
///
/// A missing or null list means no parents; a single string is a list of
/// one.
///
/// # Errors
///
/// Returns `InvalidInheritance` if the list is neither a string nor a
/// sequence of strings.
pub fn declared_parents(file: &Path, document: &Mapping) -> Result<Vec<PathBuf>> {
    let entries: Vec<&str> = match document.get(INHERIT_KEY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(entry)) => vec![entry.as_str()],
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| Error::InvalidInheritance {
                    path: file.to_path_buf(),
                    reason: format!("entries must be paths, found {}", item.kind()),
                })
            })
            .collect::<Result<_>>()?,
        Some(other) => {
            return Err(Error::InvalidInheritance {
                path: file.to_path_buf(),
                reason: format!("expected a list of paths, found {}", other.kind()),
            })
        }
    };

    entries
        .into_iter()
        .map(|entry| resolve_parent(file, entry))
        .collect()
}
