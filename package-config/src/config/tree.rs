//! Containment tree over package roots.
//!
//! The tree answers "which package owns this URI" for configurations whose
//! package roots nest inside one another. Each level holds packages whose
//! roots do not contain each other; a package whose root contains other
//! package roots gets a child level keyed by its name.
//!
//! Roots are compared as strings. Every root ends in `/`, so a string prefix
//! is also a path-segment prefix.

use std::collections::HashMap;

use crate::error::{ConflictKind, Error, Result};
use crate::package::Package;

/// Prefix tree over package root URIs.
///
/// Nodes store indices into the package list of the owning configuration,
/// which is passed to every operation.
#[derive(Debug, Clone, Default)]
pub struct PackageTree {
    packages: Vec<usize>,
    children: HashMap<String, PackageTree>,
}

impl PackageTree {
    /// Builds a tree for `packages`, inserting them in root order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] for the first pair of packages with the
    /// same root, or where one root lies inside another package's URI root.
    pub fn build(packages: &[Package]) -> Result<Self> {
        let mut order: Vec<usize> = (0..packages.len()).collect();
        order.sort_by(|&a, &b| packages[a].root().as_str().cmp(packages[b].root().as_str()));

        let mut tree = Self::default();
        for index in order {
            tree.insert(packages, index, 0)?;
        }
        Ok(tree)
    }

    /// Inserts `packages[index]`, comparing roots from byte offset `start`.
    fn insert(&mut self, packages: &[Package], index: usize, start: usize) -> Result<()> {
        let package = &packages[index];
        let path = package.root().as_str();

        for &existing_index in &self.packages {
            let existing = &packages[existing_index];
            let existing_path = existing.root().as_str();
            if !begins_with(start, existing_path, path) {
                continue;
            }

            if path.len() == existing_path.len() {
                return Err(conflict(ConflictKind::SameRoot, package, existing));
            }
            if begins_with(
                existing_path.len(),
                existing.package_uri_root().as_str(),
                path,
            ) {
                return Err(conflict(
                    ConflictKind::InsideResolutionRoot,
                    package,
                    existing,
                ));
            }

            return self
                .children
                .entry(existing.name().to_string())
                .or_default()
                .insert(packages, index, existing_path.len());
        }

        self.packages.push(index);
        Ok(())
    }

    /// Returns the index of the most specific package whose root contains
    /// `path`, or `None` if no package root does.
    #[must_use]
    pub fn package_of(&self, packages: &[Package], path: &str) -> Option<usize> {
        self.find(packages, 0, path)
    }

    fn find(&self, packages: &[Package], start: usize, path: &str) -> Option<usize> {
        for &index in &self.packages {
            let package = &packages[index];
            let root = package.root().as_str();
            if !begins_with(start, root, path) {
                continue;
            }

            if path.len() == root.len() {
                return Some(index);
            }
            let uri_root = package.package_uri_root().as_str();
            if uri_root.len() == root.len() || begins_with(root.len(), uri_root, path) {
                return Some(index);
            }
            let nested = self
                .children
                .get(package.name())
                .and_then(|child| child.find(packages, root.len(), path));
            return Some(nested.unwrap_or(index));
        }
        None
    }

    /// Returns the number of packages at the top level of the tree.
    #[must_use]
    pub fn top_level_len(&self) -> usize {
        self.packages.len()
    }
}

/// Checks that `path` starts with `prefix`, given that the first `start`
/// bytes are already known to match.
fn begins_with(start: usize, prefix: &str, path: &str) -> bool {
    path.len() >= prefix.len() && path.as_bytes()[start..prefix.len()] == prefix.as_bytes()[start..]
}

fn conflict(kind: ConflictKind, package: &Package, existing: &Package) -> Error {
    Error::Conflict {
        kind,
        package: package.name().to_string(),
        existing: existing.name().to_string(),
    }
}
