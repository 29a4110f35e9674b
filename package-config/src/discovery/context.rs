//! The context tree: every configuration below a root directory.
//!
//! Each node is a directory that defines a configuration, and its children
//! are the nearest configuration-defining directories below it. A directory
//! belongs to the deepest node containing it.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::{load_local, DiscoveryOptions};
use crate::config::PackageConfig;
use crate::error::{Error, ErrorSink, Result};
use crate::path::normalize::normalize;
use crate::path::PathRelationship;

/// A configuration-defining directory and the ones nested below it.
///
/// # Examples
///
/// ```no_run
/// use package_config::discovery::{build_context_tree, default_directory_filter};
/// use package_config::PackageConfig;
/// use std::path::Path;
///
/// let mut errors = Vec::new();
/// let tree = build_context_tree(
///     Path::new("/work"),
///     &default_directory_filter,
///     PackageConfig::empty(),
///     &mut |e| errors.push(e),
/// )
/// .unwrap();
///
/// let node = tree.get(Path::new("/work/app/lib")).unwrap();
/// println!("{} uses {}", node.directory().display(), node.config().len());
/// ```
#[derive(Debug, Clone)]
pub struct ContextNode {
    directory: PathBuf,
    config: PackageConfig,
    children: Vec<ContextNode>,
}

impl ContextNode {
    /// Returns the directory of this node.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the configuration that applies in this node's directory.
    #[must_use]
    pub const fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Returns the nested nodes, ordered by directory.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the node whose configuration applies to `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `directory` is not inside this
    /// node's directory, or cannot be normalized.
    pub fn get(&self, directory: &Path) -> Result<&Self> {
        let directory = normalize(directory)?;
        if !PathRelationship::is_within(&directory, &self.directory) {
            return Err(Error::invalid_argument(
                "directory",
                directory.display(),
                format!("not inside {}", self.directory.display()),
            ));
        }

        let mut node = self;
        while let Some(child) = node
            .children
            .iter()
            .find(|child| PathRelationship::is_within(&directory, &child.directory))
        {
            node = child;
        }
        Ok(node)
    }

    /// Returns every node's configuration keyed by directory.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<PathBuf, &PackageConfig> {
        let mut map = BTreeMap::new();
        self.collect(&mut map);
        map
    }

    fn collect<'a>(&'a self, map: &mut BTreeMap<PathBuf, &'a PackageConfig>) {
        map.insert(self.directory.clone(), &self.config);
        for child in &self.children {
            child.collect(map);
        }
    }
}

/// Builds the context tree for `root` with the default [`DiscoveryOptions`].
///
/// Subdirectories rejected by `filter` are not entered. If `root` defines no
/// configuration, the root node uses `default`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `root` is not a directory.
/// Problems reading configurations go to `sink`.
pub fn build_context_tree(
    root: &Path,
    filter: &dyn Fn(&Path) -> bool,
    default: PackageConfig,
    sink: &mut dyn ErrorSink,
) -> Result<ContextNode> {
    build_context_tree_with(root, filter, default, &DiscoveryOptions::default(), sink)
}

/// Builds the context tree for `root`.
///
/// Only `min_version` and `prefer_newest` of `options` apply.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `root` is not a directory or the
/// options are invalid.
pub fn build_context_tree_with(
    root: &Path,
    filter: &dyn Fn(&Path) -> bool,
    default: PackageConfig,
    options: &DiscoveryOptions,
    sink: &mut dyn ErrorSink,
) -> Result<ContextNode> {
    options.validate()?;
    let root = normalize(root)?;
    if !root.is_dir() {
        return Err(Error::invalid_argument(
            "root",
            root.display(),
            "not a directory",
        ));
    }

    // Nodes whose directory contains the current entry, outermost first.
    let mut open: Vec<ContextNode> = Vec::new();
    let mut top_level: Vec<ContextNode> = Vec::new();

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.file_type().is_dir() && (entry.depth() == 0 || filter(entry.path()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let location = e
                    .path()
                    .map_or_else(|| root.display().to_string(), |p| p.display().to_string());
                sink.report(Error::Io {
                    location,
                    source: io::Error::from(e),
                });
                continue;
            }
        };

        let Some(config) = load_local(entry.path(), options, sink) else {
            continue;
        };
        debug!("{} defines a package configuration", entry.path().display());

        close_nodes(&mut open, &mut top_level, Some(entry.path()));
        open.push(ContextNode {
            directory: entry.into_path(),
            config,
            children: Vec::new(),
        });
    }
    close_nodes(&mut open, &mut top_level, None);

    if top_level.len() == 1 && top_level[0].directory == root {
        if let Some(node) = top_level.pop() {
            return Ok(node);
        }
    }
    Ok(ContextNode {
        directory: root,
        config: default,
        children: top_level,
    })
}

/// Closes the open nodes that do not contain `next`, attaching each to its
/// parent node.
fn close_nodes(open: &mut Vec<ContextNode>, top_level: &mut Vec<ContextNode>, next: Option<&Path>) {
    while let Some(last) = open.last() {
        if next.is_some_and(|next| PathRelationship::is_within(next, &last.directory)) {
            break;
        }
        let Some(closed) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => top_level.push(closed),
        }
    }
}
