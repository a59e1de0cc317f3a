use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, FileSystem};

/// Order in which `MemoryFileSystem::list_dir` returns children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Lexicographic path order
    #[default]
    Sorted,
    /// Reverse lexicographic path order
    Reversed,
}

#[derive(Debug, Clone)]
enum Node {
    File(u64),
    Dir,
    Symlink(PathBuf),
}

/// In-memory `FileSystem` for tests
///
/// Holds a flat map of absolute paths to nodes. Removal and listing of
/// individual paths can be made to fail so partial-failure behavior can be
/// exercised deterministically.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    order: ListOrder,
    fail_remove: RefCell<BTreeSet<PathBuf>>,
    fail_list: RefCell<BTreeSet<PathBuf>>,
    vanish_remove: RefCell<BTreeSet<PathBuf>>,
    vanish_list: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty filesystem that lists children in the given order
    pub fn with_order(order: ListOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Add a file of `len` bytes, creating parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, len: u64) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(len));
    }

    /// Add a directory, creating parent directories
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
    }

    /// Add a symbolic link pointing at `target`, creating parent directories
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::Symlink(target.as_ref().to_path_buf()));
    }

    /// Make every removal of `path` fail with `PermissionDenied`
    pub fn fail_remove(&self, path: impl AsRef<Path>) {
        self.fail_remove
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Make every listing of `path` fail with `PermissionDenied`
    pub fn fail_list(&self, path: impl AsRef<Path>) {
        self.fail_list
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Make `path` disappear the moment something tries to remove it, as if
    /// another process deleted it first. The removal reports `NotFound`.
    pub fn vanish_on_remove(&self, path: impl AsRef<Path>) {
        self.vanish_remove
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Make the subtree at `path` disappear the moment it is listed. The
    /// listing reports `NotFound`.
    pub fn vanish_on_list(&self, path: impl AsRef<Path>) {
        self.vanish_list
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// True if anything exists at `path`
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow().contains_key(path.as_ref())
    }

    /// Target of the symbolic link at `path`, if that is what's there
    pub fn link_target(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::Symlink(target)) => Some(target.clone()),
            _ => None,
        }
    }

    fn add_parents(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn children(&self, path: &Path) -> Vec<PathBuf> {
        self.nodes
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect()
    }

    fn remove_subtree(&self, path: &Path) {
        self.nodes.borrow_mut().retain(|p, _| !p.starts_with(path));
    }

    fn check_remove(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove.borrow().contains(path) {
            return Err(denied(path));
        }
        if self.vanish_remove.borrow().contains(path) {
            self.remove_subtree(path);
            return Err(not_found(path));
        }
        Ok(())
    }
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        Ok(self.nodes.borrow().get(path).map(|node| match node {
            Node::File(len) => EntryKind::File { len: *len },
            Node::Dir => EntryKind::Dir,
            Node::Symlink(_) => EntryKind::Symlink,
        }))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if self.fail_list.borrow().contains(path) {
            return Err(denied(path));
        }
        if self.vanish_list.borrow().contains(path) {
            self.remove_subtree(path);
            return Err(not_found(path));
        }
        match self.nodes.borrow().get(path) {
            Some(Node::Dir) => {}
            Some(_) => {
                return Err(io::Error::other(format!("not a directory: {}", path.display())))
            }
            None => return Err(not_found(path)),
        }

        let mut children = self.children(path);
        if self.order == ListOrder::Reversed {
            children.reverse();
        }
        Ok(children)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|a| !a.as_os_str().is_empty())
            .collect();
        ancestors.reverse();

        for ancestor in ancestors {
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", ancestor.display()),
                    ))
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check_remove(path)?;
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path) {
            Some(Node::File(_)) | Some(Node::Symlink(_)) => {
                nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir) => Err(io::Error::other(format!("is a directory: {}", path.display()))),
            None => Err(not_found(path)),
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.check_remove(path)?;
        if !self.children(path).is_empty() {
            return Err(io::Error::other(format!("directory not empty: {}", path.display())));
        }
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path) {
            Some(Node::Dir) => {
                nodes.remove(path);
                Ok(())
            }
            Some(_) => Err(io::Error::other(format!("not a directory: {}", path.display()))),
            None => Err(not_found(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_creates_parents() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/cache/a/b.bin", 5);

        assert_eq!(fs.entry_kind(Path::new("/cache")).unwrap(), Some(EntryKind::Dir));
        assert_eq!(
            fs.entry_kind(Path::new("/cache/a")).unwrap(),
            Some(EntryKind::Dir)
        );
        assert_eq!(
            fs.entry_kind(Path::new("/cache/a/b.bin")).unwrap(),
            Some(EntryKind::File { len: 5 })
        );
    }

    #[test]
    fn test_list_dir_order() {
        let sorted = MemoryFileSystem::new();
        let reversed = MemoryFileSystem::with_order(ListOrder::Reversed);
        for fs in [&sorted, &reversed] {
            fs.add_file("/c/a", 1);
            fs.add_file("/c/b", 1);
            fs.add_file("/c/d/e", 1);
        }

        assert_eq!(
            sorted.list_dir(Path::new("/c")).unwrap(),
            vec![PathBuf::from("/c/a"), PathBuf::from("/c/b"), PathBuf::from("/c/d")]
        );
        assert_eq!(
            reversed.list_dir(Path::new("/c")).unwrap(),
            vec![PathBuf::from("/c/d"), PathBuf::from("/c/b"), PathBuf::from("/c/a")]
        );
    }

    #[test]
    fn test_symlink_is_reported_not_followed() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/target");
        fs.add_symlink("/c/link", "/target");

        assert_eq!(
            fs.entry_kind(Path::new("/c/link")).unwrap(),
            Some(EntryKind::Symlink)
        );
        assert_eq!(fs.link_target("/c/link"), Some(PathBuf::from("/target")));
        assert!(fs.link_target("/target").is_none());
    }

    #[test]
    fn test_remove_dir_requires_empty() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/c/a", 1);

        assert!(fs.remove_dir(Path::new("/c")).is_err());
        fs.remove_file(Path::new("/c/a")).unwrap();
        fs.remove_dir(Path::new("/c")).unwrap();
        assert!(!fs.exists("/c"));
    }

    #[test]
    fn test_create_dir_all_over_file_fails() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/c/blocker", 1);

        let err = fs.create_dir_all(Path::new("/c/blocker/sub")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_vanish_on_list_drops_subtree() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/c/gone/a", 1);
        fs.add_file("/c/keep", 1);
        fs.vanish_on_list("/c/gone");

        let err = fs.list_dir(Path::new("/c/gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!fs.exists("/c/gone"));
        assert!(!fs.exists("/c/gone/a"));
        assert!(fs.exists("/c/keep"));
    }

    #[test]
    fn test_vanish_on_remove_reports_not_found() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/c/a", 1);
        fs.vanish_on_remove("/c/a");

        let err = fs.remove_file(Path::new("/c/a")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!fs.exists("/c/a"));
    }

    #[test]
    fn test_injected_failures() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/c/locked", 1);
        fs.fail_remove("/c/locked");
        fs.fail_list("/c");

        assert_eq!(
            fs.remove_file(Path::new("/c/locked")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
        assert_eq!(
            fs.list_dir(Path::new("/c")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
    }
}
