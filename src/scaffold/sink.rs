//! Where rendered artifacts go.
//!
//! All paths handed to a sink are relative to the project root.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait ArtifactSink {
    fn exists(&self, path: &Path) -> bool;

    /// Contents of `path`, or `None` when it does not exist.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;

    /// Create or replace `path`, creating parent directories as needed.
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Files directly inside `dir`, sorted. A missing directory is empty.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Writes to the real file system below `root`.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for FsSink {
    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(self.root.join(path)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let absolute = self.root.join(dir);
        if !absolute.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(absolute)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(dir.join(entry.file_name()));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// In-memory sink, optionally layered over a real project.
///
/// Reads fall through to the base sink; writes never do. Used for dry runs,
/// where conflicts must still be detected against what is on disk.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    base: Option<FsSink>,
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn over(base: FsSink) -> Self {
        Self {
            base: Some(base),
            files: BTreeMap::new(),
        }
    }

    /// Files written to this sink (not the base), by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl ArtifactSink for MemorySink {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.base.as_ref().is_some_and(|b| b.exists(path))
    }

    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        if let Some(contents) = self.files.get(path) {
            return Ok(Some(contents.clone()));
        }
        match &self.base {
            Some(base) => base.read(path),
            None => Ok(None),
        }
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = match &self.base {
            Some(base) => base.list(dir)?,
            None => Vec::new(),
        };
        files.extend(
            self.files
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned(),
        );
        files.sort();
        files.dedup();
        Ok(files)
    }
}
