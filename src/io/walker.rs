use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File enumeration over a directory tree with glob-based exclusion.
///
/// Exclude patterns are matched against individual path components (a bare
/// `venv` prunes any directory named venv) and against file names
/// (`*.egg-info`). Results are sorted for deterministic downstream output.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    name_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: vec![],
            name_patterns: vec![],
            exclude_patterns: vec![],
        }
    }

    /// Restrict results to the given file extensions (without the dot).
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Restrict results to file names matching any of the given globs.
    pub fn with_name_patterns(mut self, patterns: Vec<String>) -> Self {
        self.name_patterns = patterns;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Walk the tree and collect matching files, sorted by path.
    ///
    /// The caller applies any per-operation count limit; the walker itself
    /// enumerates everything so that skipped files can be reported rather
    /// than silently dropped.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let exclude = compile_globs(&self.exclude_patterns)?;
        let include = compile_globs(&self.name_patterns)?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .standard_filters(false)
            .filter_entry(move |entry| {
                let name = entry.file_name().to_string_lossy();
                !exclude.iter().any(|p| p.matches(&name))
            })
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.should_process(path, &include) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path, include: &[glob::Pattern]) -> bool {
        if !self.extensions.is_empty() {
            let matches_ext = path
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy();
                    self.extensions.iter().any(|e| e == ext.as_ref())
                })
                .unwrap_or(false);
            if !matches_ext {
                return false;
            }
        }

        if !include.is_empty() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !include.iter().any(|p| p.matches(&name)) {
                return false;
            }
        }

        true
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(|e| anyhow::anyhow!("bad glob '{}': {}", p, e)))
        .collect()
}

/// Enumerate Python source files under `root` honoring exclude globs.
pub fn find_python_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_extensions(&["py", "pyw"])
        .with_exclude_patterns(exclude.to_vec())
        .walk()
}
