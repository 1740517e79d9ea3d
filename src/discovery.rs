//! File discovery for Java projects.
//!
//! Walks a project root and collects every `.java` source file, honoring
//! `.gitignore` files and the exclude patterns from [`crate::config::Config`].
//! Build output directories that commonly contain generated or copied
//! sources are skipped unconditionally.

use crate::config::Config;
use crate::errors::{AnalysisError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directories that never contain hand-written project sources.
const SKIP_DIRS: &[&str] = &["target", "build", "out", ".gradle", ".idea"];

/// Finds the Java source files of a project.
pub struct FileFinder {
    exclude: Vec<String>,
    targets: Vec<PathBuf>,
}

impl FileFinder {
    pub fn new(config: &Config) -> Self {
        Self {
            exclude: config.exclude.clone(),
            targets: config.targets.clone(),
        }
    }

    /// Collect all `.java` files under `root`, sorted by path.
    ///
    /// Sorted output keeps the model's last-write-wins collision rule
    /// deterministic across runs and platforms.
    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(AnalysisError::EmptyProject {
                root: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !(entry.file_type().is_some_and(|t| t.is_dir())
                    && SKIP_DIRS.iter().any(|d| *d == name))
            })
            .build();

        for entry in walker.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "java")
                && self.is_target(path, root)
                && !self.is_excluded(path)
            {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.exclude.iter().any(|pattern| text.contains(pattern.as_str()))
    }

    fn is_target(&self, path: &Path, root: &Path) -> bool {
        if self.targets.is_empty() {
            return true;
        }
        self.targets
            .iter()
            .any(|t| path.starts_with(root.join(t)) || path.starts_with(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class X {}").unwrap();
    }

    #[test]
    fn finds_only_java_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/A.java"));
        touch(&dir.path().join("src/B.java"));
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let finder = FileFinder::new(&Config::default());
        let files = finder.find_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "java"));
    }

    #[test]
    fn skips_build_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/A.java"));
        touch(&dir.path().join("build/Generated.java"));

        let finder = FileFinder::new(&Config::default());
        let files = finder.find_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/A.java"));
    }

    #[test]
    fn honors_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/A.java"));
        touch(&dir.path().join("src/generated/G.java"));

        let config = Config {
            exclude: vec!["generated".into()],
            ..Config::default()
        };
        let finder = FileFinder::new(&config);
        let files = finder.find_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let finder = FileFinder::new(&Config::default());
        assert!(finder.find_files(Path::new("/nonexistent/project")).is_err());
    }

    #[test]
    fn output_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/Zed.java"));
        touch(&dir.path().join("src/Alpha.java"));

        let finder = FileFinder::new(&Config::default());
        let files = finder.find_files(dir.path()).unwrap();

        assert!(files[0].ends_with("Alpha.java"));
        assert!(files[1].ends_with("Zed.java"));
    }
}
