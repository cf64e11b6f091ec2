//! Text frame capture directory
//!
//! Each capture run gets its own `run_<N>` directory, numbered one past the
//! highest existing run. Frames are written as `<n>.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct CaptureDir {
    dir: PathBuf,
}

impl CaptureDir {
    /// Create the next `run_<N>` directory under `root`
    pub fn create_next(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;

        let mut max_run = 0u32;
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let run = name
                .to_str()
                .and_then(|n| n.strip_prefix("run_"))
                .and_then(|n| n.parse::<u32>().ok());
            if let Some(run) = run {
                max_run = max_run.max(run);
            }
        }

        let dir = root.join(format!("run_{}", max_run + 1));
        fs::create_dir(&dir).with_context(|| format!("mkdir {} failed", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write frame `n`
    pub fn write(&self, n: u32, frame: &str) -> Result<PathBuf> {
        let path = self.dir.join(format!("{n}.txt"));
        fs::write(&path, frame).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Captured files with their sizes, sorted by frame number
    pub fn list(&self) -> Result<Vec<(String, u64)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            if meta.is_file() {
                files.push((entry.file_name().to_string_lossy().into_owned(), meta.len()));
            }
        }
        files.sort_by_key(|(name, _)| {
            name.trim_end_matches(".txt")
                .parse::<u32>()
                .unwrap_or(u32::MAX)
        });
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("livedash-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        root
    }

    #[test]
    fn test_run_numbering() {
        let root = scratch("runs");
        let first = CaptureDir::create_next(&root).unwrap();
        assert!(first.path().ends_with("run_1"));

        fs::create_dir(root.join("run_7")).unwrap();
        fs::create_dir(root.join("run_x")).unwrap();
        let next = CaptureDir::create_next(&root).unwrap();
        assert!(next.path().ends_with("run_8"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_write_and_list() {
        let root = scratch("frames");
        let dir = CaptureDir::create_next(&root).unwrap();
        dir.write(2, "bb").unwrap();
        dir.write(10, "cccc").unwrap();
        dir.write(1, "a").unwrap();

        let files = dir.list().unwrap();
        assert_eq!(
            files,
            [
                ("1.txt".to_owned(), 1),
                ("2.txt".to_owned(), 2),
                ("10.txt".to_owned(), 4)
            ]
        );

        fs::remove_dir_all(&root).unwrap();
    }
}
