//! Directory scanning for mappable files.
//!
//! Walks a directory tree collecting markdown and PDF files, skipping
//! hidden entries and anything matched by the configured exclusion globs.
//! Results are sorted by path so output is deterministic.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::{DirEntry, WalkDir};

/// The parser a discovered file should be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.md` or `.markdown` file.
    Markdown,
    /// A `.pdf` file.
    Pdf,
}

/// A file found during a directory scan.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute (or as-given) path for opening the file.
    pub path: PathBuf,
    /// Path relative to the scan root, used as the document's filename.
    pub rel: String,
    /// Which parser handles this file.
    pub kind: FileKind,
}

/// Hidden files and directories are never scanned.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Classifies a path by extension, case-insensitively.
fn classify(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "md" | "markdown" => Some(FileKind::Markdown),
        "pdf" => Some(FileKind::Pdf),
        _ => None,
    }
}

/// Collects all mappable files under `root`, in sorted path order.
///
/// Entries matching `excludes` (relative to `root`) are dropped, as are
/// hidden files and directories. Symlinks are not followed.
pub fn scan_directory(root: &Path, excludes: &GlobSet) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = classify(entry.path()) else {
            continue;
        };
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if excludes.is_match(&rel) {
            continue;
        }
        files.push(DiscoveredFile {
            path: entry.path().to_path_buf(),
            rel,
            kind,
        });
    }
    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use globset::GlobSet;

    use super::*;

    fn no_excludes() -> GlobSet {
        GlobSet::empty()
    }

    #[test]
    fn test_finds_markdown_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("b.PDF"), "%PDF-").unwrap();
        fs::write(dir.path().join("c.txt"), "ignored").unwrap();

        let files = scan_directory(dir.path(), &no_excludes());
        let names: Vec<&str> = files.iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.PDF"]);
        assert_eq!(files[0].kind, FileKind::Markdown);
        assert_eq!(files[1].kind, FileKind::Pdf);
    }

    #[test]
    fn test_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden.md"), "# H").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("readme.md"), "# G").unwrap();
        fs::write(dir.path().join("seen.md"), "# S").unwrap();

        let files = scan_directory(dir.path(), &no_excludes());
        let names: Vec<&str> = files.iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(names, vec!["seen.md"]);
    }

    #[test]
    fn test_recurses_with_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.md"), "# D").unwrap();
        fs::write(dir.path().join("top.md"), "# T").unwrap();

        let files = scan_directory(dir.path(), &no_excludes());
        let names: Vec<&str> = files.iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(names, vec!["sub/deep.md", "top.md"]);
    }

    #[test]
    fn test_applies_exclusion_globs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("wip.md"), "# W").unwrap();
        fs::write(dir.path().join("final.md"), "# F").unwrap();

        let mut builder = globset::GlobSetBuilder::new();
        builder.add(globset::Glob::new("drafts/**").unwrap());
        let excludes = builder.build().unwrap();

        let files = scan_directory(dir.path(), &excludes);
        let names: Vec<&str> = files.iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(names, vec!["final.md"]);
    }
}
