//! Path helpers

use std::io;
use std::path::Path;

/// Create the parent directory tree of `path` and return it.
///
/// A bare file name resolves to the working directory (`.`).
pub fn ensure_parent_dir(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(parent)
        }
        _ => Ok(Path::new(".")),
    }
}

/// Shorten a line for log output, on a char boundary.
pub fn snippet(line: &str, max_chars: usize) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_parent_dir_creates_nested_dirs() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("a").join("b").join("out.jsonl");
        let parent = ensure_parent_dir(&target).expect("mkdir");
        assert_eq!(parent, tmp.path().join("a").join("b"));
        assert!(parent.is_dir());
    }

    #[test]
    fn ensure_parent_dir_accepts_bare_file_name() {
        let parent = ensure_parent_dir(Path::new("out.jsonl")).expect("no parent to create");
        assert_eq!(parent, Path::new("."));
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        assert_eq!(snippet("  {\"a\": 1}  ", 20), "{\"a\": 1}");
        assert_eq!(snippet("ééééé", 3), "ééé...");
    }
}
