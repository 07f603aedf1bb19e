use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Entries of `dir`, ordered lexicographically by file name.
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(PipelineError::io(dir))? {
        let entry = entry.map_err(PipelineError::io(dir))?;
        entries.push(entry.path());
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// `.tif` or `.tiff`, case-insensitive.
pub fn has_tiff_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::{has_tiff_extension, sorted_entries};

    #[test]
    fn tiff_extension_matching() {
        assert!(has_tiff_extension(Path::new("a.tif")));
        assert!(has_tiff_extension(Path::new("b.TIFF")));
        assert!(has_tiff_extension(Path::new("dir/c.Tif")));
        assert!(!has_tiff_extension(Path::new("notes.txt")));
        assert!(!has_tiff_extension(Path::new("tif")));
        assert!(!has_tiff_extension(Path::new("image.tif.bak")));
    }

    #[test]
    fn entries_come_back_in_name_order() {
        let dir = TempDir::new().expect("temp dir");
        for name in ["s10.tif", "s02.tif", "s1.tif"] {
            fs::write(dir.path().join(name), b"").expect("write");
        }

        let names: Vec<String> = sorted_entries(dir.path())
            .expect("list")
            .iter()
            .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["s02.tif", "s1.tif", "s10.tif"]);
    }
}
