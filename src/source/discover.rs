use super::FlagClass;
use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A cutout image on disk together with the class its directory names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cutout {
    pub path: PathBuf,
    pub class: FlagClass,
}

impl Cutout {
    pub fn from_path(path: PathBuf) -> Self {
        let class = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(FlagClass::from_dir_name)
            .unwrap_or(FlagClass::Other);

        Self { path, class }
    }
}

/// All background photographs under `real_imgs/`
pub fn find_backgrounds<P: AsRef<Path>>(real_imgs: P) -> Result<Vec<PathBuf>> {
    find_files(real_imgs.as_ref(), "jpg")
}

/// All cutouts under `flag_imgs/<ClassName>/`
pub fn find_cutouts<P: AsRef<Path>>(flag_imgs: P) -> Result<Vec<Cutout>> {
    let paths = find_files(flag_imgs.as_ref(), "png")?;
    Ok(paths.into_iter().map(Cutout::from_path).collect())
}

/// Recursively collect files whose name ends with `suffix`, sorted
fn find_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!("Found {} '{}' files under {}", files.len(), suffix, root.display());

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_find_backgrounds_recurses_and_filters() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("real_imgs");
        touch(&root.join("a.jpg"));
        touch(&root.join("nested/deeper/b.jpg"));
        touch(&root.join("c.png"));
        touch(&root.join("notes.txt"));

        let found = find_backgrounds(&root).unwrap();
        assert_eq!(found, vec![root.join("a.jpg"), root.join("nested/deeper/b.jpg")]);
    }

    #[test]
    fn test_find_cutouts_assigns_class_from_parent() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("flag_imgs");
        touch(&root.join("Iron Cross/one.png"));
        touch(&root.join("Mystery/two.png"));

        let found = find_cutouts(&root).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].class, FlagClass::IronCross);
        assert_eq!(found[1].class, FlagClass::Other);
        assert_eq!(found[1].class.id(), 5);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        assert!(find_backgrounds(temp.path().join("absent")).is_err());
    }
}
