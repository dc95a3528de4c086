use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Result, ViewerError};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Keep only names with a supported image extension, preserving input order.
pub fn filter_image_names<I, S>(names: I) -> Vec<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    names
        .into_iter()
        .filter(|name| is_image_file(name.as_ref()))
        .collect()
}

/// List the supported images directly inside `folder`, in directory listing order.
///
/// Entries are filtered by extension only. Any failure opening or iterating
/// the directory is reported as [`ViewerError::FolderAccess`].
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let start_time = Instant::now();
    let access_err = |source| ViewerError::FolderAccess {
        path: folder.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(folder).map_err(access_err)? {
        let entry = entry.map_err(access_err)?;
        names.push(entry.file_name());
    }

    let files: Vec<PathBuf> = filter_image_names(names)
        .into_iter()
        .map(|name| folder.join(name))
        .collect();

    log::info!(
        "Scanned {:?} in {:.3}s. Found {} images.",
        folder,
        start_time.elapsed().as_secs_f64(),
        files.len()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filter_keeps_supported_extensions_in_order() {
        let names = ["a.JPG", "b.txt", "c.png", "d.PNG"];
        assert_eq!(filter_image_names(names), vec!["a.JPG", "c.png", "d.PNG"]);
    }

    #[test]
    fn filter_accepts_jpeg_and_bmp_any_case() {
        let names = ["x.jpeg", "y.JpEg", "z.Bmp", "w.gif", "noext", "v.png.bak"];
        assert_eq!(filter_image_names(names), vec!["x.jpeg", "y.JpEg", "z.Bmp"]);
    }

    #[test]
    fn list_images_joins_folder_and_skips_other_files() {
        let dir = tempdir().expect("failed to create temp dir");
        for name in ["one.png", "two.BMP", "notes.txt", "three.jpg"] {
            fs::write(dir.path().join(name), b"").expect("write file");
        }

        let mut found = list_images(dir.path()).expect("list folder");
        found.sort();

        let mut expected: Vec<PathBuf> = ["one.png", "three.jpg", "two.BMP"]
            .iter()
            .map(|n| dir.path().join(n))
            .collect();
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn list_images_empty_folder_is_ok() {
        let dir = tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join("readme.md"), b"hi").expect("write file");
        assert!(list_images(dir.path()).expect("list folder").is_empty());
    }

    #[test]
    fn list_images_missing_folder_is_access_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("does-not-exist");
        match list_images(&missing) {
            Err(ViewerError::FolderAccess { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected folder access error, got {:?}", other),
        }
    }
}
