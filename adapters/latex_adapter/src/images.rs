use std::fs;
use std::path::{Path, PathBuf};

use fp_core::error::ConversionError;
use fp_core::ports::{ImageResolver, Result};
use log::{debug, info};

/// Folder, relative to the working directory, that images are copied into by default.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Image resolver that searches directories on disk and copies each hit into
/// a local images folder
pub struct CopyingImageResolver {
    search_dirs: Vec<PathBuf>,
    images_dir: PathBuf,
}

impl CopyingImageResolver {
    pub fn new(search_dirs: Vec<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dirs,
            images_dir: images_dir.into(),
        }
    }

    fn locate(&self, image: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .find_map(|dir| find_file(dir, image))
    }
}

impl ImageResolver for CopyingImageResolver {
    fn resolve(&self, images: &[String]) -> Result<Vec<String>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }
        fs::create_dir_all(&self.images_dir)
            .map_err(|e| ConversionError::io(&self.images_dir, e))?;

        let mut resolved = Vec::with_capacity(images.len());
        for image in images {
            info!("\tImage: {}", image);
            let Some(source) = self.locate(image) else {
                continue;
            };
            let target = self.images_dir.join(image);
            if is_same_file(&source, &target) {
                debug!("{} is already in place", target.display());
            } else {
                debug!("Copying {} to {}", source.display(), target.display());
                fs::copy(&source, &target).map_err(|e| ConversionError::io(&source, e))?;
            }
            resolved.push(document_path(&target));
        }
        Ok(resolved)
    }
}

/// Depth-first search for a file called `name`; a directory's own files are
/// checked before any of its subdirectories. Unreadable directories count as empty.
fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }

    let mut subdirs: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(children) => children
            .filter_map(|child| child.ok())
            .filter(|child| child.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .map(|child| child.path())
            .collect(),
        Err(err) => {
            debug!("Cannot search {}: {}", dir.display(), err);
            return None;
        }
    };
    subdirs.sort();
    subdirs.iter().find_map(|subdir| find_file(subdir, name))
}

// Copying a file onto itself truncates it
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    }
}

/// LaTeX wants forward slashes on every platform.
fn document_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
