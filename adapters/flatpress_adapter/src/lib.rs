use std::fs;
use std::path::{Path, PathBuf};

use fp_core::domain::{Entry, EntryCollection, Markup};
use fp_core::error::ConversionError;
use fp_core::parser::parse_entry;
use fp_core::ports::{EntryRepository, Result};
use log::{debug, error, info};

const ENTRY_EXTENSION: &str = ".txt";

/// Flatpress content tree implementation of the EntryRepository trait
pub struct FlatpressEntryRepository {
    content_root: PathBuf,
    markup: Markup,
}

impl FlatpressEntryRepository {
    /// Creates a new FlatpressEntryRepository reading below the given content root
    pub fn new(content_root: impl Into<PathBuf>, markup: Markup) -> Self {
        Self {
            content_root: content_root.into(),
            markup,
        }
    }

    /// Visits `dir` and everything below it: files of a directory first, then
    /// its subdirectories, each in file-name order.
    fn walk(&self, dir: &Path, depth: usize, entries: &mut EntryCollection) -> Result<()> {
        info!("{} {}", "-".repeat(depth), display_name(dir));

        let mut children = Vec::new();
        for child in fs::read_dir(dir).map_err(|e| ConversionError::io(dir, e))? {
            match child {
                Ok(child) => children.push(child),
                Err(err) => error!("Skipping unreadable item in {}: {}", dir.display(), err),
            }
        }
        children.sort_by_key(|child| child.file_name());

        let mut subdirs = Vec::new();
        for child in children {
            let path = child.path();
            if child.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                subdirs.push(path);
                continue;
            }

            let name = child.file_name().to_string_lossy().into_owned();
            if !name.ends_with(ENTRY_EXTENSION) {
                debug!("{} {} (ignored)", "-".repeat(depth + 1), name);
                continue;
            }
            match self.read_entry(&path) {
                Ok(Some((timestamp, entry))) => {
                    entries.insert(timestamp, entry);
                }
                Ok(None) => debug!("{} is not an entry record", path.display()),
                Err(err) => {
                    error!("FILE: {} PATH: {} ERROR: {}", name, dir.display(), err);
                    continue;
                }
            }
            info!("{} {}", "-".repeat(depth + 1), name);
        }

        for subdir in subdirs {
            if let Err(err) = self.walk(&subdir, depth + 1, entries) {
                error!("Skipping directory {}: {}", subdir.display(), err);
            }
        }
        Ok(())
    }

    fn read_entry(&self, path: &Path) -> Result<Option<(String, Entry)>> {
        let record = fs::read_to_string(path).map_err(|e| ConversionError::io(path, e))?;
        Ok(parse_entry(&record, &self.markup))
    }
}

impl EntryRepository for FlatpressEntryRepository {
    fn fetch_all_entries(&self) -> Result<EntryCollection> {
        let mut entries = EntryCollection::new();
        self.walk(&self.content_root, 0, &mut entries)?;
        info!("Gathered {} entries", entries.len());
        Ok(entries)
    }
}

fn display_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
