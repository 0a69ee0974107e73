use std::path::PathBuf;

use crate::domain::EntryCollection;
use crate::error::ConversionError;

pub type Result<T> = std::result::Result<T, ConversionError>;

pub trait EntryRepository {
    // Reads every well-formed entry, keyed by timestamp
    fn fetch_all_entries(&self) -> Result<EntryCollection>;
}

/// Locates referenced image files and makes them available to the document.
/// Returns document-relative paths, in input order, for the names it found.
pub trait ImageResolver {
    fn resolve(&self, images: &[String]) -> Result<Vec<String>>;
}

/// Trait for writing the final document
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait DocumentWriter {
    fn write(&self, entries: &EntryCollection) -> Result<PathBuf>;
}
