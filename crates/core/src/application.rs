use std::path::PathBuf;

use log::info;

use crate::domain::DateRange;
use crate::ports::{DocumentWriter, EntryRepository, Result};

/// Application service that turns a blog content tree into one document
pub struct ConversionServiceImpl {
    entry_repository: Box<dyn EntryRepository>,
    document_writer: Box<dyn DocumentWriter>,
    date_range: DateRange,
}

impl ConversionServiceImpl {
    /// Creates a new ConversionServiceImpl with the given dependencies
    pub fn new(
        entry_repository: Box<dyn EntryRepository>,
        document_writer: Box<dyn DocumentWriter>,
        date_range: DateRange,
    ) -> Self {
        Self {
            entry_repository,
            document_writer,
            date_range,
        }
    }

    /// Executes the conversion: gathers entries, filters them by date and writes the document
    pub fn execute_conversion(&self) -> Result<PathBuf> {
        info!("Start");
        let mut entries = self.entry_repository.fetch_all_entries()?;
        let gathered = entries.len();
        self.date_range.retain_within(&mut entries);
        info!("{} of {} entries inside the date range", entries.len(), gathered);
        let output = self.document_writer.write(&entries)?;
        info!("End");
        Ok(output)
    }
}
