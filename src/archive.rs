//! Batch packaging: one zip archive bundling every generated document.
//!
//! Rebuilt from the session's full output list on demand — the list is
//! small and re-zipping is cheap next to the model calls that produced it.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::session::GeneratedFile;

/// `Coaching_Batch_<YYYY-MM-DD>.zip`, named for the global coaching date.
pub fn archive_name(date: NaiveDate) -> String {
    format!("Coaching_Batch_{}.zip", date.format("%Y-%m-%d"))
}

/// Bundle the generated documents into an in-memory zip archive, one entry
/// per document under its recorded filename.
pub fn bundle(files: &[GeneratedFile]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for file in files {
        writer
            .start_file(file.name.clone(), options)
            .with_context(|| format!("Failed to add {} to archive", file.name))?;
        writer
            .write_all(&file.data)
            .with_context(|| format!("Failed to add {} to archive", file.name))?;
    }

    let cursor = writer.finish().context("Failed to finish archive")?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn file(name: &str, data: &[u8]) -> GeneratedFile {
        GeneratedFile {
            name: name.to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_archive_name_uses_iso_date() {
        let date: NaiveDate = "2024-12-20".parse().unwrap();
        assert_eq!(archive_name(date), "Coaching_Batch_2024-12-20.zip");
    }

    #[test]
    fn test_bundle_contains_every_file_byte_identical() {
        let files = vec![
            file("Coaching Plan - Doe, Jane.docx", b"doc-one"),
            file("Coaching Plan - Smith, Al.docx", b"doc-two"),
        ];
        let bytes = bundle(&files).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), files.len());
        for expected in &files {
            let mut entry = archive.by_name(&expected.name).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            assert_eq!(content, expected.data);
        }
    }

    #[test]
    fn test_bundle_preserves_entry_order() {
        let files = vec![file("b.docx", b"b"), file("a.docx", b"a")];
        let bytes = bundle(&files).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let first = archive.by_index(0).unwrap().name().to_string();
        assert_eq!(first, "b.docx");
    }

    #[test]
    fn test_empty_batch_zips_to_empty_archive() {
        let bytes = bundle(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
