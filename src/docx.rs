//! Placeholder substitution inside a `.docx` template.
//!
//! A `.docx` is a zip container; the visible text lives in
//! `word/document.xml`. Rendering copies every entry of the template archive
//! and rewrites that one part: each known `{{Token}}` is replaced in place
//! with its (XML-escaped) value, and any token left over afterwards is
//! scrubbed to the empty string rather than echoed into the document.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^{}]+\}\}").expect("valid placeholder regex"));

#[derive(Debug, Clone)]
pub struct DocxTemplate {
    bytes: Vec<u8>,
}

impl DocxTemplate {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).with_context(|| {
            format!("Failed to read template document {}", path.as_ref().display())
        })?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut archive =
            ZipArchive::new(Cursor::new(&bytes)).context("template is not a zip container")?;
        archive
            .by_name(DOCUMENT_PART)
            .context("template has no word/document.xml part")?;
        Ok(Self { bytes })
    }

    /// Fill the template and return the bytes of the finished document.
    /// Values must already be sanitized; this layer only XML-escapes them.
    pub fn render(&self, replacements: &[(&str, String)]) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(&self.bytes))
            .context("template is not a zip container")?;
        let mut out = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .context("failed to read template entry")?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut content = Vec::new();
            entry
                .read_to_end(&mut content)
                .context("failed to read template entry")?;

            if name == DOCUMENT_PART {
                let xml = String::from_utf8(content)
                    .context("word/document.xml is not valid UTF-8")?;
                content = substitute_tokens(&xml, replacements).into_bytes();
            }

            out.start_file(name, options)
                .context("failed to write document entry")?;
            out.write_all(&content)
                .context("failed to write document entry")?;
        }

        let cursor = out.finish().context("failed to finish document")?;
        Ok(cursor.into_inner())
    }
}

fn substitute_tokens(xml: &str, replacements: &[(&str, String)]) -> String {
    let mut filled = xml.to_string();
    for (token, value) in replacements {
        if filled.contains(token) {
            filled = filled.replace(token, &xml_escape(value));
        }
    }
    // A token with no replacement substitutes as empty, never as itself.
    PLACEHOLDER_RE.replace_all(&filled, "").into_owned()
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Extract the `word/document.xml` text of a rendered document. Test seam.
pub fn document_xml(docx: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(docx)).context("document is not a zip container")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .context("document has no word/document.xml part")?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .context("word/document.xml is not valid UTF-8")?;
    Ok(xml)
}
