use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// An open PDF and the path it was loaded from.
pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = Document::load(&path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// 1-indexed page numbers with their object ids, in page order.
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy the listed 1-indexed pages into a new document, dropping
    /// everything else along with objects that become unreferenced.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{})", page, total);
            }
        }

        let mut new_doc = self.doc.clone();
        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .filter(|(num, _)| !pages.contains(num))
            .map(|(num, _)| *num)
            .collect();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        new_doc.prune_objects();
        new_doc.compress();

        Ok(new_doc)
    }

    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Page count, file size, and the document information dictionary.
    pub fn summary(&self) -> DocumentSummary {
        let mut summary = DocumentSummary {
            path: self.path.clone(),
            page_count: self.page_count(),
            file_size: std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0),
            ..Default::default()
        };

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                summary.title = info_string(dict, b"Title");
                summary.author = info_string(dict, b"Author");
                summary.subject = info_string(dict, b"Subject");
                summary.keywords = info_string(dict, b"Keywords");
                summary.creator = info_string(dict, b"Creator");
                summary.producer = info_string(dict, b"Producer");
                summary.creation_date = info_string(dict, b"CreationDate");
                summary.mod_date = info_string(dict, b"ModDate");
            }
        }

        summary
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub page_count: u32,
    pub file_size: u64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

fn info_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
        _ => None,
    }
}

/// Decode a text string from the info dictionary: UTF-16BE when it carries a
/// BOM, PDFDocEncoding (approximated as Latin-1) otherwise.
fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
