use std::panic::{self, AssertUnwindSafe};

use pdf_extract::{Document, PlainTextOutput};
use tracing::warn;

use super::ExtractError;

/// Concatenates per-page text in page order. Pages without a text layer
/// (scanned images) contribute nothing.
///
/// The underlying parser can panic on malformed input. Each page is fenced
/// separately, so a bad page is logged and skipped while the text of every
/// other page is kept.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut doc = panic::catch_unwind(|| Document::load_mem(bytes))
        .map_err(|_| ExtractError::Panicked)?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    if doc.is_encrypted() {
        if let Err(e) = doc.decrypt("") {
            return Err(ExtractError::Pdf(format!("encrypted document: {e}")));
        }
    }

    let mut text = String::new();
    for page_num in doc.get_pages().into_keys() {
        match panic::catch_unwind(AssertUnwindSafe(|| page_text(&doc, page_num))) {
            Ok(Ok(page)) => text.push_str(&page),
            Ok(Err(e)) => warn!(page = page_num, "Error reading PDF page: {e}"),
            Err(_) => warn!(page = page_num, "PDF parser panicked on page"),
        }
    }

    Ok(text)
}

fn page_text(doc: &Document, page_num: u32) -> Result<String, ExtractError> {
    let mut page = String::new();
    {
        let mut output = PlainTextOutput::new(&mut page);
        pdf_extract::output_doc_page(doc, &mut output, page_num)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    }
    Ok(page)
}
