//! Minimal deterministic PDF writer
//!
//! Emits a complete single-font-family PDF from pre-positioned text lines.
//! Object numbering is fixed, content streams are uncompressed, and nothing
//! time- or randomness-dependent (creation dates, document IDs) is written,
//! so the same input always produces byte-identical output.

/// One positioned line of text on a page
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub bold: bool,
    pub text: String,
}

/// A single page of positioned text lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub lines: Vec<TextLine>,
}

/// Escapes text for a PDF literal string
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if c.is_ascii() && !c.is_control() => out.push(c),
            // Non-WinAnsi characters would need a CID font; a placeholder
            // keeps output deterministic instead
            _ => out.push('?'),
        }
    }
    out
}

/// Builds the content stream for one page
fn content_stream(page: &PdfPage) -> String {
    let mut stream = String::new();
    for line in &page.lines {
        let font = if line.bold { "/F2" } else { "/F1" };
        stream.push_str(&format!(
            "BT {} {:.2} Tf 1 0 0 1 {:.2} {:.2} Tm ({}) Tj ET\n",
            font,
            line.font_size,
            line.x,
            line.y,
            escape(&line.text)
        ));
    }
    stream
}

/// Writes a complete PDF document
///
/// Object layout: 1 = catalog, 2 = page tree, 3 = Helvetica, 4 =
/// Helvetica-Bold, then an alternating (page, content) pair per page.
pub fn write_pdf(pages: &[PdfPage], page_width: f64, page_height: f64) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    let page_object_ids: Vec<usize> = (0..pages.len()).map(|i| 5 + 2 * i).collect();
    let kids = page_object_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids,
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );

    for (i, page) in pages.iter().enumerate() {
        let content_id = 6 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            page_width, page_height, content_id
        ));

        let stream = content_stream(page);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets: Vec<usize> = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}
