//! Minimal PDF 1.4 writer for the cashflow table. Uses the built-in Helvetica
//! face so no fonts need embedding.

use onsite_domain::MonthlySummary;

use super::{format_money, REPORT_HEADING, REPORT_TITLE};

// A4 in points.
const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN_LEFT: u32 = 50;
const TOP: u32 = 792;
const ROW_HEIGHT: u32 = 16;
const ROWS_PER_PAGE: usize = 40;
const COLUMNS: [(&str, u32); 4] = [("Month", 50), ("Income", 160), ("Expenses", 290), ("Net", 420)];

// Objects 1..=3 are fixed; each page then takes a page object and a content stream.
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;

pub fn render_pdf(rows: &[MonthlySummary]) -> Vec<u8> {
    let chunks: Vec<&[MonthlySummary]> = if rows.is_empty() {
        vec![rows]
    } else {
        rows.chunks(ROWS_PER_PAGE).collect()
    };
    let page_id = |index: usize| FONT_ID + 1 + index * 2;
    let info_id = FONT_ID + 1 + chunks.len() * 2;

    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(info_id);
    objects.push(format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).into_bytes());
    let kids: Vec<String> = (0..chunks.len())
        .map(|index| format!("{} 0 R", page_id(index)))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            chunks.len()
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    for (index, chunk) in chunks.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES_ID,
                PAGE_WIDTH,
                PAGE_HEIGHT,
                FONT_ID,
                page_id(index) + 1
            )
            .into_bytes(),
        );
        let content = page_content(chunk, index == 0);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }
    objects.push(
        format!(
            "<< /Title ({}) /Producer (OnSite) >>",
            escape_text(REPORT_TITLE)
        )
        .into_bytes(),
    );

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }
    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            CATALOG_ID,
            info_id,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn page_content(rows: &[MonthlySummary], first_page: bool) -> String {
    let mut ops = String::new();
    let mut y = TOP;
    if first_page {
        push_text(&mut ops, 16, MARGIN_LEFT, y, REPORT_HEADING);
        y -= ROW_HEIGHT * 2;
    }
    for (label, x) in COLUMNS {
        push_text(&mut ops, 11, x, y, label);
    }
    let rule_y = y - 4;
    ops.push_str(&format!(
        "0.5 w {} {} m {} {} l S\n",
        MARGIN_LEFT,
        rule_y,
        PAGE_WIDTH - MARGIN_LEFT,
        rule_y
    ));
    for row in rows {
        y -= ROW_HEIGHT;
        let cells = [
            row.month.to_string(),
            format_money(row.income),
            format_money(row.expenses),
            format_money(row.net),
        ];
        for ((_, x), value) in COLUMNS.iter().zip(cells.iter()) {
            push_text(&mut ops, 10, *x, y, value);
        }
    }
    ops
}

fn push_text(ops: &mut String, size: u32, x: u32, y: u32, text: &str) {
    ops.push_str(&format!(
        "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
        size,
        x,
        y,
        escape_text(text)
    ));
}

/// Escapes a literal string operand. Non-ASCII characters are replaced since
/// the font uses a single-byte encoding.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ch if ch.is_ascii() && !ch.is_ascii_control() => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}
