//! Flowable Word (`.docx`) report

use std::fs::File;
use std::path::Path;

use docx_rs::{
    BreakType, Docx, Paragraph, Run, Shading, Style, StyleType, Table, TableCell, TableRow,
    WidthType,
};

use super::{ListStyle, Report, ReportWriter, SectionBody, IDENTITY_HEADER, REPORT_TITLE};
use crate::{Error, Result};

const HEADING_1: &str = "Heading1";
const HEADING_2: &str = "Heading2";
const LIST_BULLET: &str = "ListBullet";
const LIST_NUMBER: &str = "ListNumber";

/// Header-row fill, same grey as the PDF header cells.
const HEADER_FILL: &str = "C8C8C8";

/// Column widths in twentieths of a point (50mm / 130mm).
const FIELD_WIDTH: usize = 2835;
const VALUE_WIDTH: usize = 7371;

/// Writes `.docx` reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxReportWriter;

impl DocxReportWriter {
    /// Create a Word writer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn document(report: &Report<'_>) -> Docx {
        let mut docx = with_styles(Docx::new())
            .add_paragraph(styled(REPORT_TITLE, HEADING_1))
            .add_table(identity_table(report))
            .add_paragraph(Paragraph::new());

        for section in report.sections() {
            docx = docx.add_paragraph(styled(section.header(), HEADING_2));
            match section.body() {
                SectionBody::List { style, rows } => {
                    let style_id = match style {
                        ListStyle::Bullet => LIST_BULLET,
                        ListStyle::Number => LIST_NUMBER,
                    };
                    for row in rows {
                        docx = docx.add_paragraph(styled(row, style_id));
                    }
                }
                SectionBody::Text(text) => {
                    docx = docx.add_paragraph(Paragraph::new().add_run(multiline_run(text)));
                }
            }
        }
        docx
    }
}

impl ReportWriter for DocxReportWriter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn write(&self, report: &Report<'_>, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        Self::document(report)
            .build()
            .pack(file)
            .map_err(|e| Error::DocxRender(e.to_string()))?;
        Ok(())
    }
}

fn with_styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new(HEADING_1, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    )
    .add_style(
        Style::new(HEADING_2, StyleType::Paragraph)
            .name("Heading 2")
            .size(26)
            .bold(),
    )
    .add_style(Style::new(LIST_BULLET, StyleType::Paragraph).name("List Bullet"))
    .add_style(Style::new(LIST_NUMBER, StyleType::Paragraph).name("List Number"))
}

fn styled(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(style_id)
}

/// Word ignores raw newlines inside text runs; they become explicit breaks.
fn multiline_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

fn identity_table(report: &Report<'_>) -> Table {
    let header = TableRow::new(vec![
        cell(IDENTITY_HEADER.0, FIELD_WIDTH, true),
        cell(IDENTITY_HEADER.1, VALUE_WIDTH, true),
    ]);
    let rows = std::iter::once(header).chain(report.identity().iter().map(|&(field, value)| {
        TableRow::new(vec![
            cell(field, FIELD_WIDTH, false),
            cell(value, VALUE_WIDTH, false),
        ])
    }));

    Table::new(rows.collect()).set_grid(vec![FIELD_WIDTH, VALUE_WIDTH])
}

fn cell(text: &str, width: usize, shaded: bool) -> TableCell {
    let cell = TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
        .width(width, WidthType::Dxa);
    if shaded {
        cell.shading(Shading::new().fill(HEADER_FILL))
    } else {
        cell
    }
}
