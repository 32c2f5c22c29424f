//! Fixed-layout PDF report
//!
//! A4 pages, bordered 10mm rows, grey-shaded header cells. Free text is
//! wrapped into a bordered multi-line cell that continues on the next page
//! when it runs past the bottom margin.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};

use super::{Report, ReportWriter, SectionBody, IDENTITY_HEADER, REPORT_TITLE};
use crate::{Error, Result};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const FULL_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const FIELD_WIDTH: f32 = 50.0;
const VALUE_WIDTH: f32 = 130.0;
const ROW_HEIGHT: f32 = 10.0;
const CELL_PADDING: f32 = 1.0;
/// Baseline offset from the top of a row, roughly centring 12pt text.
const BASELINE_OFFSET: f32 = 6.5;
const FONT_SIZE: f32 = 12.0;
const TITLE_FONT_SIZE: f32 = 16.0;
/// Outline width in points (~0.2mm).
const LINE_WIDTH: f32 = 0.57;
/// Characters per wrapped line in a full-width cell at 12pt Helvetica.
const WRAP_COLUMNS: usize = 80;
const SECTION_GAP: f32 = 5.0;
const TABLE_GAP: f32 = 10.0;
const LAYER_NAME: &str = "Report";

/// Writes `.pdf` reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReportWriter;

impl PdfReportWriter {
    /// Create a PDF writer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportWriter for PdfReportWriter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn write(&self, report: &Report<'_>, path: &Path) -> Result<()> {
        let (doc, page, layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::PdfRender(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::PdfRender(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        // The cursor borrows `doc`, which `save` consumes.
        {
            let mut pages = PageCursor {
                doc: &doc,
                layer,
                font,
                y: PAGE_HEIGHT - MARGIN,
            };

            pages.title(REPORT_TITLE, &bold);

            pages.row(&[
                (IDENTITY_HEADER.0, FIELD_WIDTH, true),
                (IDENTITY_HEADER.1, VALUE_WIDTH, true),
            ]);
            for &(field, value) in report.identity() {
                pages.row(&[(field, FIELD_WIDTH, false), (value, VALUE_WIDTH, false)]);
            }
            pages.gap(TABLE_GAP);

            for section in report.sections() {
                pages.row(&[(section.header(), FULL_WIDTH, true)]);
                match section.body() {
                    SectionBody::List { rows, .. } => {
                        for row in rows {
                            pages.row(&[(row.as_str(), FULL_WIDTH, false)]);
                        }
                    }
                    SectionBody::Text(text) => pages.text_block(text),
                }
                pages.gap(SECTION_GAP);
            }
        }

        let mut out = BufWriter::new(File::create(path)?);
        doc.save(&mut out)
            .map_err(|e| Error::PdfRender(e.to_string()))?;
        Ok(())
    }
}

/// Top-down writing position across pages. `y` is the top of the next row,
/// in mm from the bottom edge.
struct PageCursor<'d> {
    doc: &'d PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    y: f32,
}

impl PageCursor<'_> {
    fn title(&mut self, text: &str, bold: &IndirectFontRef) {
        self.ensure_space(ROW_HEIGHT);
        self.set_text_color();
        self.layer.use_text(
            text,
            TITLE_FONT_SIZE,
            Mm(MARGIN),
            Mm(self.y - BASELINE_OFFSET),
            bold,
        );
        self.y -= ROW_HEIGHT + SECTION_GAP;
    }

    /// One row of side-by-side single-line cells starting at the left margin.
    fn row(&mut self, cells: &[(&str, f32, bool)]) {
        self.ensure_space(ROW_HEIGHT);
        let mut x = MARGIN;
        for &(text, width, shaded) in cells {
            self.frame(x, width, ROW_HEIGHT, shaded);
            self.put_text(text, x, self.y);
            x += width;
        }
        self.y -= ROW_HEIGHT;
    }

    /// Full-width wrapped text, one frame per page it spans.
    fn text_block(&mut self, text: &str) {
        let lines = textwrap::wrap(text, WRAP_COLUMNS);
        let mut remaining = lines.as_slice();

        while !remaining.is_empty() {
            self.ensure_space(ROW_HEIGHT);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let fits = ((self.y - MARGIN) / ROW_HEIGHT).floor().max(1.0) as usize;
            let (chunk, rest) = remaining.split_at(fits.min(remaining.len()));

            #[allow(clippy::cast_precision_loss)]
            let height = chunk.len() as f32 * ROW_HEIGHT;
            self.frame(MARGIN, FULL_WIDTH, height, false);
            for (i, line) in chunk.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let top = self.y - i as f32 * ROW_HEIGHT;
                self.put_text(line, MARGIN, top);
            }
            self.y -= height;
            remaining = rest;
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height >= MARGIN {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Bordered box whose top-left corner is at (`x`, current `y`).
    fn frame(&self, x: f32, width: f32, height: f32, shaded: bool) {
        let (fill, mode) = if shaded {
            (Rgb::new(0.784, 0.784, 0.784, None), PaintMode::FillStroke)
        } else {
            (Rgb::new(1.0, 1.0, 1.0, None), PaintMode::Stroke)
        };
        self.layer.set_fill_color(Color::Rgb(fill));
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(LINE_WIDTH);
        self.layer.add_rect(
            Rect::new(Mm(x), Mm(self.y - height), Mm(x + width), Mm(self.y)).with_mode(mode),
        );
    }

    fn put_text(&self, text: &str, x: f32, top: f32) {
        self.set_text_color();
        self.layer.use_text(
            text,
            FONT_SIZE,
            Mm(x + CELL_PADDING),
            Mm(top - BASELINE_OFFSET),
            &self.font,
        );
    }

    fn set_text_color(&self) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }
}
