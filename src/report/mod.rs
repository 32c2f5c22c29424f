//! Report rendering
//!
//! One experiment record becomes one `Report`: a fixed identity table
//! followed by an ordered list of sections. Empty fields produce no section;
//! that rule lives in `Report::from_record` and nowhere else. Each output
//! format is a `ReportWriter` that lays the same `Report` out its own way.
//!
//! ```text
//! ExperimentRecord ──> Report { identity, sections } ──┬──> PdfReportWriter  (.pdf)
//!                                                      └──> DocxReportWriter (.docx)
//! ```

mod docx;
mod pdf;

pub use docx::DocxReportWriter;
pub use pdf::PdfReportWriter;

use std::path::{Path, PathBuf};

use crate::experiment::{ExperimentRecord, Timestamp};
use crate::Result;

/// Document title shown above the identity table.
pub const REPORT_TITLE: &str = "Experiment Report";

/// Header row of the identity table.
pub const IDENTITY_HEADER: (&str, &str) = ("Field", "Value");

/// How the rows of a list section are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `- <item>`
    Bullet,
    /// `<n>. <item>`, starting at 1
    Number,
}

/// Content of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody<'a> {
    /// One row per item, already prefixed, in record order.
    List {
        /// Prefix style used to build `rows`
        style: ListStyle,
        /// Display rows
        rows: Vec<String>,
    },
    /// One free-form block; may contain line breaks.
    Text(&'a str),
}

/// A titled, non-empty report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    header: &'static str,
    body: SectionBody<'a>,
}

impl<'a> Section<'a> {
    /// Section header text.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        self.header
    }

    /// Section content.
    #[must_use]
    pub const fn body(&self) -> &SectionBody<'a> {
        &self.body
    }
}

/// Format-independent layout of one experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<'a> {
    identity: [(&'static str, &'a str); 5],
    sections: Vec<Section<'a>>,
}

impl<'a> Report<'a> {
    /// Lay out `record`.
    #[must_use]
    pub fn from_record(record: &'a ExperimentRecord) -> Self {
        let identity = [
            ("Title", record.title()),
            ("Experiment ID", record.experiment_id()),
            ("Date", record.date()),
            ("Experimenter", record.experimenter()),
            ("Project", record.project()),
        ];

        let mut report = Self {
            identity,
            sections: Vec::new(),
        };
        report.push_list("Chemicals Used", record.chemicals(), ListStyle::Bullet);
        report.push_list("Equipment Used", record.equipment(), ListStyle::Bullet);
        report.push_list("Procedure", record.procedure(), ListStyle::Number);
        report.push_text("Observations", record.observations());
        report.push_text("Results", record.results());
        report
    }

    /// Field/value rows of the identity table, in display order.
    #[must_use]
    pub fn identity(&self) -> &[(&'static str, &'a str)] {
        &self.identity
    }

    /// Non-empty sections, in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section<'a>] {
        &self.sections
    }

    fn push_list(&mut self, header: &'static str, items: &[String], style: ListStyle) {
        if items.is_empty() {
            return;
        }
        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| match style {
                ListStyle::Bullet => format!("- {item}"),
                ListStyle::Number => format!("{}. {item}", i + 1),
            })
            .collect();
        self.sections.push(Section {
            header,
            body: SectionBody::List { style, rows },
        });
    }

    fn push_text(&mut self, header: &'static str, text: &'a str) {
        if text.is_empty() {
            return;
        }
        self.sections.push(Section {
            header,
            body: SectionBody::Text(text),
        });
    }
}

/// One output format.
pub trait ReportWriter {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Write `report` to a new file at `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying document library or the file write fails.
    fn write(&self, report: &Report<'_>, path: &Path) -> Result<()>;
}

/// Render `record` with `writer` into `output_dir`, named after `timestamp`.
///
/// # Errors
///
/// Returns error if the writer fails.
pub fn render<W: ReportWriter + ?Sized>(
    writer: &W,
    record: &ExperimentRecord,
    timestamp: &Timestamp,
    output_dir: &Path,
) -> Result<PathBuf> {
    let path = output_dir.join(timestamp.report_file_name(writer.extension()));
    let report = Report::from_record(record);
    writer.write(&report, &path)?;
    tracing::debug!(
        path = %path.display(),
        sections = report.sections().len(),
        "wrote experiment report"
    );
    Ok(path)
}
