//! Paginated test execution report: cover, summary and detailed results table.

pub mod console;
pub mod html;
pub mod json;
pub mod layout;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::config::Config;
use crate::models::{RunSummary, TestResult, test_id};
use crate::suite::ExpectedResults;
use crate::theme;

use layout::{Advance, CellStyle, Document, FontStyle, PAGE_HEIGHT, Page, PageTemplate};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rows start on a new page once the cursor is past this point.
const ROW_BREAK_Y: f32 = 250.0;
/// Lowest point a row may reach before it is moved to the next page.
const BODY_BOTTOM: f32 = PAGE_HEIGHT - 20.0;
const ROW_HEIGHT: f32 = 10.0;
const ROW_LINE_HEIGHT: f32 = 5.0;
/// Cap on wrapped lines per cell so a single row always fits on a page.
const MAX_ROW_LINES: usize = 40;

const COLUMNS: [(&str, f32); 6] = [
    ("TCID", 15.0),
    ("Description", 40.0),
    ("Test Data", 35.0),
    ("Expected", 40.0),
    ("Actual", 40.0),
    ("Status", 20.0),
];

/// Presentation settings for one report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub brand: String,
    pub environment: String,
    /// Only set when the file exists; a missing logo is skipped.
    pub logo: Option<PathBuf>,
    pub generated_at: NaiveDateTime,
}

impl ReportOptions {
    pub fn from_config(config: &Config, generated_at: NaiveDateTime) -> Self {
        let logo = config.logo_path();
        Self {
            brand: config.report.brand.clone(),
            environment: config.report.environment.clone(),
            logo: logo.exists().then_some(logo),
            generated_at,
        }
    }

    fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    fn title(&self) -> String {
        format!("{} Test Execution Report", self.brand)
    }
}

pub struct Report<'a> {
    results: &'a [TestResult],
    summary: RunSummary,
    expected: &'a ExpectedResults,
    options: &'a ReportOptions,
}

impl<'a> Report<'a> {
    pub fn new(
        results: &'a [TestResult],
        expected: &'a ExpectedResults,
        options: &'a ReportOptions,
    ) -> Self {
        Self {
            results,
            summary: RunSummary::from_results(results),
            expected,
            options,
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn results(&self) -> &'a [TestResult] {
        self.results
    }

    /// Expected-result text for the 1-based row `position`.
    pub fn expected(&self, position: usize) -> &'a str {
        self.expected.get(position)
    }

    pub fn options(&self) -> &'a ReportOptions {
        self.options
    }

    /// Lay the report out into pages.
    pub fn layout(&self) -> Vec<Page> {
        let template = Letterhead {
            brand: &self.options.brand,
            logo: self.options.logo.as_deref(),
            timestamp: self.options.timestamp(),
        };
        let mut doc = Document::new();

        self.cover_page(&mut doc, &template);
        self.summary_page(&mut doc, &template);
        self.details(&mut doc, &template);

        let pages = doc.finish(&template);
        tracing::debug!(pages = pages.len(), rows = self.results.len(), "report laid out");
        pages
    }

    pub fn to_html(&self) -> String {
        html::render(&self.options.title(), &self.layout())
    }

    /// Write the HTML report to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_html())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }

    /// Write the JSON export to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = json::to_string(self).context("failed to serialize results")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        tracing::info!(path = %path.display(), "results exported");
        Ok(())
    }

    fn cover_page(&self, doc: &mut Document, template: &Letterhead<'_>) {
        doc.add_page(template);
        doc.set_font(FontStyle::Bold, 16.0);
        doc.cell(0.0, 20.0, &self.options.title(), CellStyle::centered(), Advance::NextLine);
        doc.ln(60.0);
        doc.set_font(FontStyle::Regular, 12.0);
        let generated = format!("Generated on: {}", self.options.timestamp());
        doc.cell(0.0, 10.0, &generated, CellStyle::centered(), Advance::NextLine);
        let environment = format!("Test Environment: {}", self.options.environment);
        doc.cell(0.0, 10.0, &environment, CellStyle::centered(), Advance::NextLine);
    }

    fn summary_page(&self, doc: &mut Document, template: &Letterhead<'_>) {
        doc.add_page(template);
        doc.set_font(FontStyle::Bold, 14.0);
        doc.cell(0.0, 10.0, "Test Execution Summary", CellStyle::PLAIN, Advance::NextLine);
        doc.ln(5.0);

        doc.set_font(FontStyle::Regular, 12.0);
        for line in [
            format!("Total Tests: {}", self.summary.total),
            format!("Passed: {}", self.summary.passed),
            format!("Failed: {}", self.summary.failed),
        ] {
            doc.cell(0.0, 10.0, &line, CellStyle::PLAIN, Advance::NextLine);
        }
        doc.ln(10.0);
    }

    fn details(&self, doc: &mut Document, template: &Letterhead<'_>) {
        doc.add_page(template);
        doc.set_font(FontStyle::Bold, 14.0);
        doc.cell(0.0, 10.0, "Detailed Test Results", CellStyle::PLAIN, Advance::NextLine);
        doc.ln(5.0);

        table_header(doc);
        for (position, result) in (1..).zip(self.results) {
            self.row(doc, template, position, result);
        }
    }

    fn row(
        &self,
        doc: &mut Document,
        template: &Letterhead<'_>,
        position: usize,
        result: &TestResult,
    ) {
        doc.set_font(FontStyle::Regular, 8.0);
        let texts = [
            result.description.clone(),
            result.test_data_text(),
            self.expected(position).to_string(),
            result.actual_result.clone(),
        ];
        let wrapped: Vec<Vec<String>> = texts
            .iter()
            .zip(&COLUMNS[1..5])
            .map(|(text, &(_, w))| clamp_lines(doc.wrap(text, w)))
            .collect();
        let tallest = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let height = (tallest as f32 * ROW_LINE_HEIGHT).max(ROW_HEIGHT);

        if doc.y() > ROW_BREAK_Y || doc.y() + height > BODY_BOTTOM {
            doc.add_page(template);
            table_header(doc);
            doc.set_font(FontStyle::Regular, 8.0);
        }

        let status = result.status;
        doc.set_fill_color(status.fill());
        let id_style = CellStyle::centered().bordered().filled();
        doc.block(COLUMNS[0].1, height, vec![test_id(position)], ROW_HEIGHT, id_style);
        for (lines, &(_, w)) in wrapped.into_iter().zip(&COLUMNS[1..5]) {
            doc.block(w, height, lines, ROW_LINE_HEIGHT, CellStyle::PLAIN.bordered());
        }
        doc.block(
            COLUMNS[5].1,
            height,
            vec![status.label().to_string()],
            ROW_HEIGHT,
            id_style,
        );
        doc.ln(height);
        doc.set_fill_color(theme::WHITE);
    }
}

fn table_header(doc: &mut Document) {
    doc.set_fill_color(theme::MAROON);
    doc.set_text_color(theme::WHITE);
    doc.set_font(FontStyle::Bold, 10.0);
    let style = CellStyle::centered().bordered().filled();
    for (title, w) in COLUMNS {
        doc.cell(w, ROW_HEIGHT, title, style, Advance::Right);
    }
    doc.ln(ROW_HEIGHT);
    doc.set_text_color(theme::BLACK);
    doc.set_fill_color(theme::WHITE);
}

fn clamp_lines(mut lines: Vec<String>) -> Vec<String> {
    if lines.len() > MAX_ROW_LINES {
        lines.truncate(MAX_ROW_LINES);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

/// Header and footer drawn on every report page.
struct Letterhead<'a> {
    brand: &'a str,
    logo: Option<&'a Path>,
    timestamp: String,
}

impl PageTemplate for Letterhead<'_> {
    fn header(&self, doc: &mut Document) {
        if let Some(logo) = self.logo {
            doc.image(logo, 10.0, 8.0, 30.0);
        }
        doc.set_text_color(theme::BLACK);
        doc.set_font(FontStyle::Bold, 12.0);
        let title = format!("{} - Test Execution Report", self.brand);
        doc.cell(0.0, 10.0, &title, CellStyle::centered(), Advance::NextLine);
        doc.set_font(FontStyle::Italic, 10.0);
        doc.cell(
            0.0,
            10.0,
            "Manual Verification Results",
            CellStyle::centered(),
            Advance::NextLine,
        );
        doc.ln(5.0);
    }

    fn footer(&self, doc: &mut Document) {
        let font = doc.font();
        doc.set_y(-15.0);
        doc.set_font(FontStyle::Italic, 8.0);
        let text = format!("Page {} | Generated on {}", doc.page_no(), self.timestamp);
        doc.cell(0.0, 10.0, &text, CellStyle::centered(), Advance::Right);
        doc.set_font(font.style, font.size);
    }
}
