//! Cursor-driven page layout in millimetres on A4 sheets.
//!
//! Content is placed with [`Document::cell`] and [`Document::block`], which
//! write at the cursor and advance it. Pages get their header and footer from
//! a [`PageTemplate`].

use std::path::PathBuf;

use crate::theme::{self, Rgb};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
/// Padding between a cell border and its text.
const CELL_PADDING: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    /// Size in points.
    pub size: f32,
}

impl Font {
    pub const fn new(style: FontStyle, size: f32) -> Self {
        Self { style, size }
    }

    /// Approximate advance width of `text` in millimetres.
    pub fn text_width(&self, text: &str) -> f32 {
        let em = match self.style {
            FontStyle::Bold => 0.55,
            _ => 0.5,
        };
        text.chars().count() as f32 * self.size * PT_TO_MM * em
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// What happens to the cursor after a cell is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move right, staying on the same line.
    Right,
    /// Move to the start of the next line.
    NextLine,
}

#[derive(Debug, Clone, Copy)]
pub struct CellStyle {
    pub border: bool,
    pub align: Align,
    pub fill: bool,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        border: false,
        align: Align::Left,
        fill: false,
    };

    pub const fn centered() -> Self {
        Self {
            align: Align::Center,
            ..Self::PLAIN
        }
    }

    pub const fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub const fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub lines: Vec<String>,
    pub line_height: f32,
    pub font: Font,
    pub color: Rgb,
    pub fill: Option<Rgb>,
    pub border: bool,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub path: PathBuf,
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextBox),
    Image(ImageBox),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub number: usize,
    pub elements: Vec<Element>,
}

/// Decorations drawn on every page.
pub trait PageTemplate {
    fn header(&self, doc: &mut Document);

    fn footer(&self, doc: &mut Document);
}

#[derive(Debug)]
pub struct Document {
    pages: Vec<Page>,
    x: f32,
    y: f32,
    font: Font,
    text_color: Rgb,
    fill_color: Rgb,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font: Font::new(FontStyle::Regular, 12.0),
            text_color: theme::BLACK,
            fill_color: theme::WHITE,
        }
    }

    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    /// Close the current page (drawing its footer) and open a new one with a header.
    pub fn add_page(&mut self, template: &dyn PageTemplate) {
        if !self.pages.is_empty() {
            template.footer(self);
        }
        self.pages.push(Page {
            number: self.pages.len() + 1,
            elements: Vec::new(),
        });
        self.x = MARGIN;
        self.y = MARGIN;
        template.header(self);
    }

    /// Draw the footer of the last page and return the finished pages.
    pub fn finish(mut self, template: &dyn PageTemplate) -> Vec<Page> {
        if !self.pages.is_empty() {
            template.footer(&mut self);
        }
        self.pages
    }

    pub fn set_font(&mut self, style: FontStyle, size: f32) {
        self.font = Font::new(style, size);
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move to the left margin at `y`; negative values count from the bottom edge.
    pub fn set_y(&mut self, y: f32) {
        self.x = MARGIN;
        self.y = if y < 0.0 { PAGE_HEIGHT + y } else { y };
    }

    /// Line break of height `h`.
    pub fn ln(&mut self, h: f32) {
        self.x = MARGIN;
        self.y += h;
    }

    /// Width left between the cursor and the right margin.
    pub fn remaining_width(&self) -> f32 {
        PAGE_WIDTH - MARGIN - self.x
    }

    /// Write a single-line cell. A width of zero extends to the right margin.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, style: CellStyle, advance: Advance) {
        let w = if w <= 0.0 { self.remaining_width() } else { w };
        self.place(self.x, self.y, w, h, vec![text.to_string()], h, style);
        match advance {
            Advance::Right => self.x += w,
            Advance::NextLine => self.ln(h),
        }
    }

    /// Write pre-wrapped `lines` into a box of fixed size at the cursor, moving right.
    pub fn block(&mut self, w: f32, h: f32, lines: Vec<String>, line_height: f32, style: CellStyle) {
        self.place(self.x, self.y, w, h, lines, line_height, style);
        self.x += w;
    }

    pub fn image(&mut self, path: impl Into<PathBuf>, x: f32, y: f32, w: f32) {
        self.push(Element::Image(ImageBox {
            path: path.into(),
            x,
            y,
            w,
        }));
    }

    /// Split `text` into lines that fit in a cell of width `w` with the current font.
    /// Explicit newlines are kept; a trailing newline does not add an empty line.
    pub fn wrap(&self, text: &str, w: f32) -> Vec<String> {
        let max = (w - 2.0 * CELL_PADDING).max(1.0);
        let mut lines = Vec::new();

        for paragraph in text.trim_end_matches('\n').split('\n') {
            let mut line = String::new();
            for word in paragraph.split(' ') {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", line, word)
                };
                if self.font.text_width(&candidate) <= max {
                    line = candidate;
                    continue;
                }
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                // Hard-break words wider than the cell.
                for c in word.chars() {
                    line.push(c);
                    if self.font.text_width(&line) > max && line.chars().count() > 1 {
                        line.pop();
                        lines.push(std::mem::take(&mut line));
                        line.push(c);
                    }
                }
            }
            lines.push(line);
        }

        lines
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        lines: Vec<String>,
        line_height: f32,
        style: CellStyle,
    ) {
        let text = TextBox {
            x,
            y,
            w,
            h,
            lines,
            line_height,
            font: self.font,
            color: self.text_color,
            fill: style.fill.then_some(self.fill_color),
            border: style.border,
            align: style.align,
        };
        self.push(Element::Text(text));
    }

    fn push(&mut self, element: Element) {
        if self.pages.is_empty() {
            self.pages.push(Page {
                number: 1,
                elements: Vec::new(),
            });
        }
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Numbered;

    impl PageTemplate for Numbered {
        fn header(&self, doc: &mut Document) {
            doc.cell(0.0, 10.0, "header", CellStyle::centered(), Advance::NextLine);
        }

        fn footer(&self, doc: &mut Document) {
            doc.set_y(-15.0);
            let text = format!("Page {}", doc.page_no());
            doc.cell(0.0, 10.0, &text, CellStyle::centered(), Advance::Right);
        }
    }

    fn text_boxes(page: &Page) -> Vec<&TextBox> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t),
                Element::Image(_) => None,
            })
            .collect()
    }

    #[test]
    fn pages_get_header_and_footer() {
        let mut doc = Document::new();
        doc.add_page(&Numbered);
        doc.add_page(&Numbered);
        let pages = doc.finish(&Numbered);

        assert_eq!(pages.len(), 2);
        for page in &pages {
            let footer = format!("Page {}", page.number);
            let lines: Vec<&str> = text_boxes(page)
                .iter()
                .flat_map(|t| t.lines.iter().map(String::as_str))
                .collect();
            assert_eq!(lines, vec!["header", footer.as_str()]);
        }
        let footer = text_boxes(&pages[1])[1];
        assert_eq!(footer.y, PAGE_HEIGHT - 15.0);
        assert_eq!(footer.w, PAGE_WIDTH - 2.0 * MARGIN);
    }

    #[test]
    fn cell_advances_cursor() {
        let mut doc = Document::new();
        doc.add_page(&Numbered);
        let y = doc.y();
        doc.cell(15.0, 10.0, "a", CellStyle::PLAIN.bordered(), Advance::Right);
        assert_eq!((doc.x(), doc.y()), (MARGIN + 15.0, y));
        doc.cell(20.0, 10.0, "b", CellStyle::PLAIN, Advance::NextLine);
        assert_eq!((doc.x(), doc.y()), (MARGIN, y + 10.0));
    }

    #[test]
    fn fill_uses_color_current_at_placement() {
        let mut doc = Document::new();
        doc.add_page(&Numbered);
        doc.set_fill_color(theme::MAROON);
        doc.cell(10.0, 10.0, "x", CellStyle::PLAIN.filled(), Advance::Right);
        doc.set_fill_color(theme::WHITE);
        doc.cell(10.0, 10.0, "y", CellStyle::PLAIN, Advance::Right);

        let pages = doc.finish(&Numbered);
        let boxes = text_boxes(&pages[0]);
        assert_eq!(boxes[1].fill, Some(theme::MAROON));
        assert_eq!(boxes[2].fill, None);
    }

    #[test]
    fn block_keeps_its_height_and_moves_right() {
        let mut doc = Document::new();
        doc.add_page(&Numbered);
        doc.set_font(FontStyle::Regular, 8.0);
        let (x, y) = (doc.x(), doc.y());
        let lines = doc.wrap("a long description that cannot fit", 20.0);
        assert!(lines.len() > 1);
        doc.block(20.0, 30.0, lines.clone(), 5.0, CellStyle::PLAIN.bordered());
        assert_eq!((doc.x(), doc.y()), (x + 20.0, y));

        let pages = doc.finish(&Numbered);
        let placed = text_boxes(&pages[0])[1].clone();
        assert_eq!((placed.h, placed.line_height), (30.0, 5.0));
        assert_eq!(placed.lines, lines);
        assert!(placed.border);
    }

    #[test]
    fn wrap_keeps_newlines_and_breaks_long_words() {
        let mut doc = Document::new();
        doc.set_font(FontStyle::Regular, 8.0);
        assert_eq!(doc.wrap("one\ntwo\n", 100.0), vec!["one", "two"]);
        assert_eq!(doc.wrap("", 100.0), vec![""]);

        let long = "x".repeat(200);
        let lines = doc.wrap(&long, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), long);
        for line in &lines {
            assert!(doc.font().text_width(line) <= 18.0);
        }
    }
}
