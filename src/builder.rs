//! Document construction for the maintenance contract.
//!
//! [`DocumentBuilder`] prepares a `genpdf::Document` with the page geometry and metadata, while
//! [`PdfBuilder`] lays out a [`ContractDocument`] on it and renders the PDF into memory.

use std::cell::Cell;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use genpdf::elements::{LinearLayout, Paragraph, TableLayout};
use genpdf::error::Error;
use genpdf::style::{Style, StyledString};
use genpdf::{Element, Margins, PageDecorator, Size};
use log::{debug, info};

use crate::elements::{GridTable, Rule, Shaded, Spacer};
use crate::fonts;
use crate::model::{Block, ContractDocument, Field, Section, TitleBlock};
use crate::style::{mm, pt, StyleSheet, TextStyle};

/// Errors that can occur while producing the contract PDF.
#[derive(Debug)]
pub enum PdfBuildError {
    /// No usable font metrics were found.
    FontLoad(Error),
    /// The content could not be arranged into layout elements.
    Layout(Error),
    /// Pagination or PDF encoding failed.
    Render(Error),
    /// The output location could not be determined.
    OutputPath(io::Error),
    /// The rendered bytes could not be written.
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl fmt::Display for PdfBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(err) => write!(f, "Failed to load fonts: {err}"),
            Self::Layout(err) => write!(f, "Failed to lay out document: {err}"),
            Self::Render(err) => write!(f, "Failed to render PDF: {err}"),
            Self::OutputPath(err) => write!(f, "Failed to resolve output location: {err}"),
            Self::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PdfBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Layout(err) | Self::Render(err) => Some(err),
            Self::OutputPath(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// A rendered PDF held in memory.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Encoded PDF bytes.
    pub bytes: Vec<u8>,
    /// Number of pages produced by the layout pass.
    pub page_count: usize,
}

/// Builder for `genpdf::Document` instances with fixed page geometry.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    title: Option<String>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the title stored in the document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builds a configured `genpdf::Document` and the counter its page decorator advances.
    pub fn build(self) -> Result<(genpdf::Document, PageCounter), Error> {
        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }
        if let Some(title) = self.title {
            document.set_title(title);
        }

        let counter = PageCounter::default();
        document.set_page_decorator(CountingPageDecorator::new(self.margins, counter.clone()));

        Ok((document, counter))
    }
}

/// Shared count of the pages decorated during rendering.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    /// Returns the number of pages started so far.
    pub fn get(&self) -> usize {
        self.0.get()
    }

    fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }
}

struct CountingPageDecorator {
    margins: Option<Margins>,
    pages: PageCounter,
}

impl CountingPageDecorator {
    fn new(margins: Option<Margins>, pages: PageCounter) -> Self {
        Self { margins, pages }
    }
}

impl PageDecorator for CountingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.pages.increment();
        debug!("Starting page {}", self.pages.get());

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}

/// Lays out a [`ContractDocument`] and renders it to PDF bytes.
pub struct PdfBuilder {
    contract: ContractDocument,
}

impl PdfBuilder {
    /// Creates a builder for the given contract.
    pub fn new(contract: ContractDocument) -> Self {
        Self { contract }
    }

    /// Assembles the content and runs the layout and rendering pass.
    pub fn render(&self) -> Result<RenderedPdf, PdfBuildError> {
        let page = self.contract.page();
        let (mut document, pages) = DocumentBuilder::new()
            .with_paper_size(Size::new(mm(page.width_mm), mm(page.height_mm)))
            .with_margins(Margins::all(mm(page.margin_mm)))
            .with_title(self.contract.metadata_title())
            .build()
            .map_err(PdfBuildError::FontLoad)?;

        let styles = self.contract.styles();
        document.push(title_block(self.contract.title(), styles));
        for section in self.contract.sections() {
            debug!("Laying out section {}", section.heading());
            document.push(self.section(section)?);
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;

        let page_count = pages.get();
        info!("Rendered {} page(s), {} bytes", page_count, bytes.len());
        Ok(RenderedPdf { bytes, page_count })
    }

    fn section(&self, section: &Section) -> Result<LinearLayout, PdfBuildError> {
        let styles = self.contract.styles();
        let mut layout = LinearLayout::vertical();
        layout.push(section_banner(&section.heading(), &styles.section));
        layout.push(Spacer::points(section.heading_gap_pt()));

        for block in section.blocks() {
            match block {
                Block::Field(field) => layout.push(self.field_row(field)?),
                Block::Paragraph(text) => layout.push(text_block(text, &styles.value)),
                Block::Table(table) => layout.push(GridTable::new(table)),
            }
        }

        if section.space_after_pt() > 0.0 {
            layout.push(Spacer::points(section.space_after_pt()));
        }
        Ok(layout)
    }

    fn field_row(&self, field: &Field) -> Result<TableLayout, PdfBuildError> {
        let styles = self.contract.styles();
        let label_width = column_weight(self.contract.label_column_mm());
        let content_width = self.contract.page().content_width_mm();
        let value_width = column_weight(content_width - self.contract.label_column_mm());

        let mut row = TableLayout::new(vec![label_width, value_width]);
        row.row()
            .element(text_block(field.label(), &styles.label))
            .element(text_block(field.value(), &styles.value))
            .push()
            .map_err(PdfBuildError::Layout)?;
        Ok(row)
    }
}

/// Table columns are laid out by relative weight; tenths of a millimetre keep the ratios exact.
fn column_weight(width_mm: f64) -> usize {
    (width_mm * 10.0).round().max(1.0) as usize
}

fn paragraph(text: &str, style: &TextStyle) -> Paragraph {
    let mut paragraph = Paragraph::new(StyledString::new(text.to_owned(), style.to_style()));
    paragraph.set_alignment(style.alignment.into());
    paragraph
}

fn text_block(text: &str, style: &TextStyle) -> impl Element {
    paragraph(text, style).padded(Margins::trbl(0, 0, pt(style.space_after), 0))
}

fn section_banner(heading: &str, style: &TextStyle) -> impl Element {
    Shaded::new(heading, *style).padded(Margins::trbl(0, 0, pt(style.space_after), 0))
}

fn title_block(title: &TitleBlock, styles: &StyleSheet) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    layout.push(text_block(title.heading(), &styles.title));
    for subtitle in title.subtitles() {
        layout.push(text_block(subtitle, &styles.subtitle));
    }
    layout.push(
        Rule::new(pt(title.rule_thickness_pt()), styles.title.color)
            .with_space_after(pt(title.rule_space_after_pt())),
    );
    layout
}
