//! Data structures describing the logical content of the contract document.
//!
//! The model is plain literal data.  It knows nothing about pagination; the
//! [`crate::builder`] module maps it onto `genpdf` elements.

use crate::style::{StyleSheet, TableStyle};

/// A labelled value such as `Contract Number: CMR-2024-GEA-CES-0042`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    label: String,
    value: String,
}

impl Field {
    /// Creates a field from a label and its value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Returns the label, including its trailing colon.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the displayed value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A grid of display strings rendered with a [`TableStyle`].
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    column_widths_mm: Vec<f64>,
    rows: Vec<Vec<String>>,
    style: TableStyle,
}

impl Table {
    /// Creates an empty table with the given column widths in millimetres.
    pub fn new(column_widths_mm: impl Into<Vec<f64>>, style: TableStyle) -> Self {
        Self {
            column_widths_mm: column_widths_mm.into(),
            rows: Vec::new(),
            style,
        }
    }

    /// Appends a row and returns the updated table.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the column widths in millimetres.
    pub fn column_widths_mm(&self) -> &[f64] {
        &self.column_widths_mm
    }

    /// Returns every row, header rows included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the header row, if the table has one.
    pub fn header(&self) -> Option<&[String]> {
        if self.style.header_rows == 0 {
            return None;
        }
        self.rows.first().map(Vec::as_slice)
    }

    /// Returns the table style.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Number of rows, header rows included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_widths_mm.len()
    }
}

/// Returns the number of blank lines a cell reserves if it only holds line breaks.
///
/// Such cells act as writing space, e.g. for signatures.
pub fn blank_lines(cell: &str) -> Option<usize> {
    if cell.is_empty() || !cell.chars().all(|c| c == '\n') {
        return None;
    }
    Some(cell.len())
}

/// Individual content blocks that make up a section.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// A label/value row.
    Field(Field),
    /// Free text set in the value style.
    Paragraph(String),
    /// A styled grid.
    Table(Table),
}

impl Block {
    /// Convenience helper for building a field block.
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field(Field::new(label, value))
    }

    /// Convenience helper for building a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }
}

/// A numbered section of the contract.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    number: usize,
    title: String,
    blocks: Vec<Block>,
    heading_gap_pt: f64,
    space_after_pt: f64,
}

impl Section {
    /// Space between the banner and the first block unless configured otherwise, in points.
    pub const DEFAULT_HEADING_GAP_PT: f64 = 6.0;
    /// Space left after a section unless configured otherwise, in points.
    pub const DEFAULT_SPACE_AFTER_PT: f64 = 6.0;

    /// Creates a new section with the provided number and title.
    pub fn new(number: usize, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            blocks: Vec::new(),
            heading_gap_pt: Self::DEFAULT_HEADING_GAP_PT,
            space_after_pt: Self::DEFAULT_SPACE_AFTER_PT,
        }
    }

    /// Returns the position of the section in the document, starting at 1.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the title as written, e.g. `Scope of Work`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the banner text, e.g. `4. SCOPE OF WORK`.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title.to_uppercase())
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the space between the banner and the first block, in points.
    pub fn heading_gap_pt(&self) -> f64 {
        self.heading_gap_pt
    }

    /// Returns the space left after the section, in points.
    pub fn space_after_pt(&self) -> f64 {
        self.space_after_pt
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Appends one field block per `(label, value)` pair.
    pub fn with_fields<'a, I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = &'a (&'a str, &'a str)>,
    {
        self.with_blocks(
            fields
                .into_iter()
                .map(|(label, value)| Block::field(*label, *value)),
        )
    }

    /// Sets the space below the banner in points and returns the updated section.
    pub fn with_heading_gap_pt(mut self, heading_gap_pt: f64) -> Self {
        self.heading_gap_pt = heading_gap_pt;
        self
    }

    /// Sets the trailing space in points and returns the updated section.
    pub fn with_space_after_pt(mut self, space_after_pt: f64) -> Self {
        self.space_after_pt = space_after_pt;
        self
    }

    /// Iterates over the field blocks of the section.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Field(field) => Some(field),
            _ => None,
        })
    }

    /// Iterates over the table blocks of the section.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

/// The heading lines at the top of the first page.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    heading: String,
    subtitles: Vec<String>,
    rule_thickness_pt: f64,
    rule_space_after_pt: f64,
}

impl TitleBlock {
    /// Creates a title block with a 2 pt rule followed by 10 pt of space.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            subtitles: Vec::new(),
            rule_thickness_pt: 2.0,
            rule_space_after_pt: 10.0,
        }
    }

    /// Appends a subtitle line and returns the updated block.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitles.push(subtitle.into());
        self
    }

    /// Returns the heading line.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Returns the subtitle lines.
    pub fn subtitles(&self) -> &[String] {
        &self.subtitles
    }

    /// Thickness of the closing rule, in points.
    pub fn rule_thickness_pt(&self) -> f64 {
        self.rule_thickness_pt
    }

    /// Space after the closing rule, in points.
    pub fn rule_space_after_pt(&self) -> f64 {
        self.rule_space_after_pt
    }
}

/// Page geometry of the document, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    /// Paper width.
    pub width_mm: f64,
    /// Paper height.
    pub height_mm: f64,
    /// Margin applied on every side.
    pub margin_mm: f64,
}

impl PageSetup {
    /// ISO A4 paper with the given margin on every side.
    pub const fn a4(margin_mm: f64) -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm,
        }
    }

    /// Width available to content.
    pub fn content_width_mm(&self) -> f64 {
        self.width_mm - 2.0 * self.margin_mm
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4(20.0)
    }
}

/// The complete contract: title block, sections and page geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractDocument {
    metadata_title: String,
    title: TitleBlock,
    sections: Vec<Section>,
    page: PageSetup,
    styles: StyleSheet,
    label_column_mm: f64,
}

impl ContractDocument {
    /// Creates a document with the given title block and default geometry.
    pub fn new(metadata_title: impl Into<String>, title: TitleBlock) -> Self {
        Self {
            metadata_title: metadata_title.into(),
            title,
            sections: Vec::new(),
            page: PageSetup::default(),
            styles: StyleSheet::contract(),
            label_column_mm: 55.0,
        }
    }

    /// Appends a section and returns the updated document.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Returns the title stored in the PDF metadata.
    pub fn metadata_title(&self) -> &str {
        &self.metadata_title
    }

    /// Returns the title block.
    pub fn title(&self) -> &TitleBlock {
        &self.title
    }

    /// Returns the sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the page geometry.
    pub fn page(&self) -> PageSetup {
        self.page
    }

    /// Returns the text styles.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Width of the label column of field rows, in millimetres.
    pub fn label_column_mm(&self) -> f64 {
        self.label_column_mm
    }

    /// Returns the section titles in document order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(Section::title).collect()
    }

    /// Iterates over every field of the document in order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(Section::fields)
    }

    /// Looks up a field value by its label, ignoring the trailing colon.
    pub fn field_value(&self, label: &str) -> Option<&str> {
        let wanted = label.trim_end_matches(':');
        self.fields()
            .find(|field| field.label().trim_end_matches(':') == wanted)
            .map(Field::value)
    }
}
