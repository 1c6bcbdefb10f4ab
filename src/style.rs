//! Style classes used by the sample contract.
//!
//! Every text style is a plain configuration value enumerated once in
//! [`StyleSheet::contract`].  Sizes and spacing are PDF points; they are converted to
//! [`genpdf`] styles and millimetres at render time.

use genpdf::style::{Color, Style};
use genpdf::{Alignment, Mm};

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Converts a length in millimetres into a `genpdf` length.
pub(crate) fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a length in PDF points into a `genpdf` length.
pub(crate) fn pt(value: f64) -> Mm {
    mm(value * MM_PER_INCH / POINTS_PER_INCH)
}

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    /// Dark navy used for titles, values and filled bands.
    pub const DARK: Rgb = Rgb(0x1a, 0x1a, 0x2e);
    /// Muted slate used for subtitles, labels and grid lines.
    pub const MID: Rgb = Rgb(0x4a, 0x4a, 0x6a);
    /// Light grey used for banded table rows.
    pub const LIGHT: Rgb = Rgb(0xf5, 0xf5, 0xf5);
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Horizontal placement of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Font weight of a text style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular face.
    #[default]
    Normal,
    /// Bold face.
    Bold,
}

/// Inner spacing between a block's background and its text, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Space above and below the text.
    pub vertical: f64,
    /// Space left and right of the text.
    pub horizontal: f64,
}

impl Padding {
    /// Creates a padding from vertical and horizontal point values.
    pub const fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// Visual attributes of one class of text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: u8,
    /// Text colour.
    pub color: Rgb,
    /// Fill drawn behind the block, if any.
    pub background: Option<Rgb>,
    /// Horizontal placement of the text.
    pub alignment: HorizontalAlignment,
    /// Space left below the block, in points.
    pub space_after: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Padding between the background and the text.
    pub padding: Padding,
}

impl TextStyle {
    /// Creates a left aligned, regular style without background or spacing.
    pub const fn new(font_size: u8, color: Rgb) -> Self {
        Self {
            font_size,
            color,
            background: None,
            alignment: HorizontalAlignment::Left,
            space_after: 0.0,
            weight: FontWeight::Normal,
            padding: Padding::new(0.0, 0.0),
        }
    }

    /// Sets the background fill and returns the updated style.
    pub const fn with_background(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    /// Sets the alignment and returns the updated style.
    pub const fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the trailing space in points and returns the updated style.
    pub const fn with_space_after(mut self, space_after: f64) -> Self {
        self.space_after = space_after;
        self
    }

    /// Marks the style as bold.
    pub const fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Sets the padding and returns the updated style.
    pub const fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Builds the `genpdf` character style for this class.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new()
            .with_font_size(self.font_size)
            .with_color(self.color.into());
        if self.weight == FontWeight::Bold {
            style.set_bold();
        }
        style
    }
}

/// The set of text styles used by the contract document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleSheet {
    /// Document heading.
    pub title: TextStyle,
    /// Lines under the heading.
    pub subtitle: TextStyle,
    /// Numbered section banners.
    pub section: TextStyle,
    /// Field labels.
    pub label: TextStyle,
    /// Field values and free paragraphs.
    pub value: TextStyle,
}

impl StyleSheet {
    /// Styles of the CES maintenance contract.
    pub const fn contract() -> Self {
        Self {
            title: TextStyle::new(14, Rgb::DARK)
                .bold()
                .with_alignment(HorizontalAlignment::Center)
                .with_space_after(4.0),
            subtitle: TextStyle::new(9, Rgb::MID)
                .with_alignment(HorizontalAlignment::Center)
                .with_space_after(2.0),
            section: TextStyle::new(10, Rgb::WHITE)
                .bold()
                .with_background(Rgb::DARK)
                .with_space_after(6.0)
                .with_padding(Padding::new(4.0, 6.0)),
            label: TextStyle::new(9, Rgb::MID).bold().with_space_after(2.0),
            value: TextStyle::new(9, Rgb::DARK).with_space_after(6.0),
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::contract()
    }
}

/// Styling of a grid table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    /// Font size of every cell, in points.
    pub font_size: u8,
    /// Number of leading rows treated as header rows.
    pub header_rows: usize,
    /// Whether header rows are set in bold.
    pub header_bold: bool,
    /// Fill behind header rows.
    pub header_background: Option<Rgb>,
    /// Text colour of header rows.
    pub header_color: Option<Rgb>,
    /// Fills cycled over the body rows; empty for no fill.
    pub row_backgrounds: Vec<Rgb>,
    /// Grid line colour.
    pub grid_color: Rgb,
    /// Cell padding in points.
    pub padding: Padding,
    /// Extra rule drawn above the given row: `(row, colour)`.
    pub rule_above: Option<(usize, Rgb)>,
}

impl TableStyle {
    /// Style of the scope-of-work task table.
    pub fn scope_of_work() -> Self {
        Self {
            font_size: 8,
            header_rows: 1,
            header_bold: true,
            header_background: Some(Rgb::DARK),
            header_color: Some(Rgb::WHITE),
            row_backgrounds: vec![Rgb::WHITE, Rgb::LIGHT],
            grid_color: Rgb::MID,
            padding: Padding::new(4.0, 6.0),
            rule_above: None,
        }
    }

    /// Style of the signature block.
    pub fn signatures() -> Self {
        Self {
            font_size: 8,
            header_rows: 1,
            header_bold: true,
            header_background: None,
            header_color: None,
            row_backgrounds: Vec::new(),
            grid_color: Rgb::MID,
            padding: Padding::new(6.0, 6.0),
            rule_above: Some((2, Rgb::DARK)),
        }
    }

    /// Returns the fill for the given row, if any.
    pub fn background_for(&self, row: usize) -> Option<Rgb> {
        if row < self.header_rows {
            return self.header_background;
        }
        if self.row_backgrounds.is_empty() {
            return None;
        }
        let body_row = row - self.header_rows;
        Some(self.row_backgrounds[body_row % self.row_backgrounds.len()])
    }

    /// Builds the `genpdf` character style for the cells of the given row.
    pub fn cell_style(&self, row: usize) -> Style {
        let mut style = Style::new().with_font_size(self.font_size);
        if row < self.header_rows {
            if self.header_bold {
                style.set_bold();
            }
            if let Some(color) = self.header_color {
                style.set_color(color.into());
            }
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_rows_alternate_after_header() {
        let style = TableStyle::scope_of_work();
        assert_eq!(style.background_for(0), Some(Rgb::DARK));
        assert_eq!(style.background_for(1), Some(Rgb::WHITE));
        assert_eq!(style.background_for(2), Some(Rgb::LIGHT));
        assert_eq!(style.background_for(3), Some(Rgb::WHITE));
    }

    #[test]
    fn signature_rows_are_unfilled() {
        let style = TableStyle::signatures();
        assert_eq!(style.background_for(0), None);
        assert_eq!(style.background_for(2), None);
    }

    #[test]
    fn header_cells_are_bold_and_colored() {
        let style = TableStyle::scope_of_work();
        let header = style.cell_style(0);
        assert!(header.is_bold());
        assert_eq!(header.color(), Some(Color::Rgb(0xff, 0xff, 0xff)));
        let body = style.cell_style(1);
        assert!(!body.is_bold());
        assert_eq!(body.color(), None);
    }

    #[test]
    fn section_style_has_dark_band() {
        let sheet = StyleSheet::contract();
        assert_eq!(sheet.section.background, Some(Rgb::DARK));
        assert_eq!(sheet.section.weight, FontWeight::Bold);
        assert!(sheet.section.to_style().is_bold());
        assert_eq!(sheet.title.alignment, HorizontalAlignment::Center);
    }
}
