//! Layout elements built on top of `genpdf` primitives.
//!
//! `genpdf` strokes every line at the PDF default width of one point and cannot fill shapes, so a
//! background is painted as horizontal strokes stacked closer than their width.  Elements with a
//! background measure their text first, paint the band and only then print the text, which keeps
//! the text above the fill in the content stream.

use genpdf::error::Error;
use genpdf::fonts::FontCache;
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Context, Element, Mm, Position, RenderResult, Size};

use crate::model::{blank_lines, Table};
use crate::style::{pt, TableStyle, TextStyle};

/// Width of every stroke `genpdf` draws, in points.
const STROKE_WIDTH_PT: f64 = 1.0;
/// Distance between the strokes of a filled band, in points.
const FILL_STEP_PT: f64 = 0.75;

fn horizontal_line(area: &render::Area<'_>, y: Mm, from: Mm, to: Mm, style: Style) {
    area.draw_line(vec![Position::new(from, y), Position::new(to, y)], style);
}

/// Paints a band of `height` starting `top` below the upper edge of `area`.
fn fill_band(area: &render::Area<'_>, top: Mm, width: Mm, height: Mm, color: Color) {
    let style = Style::new().with_color(color);
    let half_stroke = pt(STROKE_WIDTH_PT) / 2.0;
    let last = top + height - half_stroke;

    let mut y = top + half_stroke;
    while y < last {
        horizontal_line(area, y, Mm::default(), width, style);
        y += pt(FILL_STEP_PT);
    }
    horizontal_line(area, last, Mm::default(), width, style);
}

/// Draws the outline of a rectangle.
fn frame(area: &render::Area<'_>, left: Mm, top: Mm, size: Size, style: Style) {
    let right = left + size.width;
    let bottom = top + size.height;
    area.draw_line(
        vec![
            Position::new(left, top),
            Position::new(right, top),
            Position::new(right, bottom),
            Position::new(left, bottom),
            Position::new(left, top),
        ],
        style,
    );
}

fn align_offset(alignment: Alignment, line_width: Mm, available: Mm) -> Mm {
    match alignment {
        Alignment::Left => Mm::default(),
        Alignment::Center => (available - line_width) / 2.0,
        Alignment::Right => available - line_width,
    }
}

/// Breaks `text` into lines no wider than `width`.
///
/// Every `\n` starts a new line.  A single word wider than `width` is kept on its own line.
pub(crate) fn wrap_lines(
    text: &str,
    style: Style,
    font_cache: &FontCache,
    width: Mm,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if style.str_width(font_cache, &candidate) > width {
                lines.push(std::mem::replace(&mut line, word.to_owned()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// A text block printed with padding on a filled background band.
pub struct Shaded {
    text: String,
    style: TextStyle,
}

impl Shaded {
    /// Creates a block using the background, padding and alignment of `style`.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl Element for Shaded {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let text_style = style.and(self.style.to_style());
        let vertical = pt(self.style.padding.vertical);
        let horizontal = pt(self.style.padding.horizontal);
        let width = area.size().width;
        let text_width = width - horizontal * 2.0;

        let lines = wrap_lines(&self.text, text_style, &context.font_cache, text_width);
        let line_height = text_style.line_height(&context.font_cache);
        let height = line_height * lines.len() as f64 + vertical * 2.0;

        let mut result = RenderResult::default();
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        if let Some(background) = self.style.background {
            fill_band(&area, Mm::default(), width, height, background.into());
        }

        let alignment = self.style.alignment.into();
        for (index, line) in lines.iter().enumerate() {
            let line_width = text_style.str_width(&context.font_cache, line);
            let position = Position::new(
                horizontal + align_offset(alignment, line_width, text_width),
                vertical + line_height * index as f64,
            );
            area.print_str(&context.font_cache, position, text_style, line)?;
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// A full-width horizontal rule followed by blank space.
pub struct Rule {
    thickness: Mm,
    color: Color,
    space_after: Mm,
}

impl Rule {
    /// Creates a rule of the given thickness and colour.
    pub fn new(thickness: Mm, color: impl Into<Color>) -> Self {
        Self {
            thickness,
            color: color.into(),
            space_after: Mm::default(),
        }
    }

    /// Sets the blank space left below the rule and returns the element.
    pub fn with_space_after(mut self, space_after: Mm) -> Self {
        self.space_after = space_after;
        self
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        fill_band(&area, Mm::default(), width, self.thickness, self.color);

        let height = self.thickness + self.space_after;
        let height = if height > area.size().height {
            area.size().height
        } else {
            height
        };
        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Fixed vertical gap.  At the bottom of a page the gap is cut short rather than carried over.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a gap of the given height in points.
    pub fn points(height: f64) -> Self {
        Self { height: pt(height) }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// A table drawn with row fills, padded cells, a grid and an optional rule above one row.
///
/// Rows are never split.  A row that does not fit the remaining area moves to the next page.
pub struct GridTable {
    column_widths_mm: Vec<f64>,
    rows: Vec<Vec<String>>,
    style: TableStyle,
    render_idx: usize,
}

impl GridTable {
    /// Creates the element for a table of the content model.
    pub fn new(table: &Table) -> Self {
        Self {
            column_widths_mm: table.column_widths_mm().to_vec(),
            rows: table.rows().to_vec(),
            style: table.style().clone(),
            render_idx: 0,
        }
    }

    /// Splits `width` in proportion to the column widths and returns `(left, width)` per column.
    fn columns(&self, width: Mm) -> Vec<(Mm, Mm)> {
        let total: f64 = self.column_widths_mm.iter().sum();
        let mut left = Mm::default();
        let mut columns = Vec::with_capacity(self.column_widths_mm.len());
        for column_mm in &self.column_widths_mm {
            let column_width = width * (column_mm / total);
            columns.push((left, column_width));
            left += column_width;
        }
        columns
    }

    fn cell_lines(
        &self,
        cell: &str,
        style: Style,
        font_cache: &FontCache,
        width: Mm,
    ) -> Vec<String> {
        match blank_lines(cell) {
            Some(count) => vec![String::new(); count],
            None => wrap_lines(cell, style, font_cache, width),
        }
    }

    fn render_row(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
        columns: &[(Mm, Mm)],
    ) -> Result<Option<Mm>, Error> {
        let row = self.render_idx;
        let cell_style = style.and(self.style.cell_style(row));
        let vertical = pt(self.style.padding.vertical);
        let horizontal = pt(self.style.padding.horizontal);
        let line_height = cell_style.line_height(&context.font_cache);

        let cells: Vec<Vec<String>> = columns
            .iter()
            .zip(&self.rows[row])
            .map(|(&(_, width), cell)| {
                self.cell_lines(cell, cell_style, &context.font_cache, width - horizontal * 2.0)
            })
            .collect();
        let line_count = cells.iter().map(Vec::len).max().unwrap_or(0);
        let row_height = line_height * line_count as f64 + vertical * 2.0;
        if row_height > area.size().height {
            return Ok(None);
        }

        let width = area.size().width;
        if let Some(background) = self.style.background_for(row) {
            fill_band(area, Mm::default(), width, row_height, background.into());
        }

        for (&(left, _), lines) in columns.iter().zip(&cells) {
            for (index, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let position =
                    Position::new(left + horizontal, vertical + line_height * index as f64);
                area.print_str(&context.font_cache, position, cell_style, line)?;
            }
        }

        let grid = Style::new().with_color(self.style.grid_color.into());
        for &(left, column_width) in columns {
            frame(area, left, Mm::default(), Size::new(column_width, row_height), grid);
        }

        if let Some((rule_row, color)) = self.style.rule_above {
            if rule_row == row {
                let rule = Style::new().with_color(color.into());
                horizontal_line(area, Mm::default(), Mm::default(), width, rule);
            }
        }

        Ok(Some(row_height))
    }
}

impl Element for GridTable {
    fn render(
        &mut self,
        context: &Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let width = area.size().width;
        let columns = self.columns(width);

        while self.render_idx < self.rows.len() {
            match self.render_row(context, &area, style, &columns)? {
                Some(row_height) => {
                    result.size = Size::new(width, result.size.height + row_height);
                    area.add_offset(Position::new(0, row_height));
                    self.render_idx += 1;
                }
                None => break,
            }
        }

        // The size stays empty when no row fit, so a row taller than a page is reported.
        result.has_more = self.render_idx < self.rows.len();
        Ok(result)
    }
}
