//! Legend layout: a row/column grid of labeled color swatches.

use crate::config::TextMetrics;
use crate::curve::ColorToken;
use crate::layout::{Margin, Rect};

/// One legend entry with its lazily computed grid position.
#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub label: String,
    pub color: ColorToken,
    /// NDC position of the entry's text anchor.
    pub x_pos: f32,
    pub y_pos: f32,
    /// NDC endpoints of the color swatch segment: `[x1, y1, x2, y2]`.
    pub swatch: [f32; 4],
    /// Position cache flag; cleared when an entry is added or the pane is
    /// resized.
    pub pos_set: bool,
}

impl LegendEntry {
    fn new(label: String, color: ColorToken) -> Self {
        Self {
            label,
            color,
            x_pos: 0.0,
            y_pos: 0.0,
            swatch: [0.0; 4],
            pos_set: false,
        }
    }
}

/// The legend strip along the bottom of the pane.
#[derive(Clone, Debug)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    /// Entries per row.
    columns: usize,
    margin: Margin,
    entry_gap_x: f32,
    line_height: f32,
    rect: Rect,
    inner_rect: Rect,
    entry_space_x: f32,
    swatch_len: f32,
}

impl Legend {
    pub fn new(columns: usize) -> Self {
        Self {
            entries: Vec::new(),
            columns: columns.max(1),
            margin: Margin::new(10.0, 10.0, 2.0, 5.0),
            entry_gap_x: 2.0,
            line_height: 0.0,
            rect: Rect::default(),
            inner_rect: Rect::default(),
            entry_space_x: 0.0,
            swatch_len: 0.0,
        }
    }

    pub fn add_entry(&mut self, label: impl Into<String>, color: ColorToken) {
        self.entries.push(LegendEntry::new(label.into(), color));
        // A new entry reflows the whole grid.
        self.invalidate_positions();
    }

    pub fn set_columns(&mut self, columns: usize) {
        let columns = columns.max(1);
        if columns != self.columns {
            self.columns = columns;
            self.invalidate_positions();
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Rows the current entry count occupies.
    pub fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns)
    }

    /// Force the next layout pass to recompute entry positions.
    pub fn invalidate_positions(&mut self) {
        for entry in &mut self.entries {
            entry.pos_set = false;
        }
    }

    /// Reserve the legend strip at the bottom of the client rect and
    /// shrink the client rect accordingly. Runs every layout pass; only
    /// the per-entry positions are cached.
    pub fn reserve(&mut self, pane_rect: Rect, client_rect: &mut Rect, text: &TextMetrics) {
        self.line_height = text.legend_line_height();
        let height = self.line_height * self.rows() as f32;

        self.rect = Rect::new(
            pane_rect.x + self.margin.left,
            pane_rect.y + self.margin.bottom,
            pane_rect.width - self.margin.left - self.margin.right,
            height,
        );

        self.inner_rect.height = self.rect.height * 0.95;
        self.inner_rect.width = self.rect.width * 0.98;
        self.inner_rect.x = self.rect.x + (self.rect.width - self.inner_rect.width) / 2.0;
        self.inner_rect.y = self.rect.y + (self.rect.height - self.inner_rect.height) / 2.0;

        let reserved = height + self.margin.top + self.margin.bottom;
        client_rect.y += reserved;
        client_rect.height -= reserved;

        let columns = self.columns as f32;
        self.entry_space_x =
            (self.inner_rect.width - (columns - 1.0) * self.entry_gap_x) / columns;
        self.swatch_len = 0.18 * self.entry_space_x;
    }

    /// Compute cached entry positions if any are stale. NDC coordinates
    /// are relative to the full pane rect.
    pub fn layout_entries(&mut self, pane_rect: Rect) {
        if self.entries.iter().all(|entry| entry.pos_set) {
            return;
        }
        if pane_rect.width <= 0.0 || pane_rect.height <= 0.0 {
            return;
        }

        let mut column = 0usize;
        let mut row = 0usize;
        for entry in &mut self.entries {
            let device_x =
                self.inner_rect.x + column as f32 * (self.entry_space_x + self.entry_gap_x);
            let device_y = self.inner_rect.y + self.inner_rect.height
                - row as f32 * self.line_height;

            entry.x_pos = -1.0 + 2.0 * (device_x - pane_rect.x) / pane_rect.width;
            entry.y_pos = -1.0 + 2.0 * (device_y - pane_rect.y) / pane_rect.height;

            let swatch_y = entry.y_pos - self.line_height / pane_rect.height;
            entry.swatch = [
                entry.x_pos,
                swatch_y,
                entry.x_pos + 2.0 * self.swatch_len / pane_rect.width,
                swatch_y,
            ];
            entry.pos_set = true;

            column += 1;
            if column >= self.columns {
                column = 0;
                row += 1;
            }
        }
    }
}
