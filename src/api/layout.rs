use crate::api::ScatterChartConfig;
use crate::core::{Dataset, Viewport};

pub const LEGEND_ROW_HEIGHT_PX: f64 = 20.0;
pub const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_PADDING_PX: f64 = 10.0;
const LEGEND_TEXT_GAP_PX: f64 = 5.0;
const LEGEND_ITEM_GAP_PX: f64 = 15.0;
const CHAR_WIDTH_EM: f64 = 0.6;

/// Pixel rectangle the data is plotted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// One legend entry. `x` is the swatch's left edge, `y` the row's center line.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub series_index: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl LegendItem {
    #[must_use]
    pub fn text_x(&self) -> f64 {
        self.x + LEGEND_SWATCH_PX + LEGEND_TEXT_GAP_PX
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub plot: PlotArea,
    pub legend: Vec<LegendItem>,
    pub legend_rows: usize,
}

/// Places the legend and derives the plot area for `viewport`.
///
/// Legend rows wrap inside the horizontal plot span and are right-aligned;
/// the top margin becomes at least as tall as the wrapped legend.
#[must_use]
pub fn compute_layout(
    config: &ScatterChartConfig,
    dataset: &Dataset,
    viewport: Viewport,
) -> ChartLayout {
    let margins = config.margins;
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let available = (width - margins.left - margins.right).max(0.0);

    let (legend, legend_rows) = if config.show_legend {
        layout_legend(config, dataset, margins.left, available)
    } else {
        (Vec::new(), 0)
    };

    let top = if legend_rows > 0 {
        margins
            .top
            .max(LEGEND_PADDING_PX + legend_rows as f64 * LEGEND_ROW_HEIGHT_PX)
    } else {
        margins.top
    };

    let plot = PlotArea {
        left: margins.left,
        top,
        width: available.max(1.0),
        height: (height - top - margins.bottom).max(1.0),
    };

    ChartLayout {
        plot,
        legend,
        legend_rows,
    }
}

/// Rough rendered width of `text`; exact metrics belong to the backend.
#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * CHAR_WIDTH_EM
}

fn layout_legend(
    config: &ScatterChartConfig,
    dataset: &Dataset,
    left: f64,
    available: f64,
) -> (Vec<LegendItem>, usize) {
    let mut rows: Vec<Vec<(usize, String, f64)>> = Vec::new();
    let mut row_width = 0.0;

    for (series_index, series) in dataset.series().iter().enumerate() {
        let item_width = LEGEND_SWATCH_PX
            + LEGEND_TEXT_GAP_PX
            + estimate_text_width(&series.key, config.font_size_px)
            + LEGEND_ITEM_GAP_PX;
        let start_new_row = match rows.last() {
            None => true,
            Some(row) => !row.is_empty() && row_width + item_width > available,
        };
        if start_new_row {
            rows.push(Vec::new());
            row_width = 0.0;
        }
        if let Some(row) = rows.last_mut() {
            row.push((series_index, series.key.clone(), item_width));
        }
        row_width += item_width;
    }

    let row_count = rows.len();
    let mut items = Vec::with_capacity(dataset.series().len());
    for (row_index, row) in rows.into_iter().enumerate() {
        let total: f64 = row.iter().map(|(_, _, width)| width).sum();
        let mut x = left + (available - total).max(0.0);
        let y = LEGEND_PADDING_PX / 2.0
            + row_index as f64 * LEGEND_ROW_HEIGHT_PX
            + LEGEND_ROW_HEIGHT_PX / 2.0;
        for (series_index, label, width) in row {
            items.push(LegendItem {
                series_index,
                label,
                x,
                y,
                width,
            });
            x += width;
        }
    }
    (items, row_count)
}
