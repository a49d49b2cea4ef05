use crate::api::layout::{LEGEND_SWATCH_PX, PlotArea, compute_layout};
use crate::api::{ScatterChart, ScatterChartConfig};
use crate::core::{
    Dataset, DistributionAxis, LinearScale, Palette, Viewport, distribution_ticks, nice_ticks,
    project_points, tick_count_for_span,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const TEXT_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const AXIS_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.75);
const GRID_COLOR: Color = Color::rgb(0.898, 0.898, 0.898);
const TICK_MARK_PX: f64 = 4.0;
const LABEL_GAP_PX: f64 = 3.0;
const STROKE_PX: f64 = 1.0;

/// Builds the complete frame for `dataset` drawn at `viewport`.
///
/// Pure: the same chart, dataset and viewport always produce the same frame.
pub fn build_scatter_frame(
    chart: &ScatterChart,
    dataset: &Dataset,
    viewport: Viewport,
) -> ChartResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let config = chart.config();
    config.validate()?;

    let x_value = chart.x_value();
    let y_value = chart.y_value();
    let finite: Vec<(f64, f64)> = dataset
        .points()
        .map(|point| (x_value(point), y_value(point)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if finite.is_empty() {
        return Ok(no_data_frame(config, viewport));
    }

    let layout = compute_layout(config, dataset, viewport);
    let plot = layout.plot;
    let x_scale = domain_scale(finite.iter().map(|(x, _)| *x), &config.force_x)?
        .with_range(plot.left, plot.right())?;
    let y_scale = domain_scale(finite.iter().map(|(_, y)| *y), &config.force_y)?
        .with_range(plot.bottom(), plot.top)?;

    let mut frame = RenderFrame::new(viewport);
    push_x_axis(&mut frame, config, x_scale, plot);
    push_y_axis(&mut frame, config, y_scale, plot);

    let points = project_points(dataset, x_value, y_value, x_scale, y_scale);

    if config.show_dist_x {
        for tick in distribution_ticks(&points, DistributionAxis::X) {
            frame.lines.push(LinePrimitive::new(
                tick.position,
                plot.bottom(),
                tick.position,
                plot.bottom() - config.dist_size_px,
                STROKE_PX,
                series_color(dataset, &config.palette, tick.series_index),
            ));
        }
    }
    if config.show_dist_y {
        for tick in distribution_ticks(&points, DistributionAxis::Y) {
            frame.lines.push(LinePrimitive::new(
                plot.left,
                tick.position,
                plot.left + config.dist_size_px,
                tick.position,
                STROKE_PX,
                series_color(dataset, &config.palette, tick.series_index),
            ));
        }
    }

    frame.circles.extend(points.iter().map(|point| {
        CirclePrimitive::new(
            point.x,
            point.y,
            config.point_radius,
            series_color(dataset, &config.palette, point.series_index),
        )
    }));

    for item in &layout.legend {
        let color = series_color(dataset, &config.palette, item.series_index);
        frame.rects.push(
            RectPrimitive::new(
                item.x,
                item.y - LEGEND_SWATCH_PX / 2.0,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                color,
            )
            .with_border(STROKE_PX, color),
        );
        if !item.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                item.label.clone(),
                item.text_x(),
                baseline_for_center(item.y, config.font_size_px),
                config.font_size_px,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }
    }

    Ok(frame)
}

/// Series color: the series' own color when set, else the palette slot.
#[must_use]
pub fn series_color(dataset: &Dataset, palette: &Palette, series_index: usize) -> Color {
    dataset
        .series()
        .get(series_index)
        .and_then(|series| series.color)
        .unwrap_or_else(|| palette.color_at(series_index))
}

fn no_data_frame(config: &ScatterChartConfig, viewport: Viewport) -> RenderFrame {
    RenderFrame::new(viewport).with_text(TextPrimitive::new(
        config.no_data_text.clone(),
        f64::from(viewport.width) / 2.0,
        f64::from(viewport.height) / 2.0,
        config.font_size_px,
        TEXT_COLOR,
        TextHAlign::Center,
    ))
}

fn domain_scale(values: impl Iterator<Item = f64>, forced: &[f64]) -> ChartResult<LinearScale> {
    LinearScale::from_values(values.chain(forced.iter().copied()))
        .unwrap_or_else(|| LinearScale::new(-1.0, 1.0))
}

fn baseline_for_center(center_y: f64, font_size_px: f64) -> f64 {
    center_y + font_size_px * 0.35
}

fn push_x_axis(
    frame: &mut RenderFrame,
    config: &ScatterChartConfig,
    scale: LinearScale,
    plot: PlotArea,
) {
    let (start, end) = scale.domain();
    let count = tick_count_for_span(plot.width, config.x_tick_spacing_px);
    let label_y = plot.bottom() + TICK_MARK_PX + LABEL_GAP_PX + config.font_size_px;

    for tick in nice_ticks(start, end, count) {
        let Some(x) = scale.project(tick) else {
            continue;
        };
        frame.lines.push(LinePrimitive::new(
            x,
            plot.top,
            x,
            plot.bottom(),
            STROKE_PX,
            GRID_COLOR,
        ));
        frame.lines.push(LinePrimitive::new(
            x,
            plot.bottom(),
            x,
            plot.bottom() + TICK_MARK_PX,
            STROKE_PX,
            AXIS_COLOR,
        ));
        frame.texts.push(TextPrimitive::new(
            config.x_tick_format.format(tick),
            x,
            label_y,
            config.font_size_px,
            TEXT_COLOR,
            TextHAlign::Center,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.bottom(),
        plot.right(),
        plot.bottom(),
        STROKE_PX,
        AXIS_COLOR,
    ));

    if let Some(label) = config.x_axis_label.as_deref().filter(|label| !label.is_empty()) {
        frame.texts.push(TextPrimitive::new(
            label,
            plot.left + plot.width / 2.0,
            label_y + config.font_size_px + 2.0 * LABEL_GAP_PX,
            config.font_size_px,
            TEXT_COLOR,
            TextHAlign::Center,
        ));
    }
}

fn push_y_axis(
    frame: &mut RenderFrame,
    config: &ScatterChartConfig,
    scale: LinearScale,
    plot: PlotArea,
) {
    let (start, end) = scale.domain();
    let count = tick_count_for_span(plot.height, config.y_tick_spacing_px);
    let label_x = plot.left - TICK_MARK_PX - LABEL_GAP_PX;

    for tick in nice_ticks(start, end, count) {
        let Some(y) = scale.project(tick) else {
            continue;
        };
        frame.lines.push(LinePrimitive::new(
            plot.left,
            y,
            plot.right(),
            y,
            STROKE_PX,
            GRID_COLOR,
        ));
        frame.lines.push(LinePrimitive::new(
            plot.left - TICK_MARK_PX,
            y,
            plot.left,
            y,
            STROKE_PX,
            AXIS_COLOR,
        ));
        frame.texts.push(TextPrimitive::new(
            config.y_tick_format.format(tick),
            label_x,
            baseline_for_center(y, config.font_size_px),
            config.font_size_px,
            TEXT_COLOR,
            TextHAlign::Right,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.bottom(),
        STROKE_PX,
        AXIS_COLOR,
    ));

    if let Some(label) = config.y_axis_label.as_deref().filter(|label| !label.is_empty()) {
        frame.texts.push(TextPrimitive::new(
            label,
            plot.left,
            (plot.top - LABEL_GAP_PX).max(config.font_size_px),
            config.font_size_px,
            TEXT_COLOR,
            TextHAlign::Left,
        ));
    }
}
