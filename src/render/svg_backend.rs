use std::fmt::Display;
use std::fs;
use std::path::Path;

use plotters::backend::{DrawingBackend, SVGBackend};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{IntoFont, RGBAColor, ShapeStyle, TextStyle};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renders frames into an in-memory SVG document.
///
/// Each `render` call replaces the previous document, so the renderer always
/// holds the latest state of the surface it backs.
#[derive(Debug)]
pub struct SvgRenderer {
    document: String,
    background: Color,
    font_family: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: String::new(),
            background: Color::rgb(1.0, 1.0, 1.0),
            font_family: "sans-serif".to_owned(),
            last_stats: SvgRenderStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "plotters-svg"
    }

    /// Latest rendered document, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        fs::write(path, &self.document).map_err(|err| {
            ChartError::Backend(format!("failed to write `{}`: {err}", path.display()))
        })
    }

    fn draw(&self, frame: &RenderFrame, buffer: &mut String) -> ChartResult<SvgRenderStats> {
        let mut backend =
            SVGBackend::with_string(buffer, (frame.viewport.width, frame.viewport.height));
        let mut stats = SvgRenderStats::default();

        backend
            .draw_rect(
                (0, 0),
                (
                    to_coord(f64::from(frame.viewport.width)),
                    to_coord(f64::from(frame.viewport.height)),
                ),
                &fill_style(self.background),
                true,
            )
            .map_err(|err| map_backend_error("failed to paint background", err))?;

        for line in &frame.lines {
            backend
                .draw_line(
                    point(line.x1, line.y1),
                    point(line.x2, line.y2),
                    &stroke_style(line.color, line.stroke_width),
                )
                .map_err(|err| map_backend_error("failed to draw line", err))?;
            stats.lines_drawn += 1;
        }

        for rect in &frame.rects {
            let upper_left = point(rect.x, rect.y);
            let bottom_right = point(rect.x + rect.width, rect.y + rect.height);
            backend
                .draw_rect(upper_left, bottom_right, &fill_style(rect.fill_color), true)
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            if rect.border_width > 0.0 {
                backend
                    .draw_rect(
                        upper_left,
                        bottom_right,
                        &stroke_style(rect.border_color, rect.border_width),
                        false,
                    )
                    .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            let radius = circle.radius.round().max(1.0) as u32;
            backend
                .draw_circle(
                    point(circle.cx, circle.cy),
                    radius,
                    &fill_style(circle.fill_color),
                    true,
                )
                .map_err(|err| map_backend_error("failed to draw circle", err))?;
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let h_pos = match text.h_align {
                TextHAlign::Left => HPos::Left,
                TextHAlign::Center => HPos::Center,
                TextHAlign::Right => HPos::Right,
            };
            let text_color = rgba(text.color);
            let style = TextStyle::from((self.font_family.as_str(), text.font_size_px).into_font())
                .color(&text_color)
                .pos(Pos::new(h_pos, VPos::Bottom));
            backend
                .draw_text(&text.text, &style, point(text.x, text.y))
                .map_err(|err| map_backend_error("failed to draw text", err))?;
            stats.texts_drawn += 1;
        }

        backend
            .present()
            .map_err(|err| map_backend_error("failed to finish document", err))?;
        Ok(stats)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.background.validate()?;

        let mut buffer = String::new();
        let stats = self.draw(frame, &mut buffer)?;
        self.document = buffer;
        self.last_stats = stats;
        Ok(())
    }
}

fn rgba(color: Color) -> RGBAColor {
    let (red, green, blue) = color.to_rgb8();
    RGBAColor(red, green, blue, color.alpha)
}

fn fill_style(color: Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: true,
        stroke_width: 0,
    }
}

fn stroke_style(color: Color, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: false,
        stroke_width: width.round().max(1.0) as u32,
    }
}

fn to_coord(value: f64) -> i32 {
    value.round() as i32
}

fn point(x: f64, y: f64) -> (i32, i32) {
    (to_coord(x), to_coord(y))
}

fn map_backend_error(prefix: &str, err: impl Display) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
