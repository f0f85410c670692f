use druid::im::Vector;
use druid::kurbo::Circle;
use druid::kurbo::Line;
use druid::piet::StrokeStyle;
use druid::piet::Text;
use druid::piet::TextLayout;
use druid::piet::TextLayoutBuilder;
use druid::Color;
use druid::PaintCtx;
use druid::Point;
use druid::Rect;
use druid::RenderContext;
use itertools::Itertools;

use crate::regression::sse_for_line;
use crate::regression::DataPoint;
use crate::regression::FitLine;

use super::animation::TraceSession;
use super::formatting;
use super::mapper::PlotMapper;
use super::palette::Palette;

const POINT_RADIUS: f64 = 4.0;
const HOVERED_POINT_RADIUS: f64 = 5.5;
const TOOLTIP_PADDING: f64 = 6.0;
const TOOLTIP_OFFSET: f64 = 14.0;

/// Everything one paint pass needs, assembled by the canvas widget.
pub struct Frame<'a> {
    pub points: &'a Vector<DataPoint>,
    pub displayed: FitLine,
    /// Already suppressed by the caller while an animation runs.
    pub hovered: Option<usize>,
    pub show_residuals: bool,
    pub trace: Option<&'a TraceSession>,
}

/// Full back-to-front paint pass. Idempotent; called on every tick.
pub fn draw(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette, frame: &Frame) {
    let background_rect = ctx.size().to_rect();
    ctx.fill(background_rect, &palette.background);
    if mapper.is_degenerate() {
        return;
    }
    draw_grid(ctx, mapper, palette);
    draw_axes(ctx, mapper, palette);
    let interior = mapper.interior();
    ctx.with_save(|ctx| {
        ctx.clip(interior);
        if frame.show_residuals && frame.trace.is_none() {
            draw_residuals(ctx, mapper, palette, frame.points, &frame.displayed);
        }
        if let Some(trace) = frame.trace {
            draw_trace(ctx, mapper, palette, trace);
        }
        draw_fit_line(ctx, mapper, palette, &frame.displayed);
        draw_points(ctx, mapper, palette, frame.points, frame.hovered);
    });
    draw_legend(ctx, mapper, palette, frame);
    if frame.trace.is_none() {
        if let Some(index) = frame.hovered {
            draw_tooltip(ctx, mapper, palette, frame, index);
        }
    }
}

/// Grid increment per the nice-number rule `10^floor(log10(range)) / 2`.
pub fn tick_step(range: f64) -> f64 {
    10f64.powf(range.log10().floor()) / 2.0
}

fn ticks(lo: f64, hi: f64) -> Vec<f64> {
    let step = tick_step(hi - lo);
    let mut values = Vec::new();
    let mut v = (lo / step).ceil() * step;
    while v <= hi + step * 1e-9 {
        values.push(v);
        v += step;
    }
    values
}

fn draw_grid(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette) {
    let bounds = mapper.bounds();
    let interior = mapper.interior();
    for x in ticks(bounds.x0, bounds.x1) {
        let px = mapper.to_pixel(x, bounds.y0).x;
        let line = Line::new((px, interior.y0), (px, interior.y1));
        ctx.stroke(line, &palette.grid, 1.0);
        draw_label(
            ctx,
            &palette.tick_label,
            formatting::tick_label(x),
            (px + 2.0, interior.y1 + 4.0),
        );
    }
    for y in ticks(bounds.y0, bounds.y1) {
        let py = mapper.to_pixel(bounds.x0, y).y;
        let line = Line::new((interior.x0, py), (interior.x1, py));
        ctx.stroke(line, &palette.grid, 1.0);
        draw_label(
            ctx,
            &palette.tick_label,
            formatting::tick_label(y),
            (4.0, py - 7.0),
        );
    }
}

fn draw_axes(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette) {
    let interior = mapper.interior();
    let left = Line::new((interior.x0, interior.y0), (interior.x0, interior.y1));
    let bottom = Line::new((interior.x0, interior.y1), (interior.x1, interior.y1));
    ctx.stroke(left, &palette.axis, 1.5);
    ctx.stroke(bottom, &palette.axis, 1.5);
}

fn draw_residuals(
    ctx: &mut PaintCtx,
    mapper: &PlotMapper,
    palette: &Palette,
    points: &Vector<DataPoint>,
    line: &FitLine,
) {
    let dash = StrokeStyle::new().dash_pattern(&[4.0, 4.0]);
    for p in points.iter() {
        let from = mapper.to_pixel(p.x, p.y);
        let to = mapper.to_pixel(p.x, line.y_at(p.x));
        ctx.stroke_styled(Line::new(from, to), &palette.residual, 1.0, &dash);
    }
}

fn draw_fit_line(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette, line: &FitLine) {
    // Edge to edge: evaluate the line at the horizontal bounds extremes.
    let bounds = mapper.bounds();
    let from = mapper.to_pixel(bounds.x0, line.y_at(bounds.x0));
    let to = mapper.to_pixel(bounds.x1, line.y_at(bounds.x1));
    ctx.stroke(Line::new(from, to), &palette.line, 2.0);
}

fn draw_points(
    ctx: &mut PaintCtx,
    mapper: &PlotMapper,
    palette: &Palette,
    points: &Vector<DataPoint>,
    hovered: Option<usize>,
) {
    for (i, p) in points.iter().enumerate() {
        let center = mapper.to_pixel(p.x, p.y);
        if hovered == Some(i) {
            ctx.fill(Circle::new(center, HOVERED_POINT_RADIUS), &palette.point_hover);
        } else {
            ctx.fill(Circle::new(center, POINT_RADIUS), &palette.point);
        }
    }
}

fn draw_trace(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette, trace: &TraceSession) {
    let visited = trace.visited();
    for (a, b) in visited.iter().tuple_windows() {
        let line = Line::new(mapper.to_pixel(a.x, a.y), mapper.to_pixel(b.x, b.y));
        ctx.stroke(line, &palette.trace, 1.5);
    }
    for p in visited {
        let center = mapper.to_pixel(p.x, p.y);
        ctx.fill(Circle::new(center, 3.5), &palette.trace);
        draw_label(
            ctx,
            &palette.tick_label,
            format!("({:.1}, {:.1})", p.x, p.y),
            (center.x + 6.0, center.y - 16.0),
        );
    }
}

fn draw_legend(ctx: &mut PaintCtx, mapper: &PlotMapper, palette: &Palette, frame: &Frame) {
    let sse = sse_for_line(frame.points, &frame.displayed);
    let text = format!(
        "{}   {}",
        formatting::equation_label(&frame.displayed),
        formatting::error_label(sse),
    );
    let origin = (mapper.interior().x0 + 8.0, 8.0);
    draw_label(ctx, &palette.legend_text, text, origin);
}

fn draw_tooltip(
    ctx: &mut PaintCtx,
    mapper: &PlotMapper,
    palette: &Palette,
    frame: &Frame,
    index: usize,
) {
    let point = match frame.points.get(index) {
        Some(p) => p,
        None => return,
    };
    let mut lines = vec![
        format!("({:.4}, {:.4})", point.x, point.y),
        format!("predicted y = {:.4}", frame.displayed.y_at(point.x)),
    ];
    for (i, p) in frame.points.iter().enumerate() {
        lines.push(format!("r{} = {:+.4}", i + 1, p.y - frame.displayed.y_at(p.x)));
    }
    let layout = match ctx
        .text()
        .new_text_layout(lines.join("\n"))
        .text_color(palette.tooltip_text.clone())
        .build()
    {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let text_size = layout.size();
    let width = text_size.width + TOOLTIP_PADDING * 2.0;
    let height = text_size.height + TOOLTIP_PADDING * 2.0;
    let view = ctx.size();
    let anchor = mapper.to_pixel(point.x, point.y);

    // Prefer the right of the point; flip left when the box would overflow,
    // and clamp vertically into the viewport.
    let mut x = anchor.x + TOOLTIP_OFFSET;
    if x + width > view.width - 4.0 {
        x = anchor.x - TOOLTIP_OFFSET - width;
    }
    let y = (anchor.y + TOOLTIP_OFFSET)
        .min(view.height - height - 4.0)
        .max(4.0);

    let rect = Rect::new(x, y, x + width, y + height).to_rounded_rect(4.0);
    ctx.fill(rect, &palette.tooltip_background);
    ctx.stroke(rect, &palette.tooltip_border, 1.0);
    ctx.draw_text(&layout, Point::new(x + TOOLTIP_PADDING, y + TOOLTIP_PADDING));
}

fn draw_label(ctx: &mut PaintCtx, color: &Color, text: String, origin: impl Into<Point>) {
    let layout = ctx
        .text()
        .new_text_layout(text)
        .text_color(color.clone())
        .build();
    match layout {
        Ok(layout) => ctx.draw_text(&layout, origin),
        Err(e) => eprintln!("{}", e),
    }
}
