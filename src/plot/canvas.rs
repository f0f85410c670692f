use druid::im::Vector;
use druid::BoxConstraints;
use druid::Data;
use druid::Env;
use druid::Event;
use druid::EventCtx;
use druid::LayoutCtx;
use druid::LifeCycle;
use druid::LifeCycleCtx;
use druid::PaintCtx;
use druid::Point;
use druid::Size;
use druid::UpdateCtx;
use druid::Widget;

use crate::regression;
use crate::regression::DataPoint;
use crate::regression::FitLine;

use super::animation::Animation;
use super::animation::AnimationKind;
use super::animation::TraceSession;
use super::commands::ANIMATE;
use super::data::PlotData;
use super::mapper::PlotBounds;
use super::mapper::PlotMapper;
use super::misc::round4;
use super::palette::Palette;
use super::render;
use super::render::Frame;

/// Pointer distance within which a point counts as hovered, in pixels.
const HOVER_RADIUS: f64 = 12.0;

pub struct PlotCanvas {
    palette: Palette,
    /// The line actually painted; distinct from the target fit while an
    /// animation or a manual pin is live.
    displayed: FitLine,
    animation: Animation,
    hovered: Option<usize>,
}

impl PlotCanvas {
    pub fn new(palette: Palette) -> Self {
        PlotCanvas {
            palette,
            displayed: FitLine::ZERO,
            animation: Animation::Idle,
            hovered: None,
        }
    }

    fn mapper(&self, data: &PlotData, size: Size) -> PlotMapper {
        // While a trace runs, the synthetic points must stay in view too.
        let bounds = match self.animation.trace_session() {
            Some(trace) => PlotBounds::from_points(data.points.iter().chain(trace.visited())),
            None => PlotBounds::from_points(&data.points),
        };
        PlotMapper::new(bounds, size)
    }

    fn hit_test(mapper: &PlotMapper, points: &Vector<DataPoint>, pos: Point) -> Option<usize> {
        if !mapper.interior_contains(pos) {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            let distance = mapper.to_pixel(p.x, p.y).distance(pos);
            if distance > HOVER_RADIUS {
                continue;
            }
            // strictly-less keeps the earliest point on a tie
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best.map(|(i, _)| i)
    }

    fn target(data: &PlotData) -> FitLine {
        regression::fit(&data.points).line
    }

    fn start_animation(&mut self, kind: AnimationKind, data: &PlotData) {
        self.hovered = None;
        self.animation = match kind {
            AnimationKind::Ease => {
                Animation::ease(self.displayed, Self::target(data), data.speed)
            }
            AnimationKind::Spiral => {
                Animation::spiral(self.displayed, Self::target(data), data.speed)
            }
            AnimationKind::Trace => Animation::trace(TraceSession::generate(data.speed)),
        };
    }
}

impl Widget<PlotData> for PlotCanvas {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut PlotData, _env: &Env) {
        match event {
            Event::MouseMove(e) => {
                // hover is frozen while an animation is in flight
                if self.animation.is_active() {
                    return;
                }
                let mapper = self.mapper(data, ctx.size());
                let hovered = if mapper.is_degenerate() {
                    None
                } else {
                    Self::hit_test(&mapper, &data.points, e.pos)
                };
                if self.hovered != hovered {
                    self.hovered = hovered;
                    ctx.request_paint();
                }
            }
            Event::MouseDown(e) => {
                ctx.request_focus();
                let mapper = self.mapper(data, ctx.size());
                if !mapper.is_degenerate() && mapper.interior_contains(e.pos) {
                    let (x, y) = mapper.to_data(e.pos);
                    data.points.push_back(DataPoint {
                        x: round4(x),
                        y: round4(y),
                    });
                    data.manual_pinned = false;
                    // the fit recompute and animation start happen in
                    // update(), once the new point sequence has settled
                }
            }
            Event::Command(command) => {
                if let Some(&kind) = command.get(ANIMATE) {
                    if !data.manual_pinned {
                        self.start_animation(kind, data);
                        ctx.request_anim_frame();
                        ctx.request_paint();
                    }
                }
            }
            Event::AnimFrame(interval) => {
                if self.animation.is_active() {
                    let dt_ms = *interval as f64 / 1_000_000.0;
                    self.displayed = self.animation.advance(dt_ms, self.displayed);
                    if self.animation.is_active() {
                        ctx.request_anim_frame();
                    }
                    ctx.request_paint();
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        data: &PlotData,
        _env: &Env,
    ) {
        match event {
            LifeCycle::WidgetAdded => {
                self.displayed = Self::target(data);
            }
            LifeCycle::HotChanged(false) => {
                self.hovered = None;
                ctx.request_paint();
            }
            _ => {}
        }
    }

    #[allow(clippy::float_cmp)]
    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &PlotData, data: &PlotData, _env: &Env) {
        if !old_data.points.same(&data.points) {
            self.hovered = None;
            if data.points.is_empty() {
                // the Clear action: drop any session and rest at zero
                self.animation.cancel();
                self.displayed = FitLine::ZERO;
            } else {
                // a point was added; supersede whatever session was live
                self.animation = Animation::ease(self.displayed, Self::target(data), data.speed);
                ctx.request_anim_frame();
            }
            ctx.request_paint();
            return;
        }
        let manual_moved = data.manual_pinned
            && (old_data.manual_slope != data.manual_slope
                || old_data.manual_intercept != data.manual_intercept);
        if (data.manual_pinned && !old_data.manual_pinned) || manual_moved {
            self.animation.cancel();
            self.displayed = FitLine {
                slope: data.manual_slope,
                intercept: data.manual_intercept,
            };
            ctx.request_paint();
        } else if old_data.manual_pinned && !data.manual_pinned {
            self.displayed = Self::target(data);
            ctx.request_paint();
        } else if !old_data.same(data) {
            ctx.request_paint();
        }
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &PlotData,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &PlotData, _env: &Env) {
        let mapper = self.mapper(data, ctx.size());
        let frame = Frame {
            points: &data.points,
            displayed: self.displayed,
            hovered: if self.animation.is_active() {
                None
            } else {
                self.hovered
            },
            show_residuals: data.show_residuals,
            trace: self.animation.trace_session(),
        };
        render::draw(ctx, &mapper, &self.palette, &frame);
    }
}
