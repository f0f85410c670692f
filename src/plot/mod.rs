mod animation;
mod canvas;
mod commands;
mod data;
mod formatting;
mod mapper;
mod misc;
mod palette;
mod render;

use druid::widget::Button;
use druid::widget::Checkbox;
use druid::widget::Flex;
use druid::widget::Label;
use druid::widget::List;
use druid::widget::MainAxisAlignment;
use druid::widget::Scroll;
use druid::widget::Slider;
use druid::widget::Split;
use druid::widget::TextBox;
use druid::Widget;
use druid::WidgetExt;
use druid::WidgetId;

use crate::config::Theme;
use crate::regression;
use crate::regression::DataPoint;

use self::animation::AnimationKind;
use self::canvas::PlotCanvas;
use self::commands::ANIMATE;
use self::misc::add_point;
use self::misc::parse_point;
use self::palette::Palette;

pub use self::data::PlotData;

pub fn build_plot_widget(theme: Theme) -> impl Widget<PlotData> {
    let canvas_id = WidgetId::next();

    let control_bar = Flex::row()
        .with_child(Label::new("x:"))
        .with_child(
            TextBox::new()
                .with_placeholder("x")
                .fix_width(70.0)
                .lens(PlotData::x_input),
        )
        .with_spacer(5.0)
        .with_child(Label::new("y:"))
        .with_child(
            TextBox::new()
                .with_placeholder("y")
                .fix_width(70.0)
                .lens(PlotData::y_input),
        )
        .with_spacer(5.0)
        .with_child(Button::new("Add").on_click(|_, data: &mut PlotData, _| {
            // silently ignore unparseable input
            if let Some(point) = parse_point(&data.x_input, &data.y_input) {
                add_point(data, point);
                data.x_input.clear();
                data.y_input.clear();
            }
        }))
        .with_spacer(20.0)
        .with_child(Button::new("Clear").on_click(|_, data: &mut PlotData, _| {
            data.points.clear();
            data.manual_pinned = false;
        }))
        .with_spacer(20.0)
        .with_child(Button::new("Animate").on_click(move |ctx, _, _| {
            ctx.submit_command(ANIMATE.with(AnimationKind::Ease).to(canvas_id));
        }))
        .with_child(Button::new("Spiral").on_click(move |ctx, _, _| {
            ctx.submit_command(ANIMATE.with(AnimationKind::Spiral).to(canvas_id));
        }))
        .with_child(Button::new("Trace demo").on_click(move |ctx, _, _| {
            ctx.submit_command(ANIMATE.with(AnimationKind::Trace).to(canvas_id));
        }))
        .with_spacer(20.0)
        .with_child(Checkbox::new("Residuals").lens(PlotData::show_residuals))
        .with_spacer(20.0)
        .with_child(Label::new("Speed:"))
        .with_child(
            Slider::new()
                .with_range(1.0, 100.0)
                .lens(PlotData::speed),
        )
        .main_axis_alignment(MainAxisAlignment::Start)
        .must_fill_main_axis(true)
        .padding(5.0);

    let canvas = PlotCanvas::new(Palette::for_theme(theme)).with_id(canvas_id);

    let plot_column = Flex::column()
        .with_child(control_bar)
        .with_flex_child(canvas.expand(), 1.0);

    Split::columns(plot_column, build_side_panel())
        .split_point(0.78)
        .draggable(true)
}

fn build_side_panel() -> impl Widget<PlotData> {
    let readout = Label::dynamic(|data: &PlotData, _| {
        let fit = regression::fit(&data.points);
        format!(
            "{}\n{}",
            formatting::equation_label(&fit.line),
            formatting::error_label(fit.sum_squared_error),
        )
    });

    let manual_controls = Flex::column()
        .with_child(Checkbox::new("Pin line manually").lens(PlotData::manual_pinned))
        .with_spacer(5.0)
        .with_child(
            Flex::row()
                .with_child(
                    Label::dynamic(|data: &PlotData, _| format!("slope {:+.2}", data.manual_slope))
                        .fix_width(110.0),
                )
                .with_flex_child(
                    Slider::new()
                        .with_range(-10.0, 10.0)
                        .lens(PlotData::manual_slope)
                        .expand_width(),
                    1.0,
                ),
        )
        .with_child(
            Flex::row()
                .with_child(
                    Label::dynamic(|data: &PlotData, _| {
                        format!("intercept {:+.2}", data.manual_intercept)
                    })
                    .fix_width(110.0),
                )
                .with_flex_child(
                    Slider::new()
                        .with_range(-20.0, 20.0)
                        .lens(PlotData::manual_intercept)
                        .expand_width(),
                    1.0,
                ),
        );

    Flex::column()
        .with_child(readout)
        .with_spacer(10.0)
        .with_child(manual_controls)
        .with_spacer(10.0)
        .with_child(Label::new("Points"))
        .with_flex_child(
            Scroll::new(List::new(point_row).lens(PlotData::points))
                .vertical()
                .expand_height(),
            1.0,
        )
        .padding(8.0)
}

fn point_row() -> impl Widget<DataPoint> {
    Label::dynamic(|point: &DataPoint, _| formatting::point_label(point))
}
