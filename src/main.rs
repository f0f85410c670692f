use druid::AppLauncher;
use druid::WindowDesc;
use fitline::config::Config;
use fitline::error::PlotAppError;
use fitline::plot::build_plot_widget;
use fitline::plot::PlotData;

fn main() -> Result<(), PlotAppError> {
    let config = Config::load_or_default()?;
    let window = WindowDesc::new(build_plot_widget(config.theme))
        .title("Least squares playground")
        .window_size((1100.0, 720.0));
    AppLauncher::with_window(window).launch(PlotData::default())?;

    Ok(())
}
