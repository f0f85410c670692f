use druid::im::vector;
use druid::im::Vector;
use druid::Data;
use druid::Lens;

use crate::regression::DataPoint;

/// Application state. The point sequence is the single source of truth;
/// the fit, plot bounds, and displayed line are all derived from it.
#[derive(Clone, Debug, Data, Lens)]
pub struct PlotData {
    pub points: Vector<DataPoint>,

    pub x_input: String,
    pub y_input: String,
    pub show_residuals: bool,
    /// Animation speed knob, 1..=100.
    pub speed: f64,

    /// While pinned, the sliders below drive the displayed line directly
    /// and animation is suppressed. Adding a point unpins.
    pub manual_pinned: bool,
    pub manual_slope: f64,
    pub manual_intercept: f64,
}

impl Default for PlotData {
    fn default() -> Self {
        PlotData {
            // fixed demo set shown on mount
            points: vector![
                DataPoint { x: 1.0, y: 3.0 },
                DataPoint { x: 2.0, y: 5.0 },
                DataPoint { x: 3.0, y: 4.0 },
                DataPoint { x: 4.0, y: 7.0 },
                DataPoint { x: 5.0, y: 8.0 },
            ],
            x_input: String::new(),
            y_input: String::new(),
            show_residuals: true,
            speed: 40.0,
            manual_pinned: false,
            manual_slope: 1.0,
            manual_intercept: 0.0,
        }
    }
}
