use druid::Data;

#[derive(Clone, Copy, PartialEq, Debug, Data)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// Line parameters in data space.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct FitLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FitLine {
    pub const ZERO: FitLine = FitLine {
        slope: 0.0,
        intercept: 0.0,
    };

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Fit {
    pub line: FitLine,
    pub sum_squared_error: f64,
}

/// Below this, the x values are treated as having zero variance.
const DEGENERATE_DENOM: f64 = 1e-12;

/// Closed-form ordinary least squares over the point sequence.
///
/// An empty sequence yields the all-zero fit by convention, and a
/// zero-variance x column yields slope zero instead of NaN.
pub fn fit<'a, I>(points: I) -> Fit
where
    I: IntoIterator<Item = &'a DataPoint> + Clone,
{
    let mut x_sum = 0.0;
    let mut y_sum = 0.0;
    let mut xy_sum = 0.0;
    let mut x2_sum = 0.0;
    let mut n = 0usize;
    for p in points.clone() {
        x_sum += p.x;
        y_sum += p.y;
        xy_sum += p.x * p.y;
        x2_sum += p.x * p.x;
        n += 1;
    }
    if n == 0 {
        return Fit::default();
    }
    let n = n as f64;
    let denom = n * x2_sum - x_sum * x_sum;
    let slope = if denom.abs() < DEGENERATE_DENOM {
        0.0
    } else {
        (n * xy_sum - x_sum * y_sum) / denom
    };
    let line = FitLine {
        slope,
        intercept: (y_sum - slope * x_sum) / n,
    };
    Fit {
        line,
        sum_squared_error: sse_for_line(points, &line),
    }
}

/// Sum of squared residuals of the points against an arbitrary line.
pub fn sse_for_line<'a, I>(points: I, line: &FitLine) -> f64
where
    I: IntoIterator<Item = &'a DataPoint>,
{
    points
        .into_iter()
        .map(|p| {
            let r = p.y - line.y_at(p.x);
            r * r
        })
        .sum()
}
