use druid::Point;
use druid::Rect;
use druid::Size;

use crate::regression::DataPoint;

/// Gutter reserved for axis labels on all four sides, in logical pixels.
pub const MARGIN: f64 = 40.0;

const PADDING_RATIO: f64 = 0.15;
/// Minimum data span per axis, so a degenerate point cloud still maps.
const MIN_SPAN: f64 = 5.0;

const DEFAULT_BOUNDS: PlotBounds = PlotBounds {
    x0: 0.0,
    x1: 10.0,
    y0: 0.0,
    y1: 10.0,
};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlotBounds {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl PlotBounds {
    /// Data-space extent of the point cloud, padded by 15% per side and
    /// snapped to integers so tick placement stays stable while points
    /// are added nearby.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a DataPoint>,
    {
        let mut iter = points.into_iter();
        let first = match iter.next() {
            Some(p) => p,
            None => return DEFAULT_BOUNDS,
        };
        let init = (first.x, first.x, first.y, first.y);
        let (min_x, max_x, min_y, max_y) = iter.fold(init, |acc, p| {
            (
                acc.0.min(p.x),
                acc.1.max(p.x),
                acc.2.min(p.y),
                acc.3.max(p.y),
            )
        });
        let (x0, x1) = pad_axis(min_x, max_x);
        let (y0, y1) = pad_axis(min_y, max_y);
        PlotBounds { x0, x1, y0, y1 }
    }

    pub fn x_span(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn y_span(&self) -> f64 {
        self.y1 - self.y0
    }
}

fn pad_axis(min: f64, max: f64) -> (f64, f64) {
    let pad = (max - min) * PADDING_RATIO;
    let mut lo = min - pad;
    let mut hi = max + pad;
    if hi - lo < MIN_SPAN {
        let mid = (lo + hi) / 2.0;
        lo = mid - MIN_SPAN / 2.0;
        hi = mid + MIN_SPAN / 2.0;
    }
    (lo.floor(), hi.ceil())
}

/// Affine map between data space and canvas pixels. Pixel y grows
/// downward, so the y axis is inverted relative to data space.
///
/// Druid paints in logical coordinates and applies the device-pixel-ratio
/// transform itself, so the mapper only ever sees logical pixels.
pub struct PlotMapper {
    bounds: PlotBounds,
    size: Size,
}

impl PlotMapper {
    pub fn new(bounds: PlotBounds, size: Size) -> Self {
        PlotMapper { bounds, size }
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    /// The plot area inside the axis-label gutters.
    pub fn interior(&self) -> Rect {
        Rect::new(
            MARGIN,
            MARGIN,
            self.size.width - MARGIN,
            self.size.height - MARGIN,
        )
    }

    /// True when the viewport is too small to hold any plot interior;
    /// all drawing and hit-testing no-op in that case.
    pub fn is_degenerate(&self) -> bool {
        self.size.width <= MARGIN * 2.0 || self.size.height <= MARGIN * 2.0
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        let interior = self.interior();
        Point::new(
            interior.x0 + (x - self.bounds.x0) / self.bounds.x_span() * interior.width(),
            interior.y1 - (y - self.bounds.y0) / self.bounds.y_span() * interior.height(),
        )
    }

    pub fn to_data(&self, pos: Point) -> (f64, f64) {
        let interior = self.interior();
        (
            self.bounds.x0 + (pos.x - interior.x0) / interior.width() * self.bounds.x_span(),
            self.bounds.y0 + (interior.y1 - pos.y) / interior.height() * self.bounds.y_span(),
        )
    }

    pub fn interior_contains(&self, pos: Point) -> bool {
        self.interior().contains(pos)
    }
}

#[cfg(test)]
mod test {
    use super::PlotBounds;
    use super::PlotMapper;
    use crate::regression::DataPoint;
    use druid::im::vector;
    use druid::im::Vector;
    use druid::Size;

    fn example_points() -> Vector<DataPoint> {
        vector![
            DataPoint { x: 1.0, y: 3.0 },
            DataPoint { x: 2.0, y: 5.0 },
            DataPoint { x: 3.0, y: 4.0 },
            DataPoint { x: 4.0, y: 7.0 },
            DataPoint { x: 5.0, y: 8.0 },
        ]
    }

    #[test]
    fn test_empty_points_use_default_bounds() {
        let points: Vector<DataPoint> = vector![];
        let bounds = PlotBounds::from_points(&points);
        assert_eq!(
            bounds,
            PlotBounds {
                x0: 0.0,
                x1: 10.0,
                y0: 0.0,
                y1: 10.0
            }
        );
    }

    #[test]
    fn test_bounds_pad_and_snap() {
        // x 1..5 padded by 0.6 -> 0.4..5.6 -> 0..6
        // y 3..8 padded by 0.75 -> 2.25..8.75 -> 2..9
        let bounds = PlotBounds::from_points(&example_points());
        assert_eq!(
            bounds,
            PlotBounds {
                x0: 0.0,
                x1: 6.0,
                y0: 2.0,
                y1: 9.0
            }
        );
    }

    #[test]
    fn test_zero_span_axis_is_widened() {
        let points = vector![DataPoint { x: 2.0, y: 3.0 }];
        let bounds = PlotBounds::from_points(&points);
        assert!(bounds.x_span() >= 5.0);
        assert!(bounds.y_span() >= 5.0);
        // centered on the lone point before snapping
        assert_eq!(
            bounds,
            PlotBounds {
                x0: -1.0,
                x1: 5.0,
                y0: 0.0,
                y1: 6.0
            }
        );
    }

    #[test]
    fn test_pixel_roundtrip() {
        let bounds = PlotBounds::from_points(&example_points());
        for &size in &[Size::new(640.0, 480.0), Size::new(1100.0, 333.0)] {
            let mapper = PlotMapper::new(bounds, size);
            for p in example_points().iter() {
                let pixel = mapper.to_pixel(p.x, p.y);
                let (x, y) = mapper.to_data(pixel);
                assert!((x - p.x).abs() < 1e-9, "{} vs {}", x, p.x);
                assert!((y - p.y).abs() < 1e-9, "{} vs {}", y, p.y);
            }
        }
    }

    #[test]
    fn test_pixel_y_is_inverted() {
        let bounds = PlotBounds::from_points(&example_points());
        let mapper = PlotMapper::new(bounds, Size::new(640.0, 480.0));
        let low = mapper.to_pixel(3.0, 3.0);
        let high = mapper.to_pixel(3.0, 8.0);
        assert!(high.y < low.y);
        assert_eq!(high.x, low.x);
    }

    #[test]
    fn test_interior_contains() {
        let bounds = PlotBounds::from_points(&example_points());
        let mapper = PlotMapper::new(bounds, Size::new(640.0, 480.0));
        assert!(mapper.interior_contains(druid::Point::new(320.0, 240.0)));
        assert!(!mapper.interior_contains(druid::Point::new(10.0, 240.0)));
        assert!(!mapper.interior_contains(druid::Point::new(320.0, 475.0)));
    }

    #[test]
    fn test_degenerate_viewport() {
        let bounds = PlotBounds::from_points(&example_points());
        assert!(PlotMapper::new(bounds, Size::new(60.0, 480.0)).is_degenerate());
        assert!(!PlotMapper::new(bounds, Size::new(640.0, 480.0)).is_degenerate());
    }
}
