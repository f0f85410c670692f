use crate::regression::DataPoint;

use super::data::PlotData;

/// Parse the two add-point fields. Anything non-numeric or non-finite
/// rejects the whole pair; the caller treats that as a no-op.
pub fn parse_point(x: &str, y: &str) -> Option<DataPoint> {
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then(|| DataPoint { x, y })
}

pub fn add_point(data: &mut PlotData, point: DataPoint) {
    data.points.push_back(point);
    // a fresh point always unpins a manual override
    data.manual_pinned = false;
}

pub fn round4(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

#[cfg(test)]
mod test {
    use super::add_point;
    use super::parse_point;
    use super::round4;
    use super::PlotData;
    use crate::regression::DataPoint;

    #[test]
    fn test_parse_point_accepts_finite_numbers() {
        assert_eq!(
            parse_point(" 2.5", "3 "),
            Some(DataPoint { x: 2.5, y: 3.0 })
        );
        assert_eq!(
            parse_point("-1e2", "0.125"),
            Some(DataPoint { x: -100.0, y: 0.125 })
        );
    }

    #[test]
    fn test_parse_point_rejects_bad_input() {
        assert_eq!(parse_point("abc", "1"), None);
        assert_eq!(parse_point("1", ""), None);
        assert_eq!(parse_point("NaN", "1"), None);
        assert_eq!(parse_point("inf", "1"), None);
    }

    #[test]
    fn test_add_point_unpins_manual_override() {
        let mut data = PlotData::default();
        data.manual_pinned = true;
        let before = data.points.len();
        add_point(&mut data, DataPoint { x: 6.0, y: 9.0 });
        assert_eq!(data.points.len(), before + 1);
        assert!(!data.manual_pinned);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.23456789), 1.2346);
        assert_eq!(round4(-0.00004), -0.0);
        assert_eq!(round4(2.0), 2.0);
    }
}
