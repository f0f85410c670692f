use crate::regression::DataPoint;
use crate::regression::FitLine;

pub fn equation_label(line: &FitLine) -> String {
    let sign = if line.intercept < 0.0 { '-' } else { '+' };
    format!(
        "y = {:.4}x {} {:.4}",
        line.slope,
        sign,
        line.intercept.abs()
    )
}

pub fn error_label(sum_squared_error: f64) -> String {
    format!("SSE = {:.4}", sum_squared_error)
}

pub fn tick_label(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn point_label(point: &DataPoint) -> String {
    format!("({:.4}, {:.4})", point.x, point.y)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_equation_label() {
        let line = FitLine {
            slope: 1.2,
            intercept: 1.8,
        };
        assert_eq!(equation_label(&line), "y = 1.2000x + 1.8000");
    }

    #[test]
    fn test_equation_label_negative_intercept() {
        let line = FitLine {
            slope: 0.5,
            intercept: -2.0,
        };
        assert_eq!(equation_label(&line), "y = 0.5000x - 2.0000");
    }

    #[test]
    fn test_error_label() {
        assert_eq!(error_label(2.8), "SSE = 2.8000");
        assert_eq!(error_label(0.0), "SSE = 0.0000");
    }

    #[test]
    fn test_tick_label_one_decimal() {
        assert_eq!(tick_label(2.5), "2.5");
        assert_eq!(tick_label(10.0), "10.0");
    }

    #[test]
    fn test_point_label() {
        let p = DataPoint { x: 1.5, y: -0.25 };
        assert_eq!(point_label(&p), "(1.5000, -0.2500)");
    }
}
