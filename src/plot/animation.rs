use rand::Rng;

use crate::regression;
use crate::regression::DataPoint;
use crate::regression::FitLine;

const MIN_EASE_DURATION_MS: f64 = 80.0;
const EASE_DURATION_PER_SPEED_MS: f64 = 8.0;
const MIN_STEP_DELAY_MS: f64 = 40.0;
const STEP_DELAY_PER_SPEED_MS: f64 = 4.0;

const TRACE_POINT_COUNT: usize = 8;
const TRACE_RANGE: f64 = 10.0;

const SPIRAL_SLOPE_AMPLITUDE: f64 = 0.75;
const SPIRAL_INTERCEPT_AMPLITUDE: f64 = 2.0;
/// Radians of spiral phase per millisecond of elapsed time.
const SPIRAL_PHASE_RATE: f64 = 0.025;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationKind {
    Ease,
    Spiral,
    Trace,
}

/// The live animation session, if any. Exactly one session can run at a
/// time; starting a new one or cancelling replaces the whole value, so no
/// two sessions can ever race on the displayed line.
#[derive(Debug)]
pub enum Animation {
    Idle,
    Ease(EaseSession),
    Spiral(SpiralSession),
    Trace(TraceSession),
}

impl Animation {
    pub fn ease(from: FitLine, to: FitLine, speed: f64) -> Self {
        Animation::Ease(EaseSession::new(from, to, speed))
    }

    pub fn spiral(from: FitLine, to: FitLine, speed: f64) -> Self {
        Animation::Spiral(SpiralSession::new(from, to, speed))
    }

    pub fn trace(session: TraceSession) -> Self {
        Animation::Trace(session)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Animation::Idle)
    }

    pub fn cancel(&mut self) {
        *self = Animation::Idle;
    }

    pub fn trace_session(&self) -> Option<&TraceSession> {
        match self {
            Animation::Trace(session) => Some(session),
            _ => None,
        }
    }

    /// Advance the session by `dt_ms` and return the new displayed line.
    /// Terminal ticks snap exactly to the target and reset to `Idle`.
    pub fn advance(&mut self, dt_ms: f64, displayed: FitLine) -> FitLine {
        let (line, done) = match self {
            Animation::Idle => (displayed, false),
            Animation::Ease(session) => session.advance(dt_ms),
            Animation::Spiral(session) => session.advance(dt_ms),
            Animation::Trace(session) => session.advance(dt_ms, displayed),
        };
        if done {
            *self = Animation::Idle;
        }
        line
    }
}

#[derive(Debug)]
pub struct EaseSession {
    start: FitLine,
    target: FitLine,
    elapsed_ms: f64,
    duration_ms: f64,
}

impl EaseSession {
    fn new(start: FitLine, target: FitLine, speed: f64) -> Self {
        EaseSession {
            start,
            target,
            elapsed_ms: 0.0,
            duration_ms: (speed * EASE_DURATION_PER_SPEED_MS).max(MIN_EASE_DURATION_MS),
        }
    }

    fn advance(&mut self, dt_ms: f64) -> (FitLine, bool) {
        self.elapsed_ms += dt_ms;
        let norm = self.elapsed_ms / self.duration_ms;
        if norm >= 1.0 {
            return (self.target, true);
        }
        let e = ease_in_out(norm);
        let line = FitLine {
            slope: lerp(self.start.slope, self.target.slope, e),
            intercept: lerp(self.start.intercept, self.target.intercept, e),
        };
        (line, false)
    }
}

/// Ease plus a decaying sinusoid on both parameters. The perturbation is
/// weighted by `1 - ease`, so the terminal tick is exactly the target.
#[derive(Debug)]
pub struct SpiralSession {
    start: FitLine,
    target: FitLine,
    elapsed_ms: f64,
    duration_ms: f64,
}

impl SpiralSession {
    fn new(start: FitLine, target: FitLine, speed: f64) -> Self {
        SpiralSession {
            start,
            target,
            elapsed_ms: 0.0,
            duration_ms: (speed * EASE_DURATION_PER_SPEED_MS).max(MIN_EASE_DURATION_MS),
        }
    }

    fn advance(&mut self, dt_ms: f64) -> (FitLine, bool) {
        self.elapsed_ms += dt_ms;
        let norm = self.elapsed_ms / self.duration_ms;
        if norm >= 1.0 {
            return (self.target, true);
        }
        let e = ease_in_out(norm);
        let decay = 1.0 - e;
        let phase = self.elapsed_ms * SPIRAL_PHASE_RATE;
        let line = FitLine {
            slope: lerp(self.start.slope, self.target.slope, e)
                + decay * SPIRAL_SLOPE_AMPLITUDE * phase.sin(),
            intercept: lerp(self.start.intercept, self.target.intercept, e)
                + decay * SPIRAL_INTERCEPT_AMPLITUDE * phase.cos(),
        };
        (line, false)
    }
}

/// Demo mode: walks a synthetic random point set one point per step, then
/// settles the displayed line onto the OLS fit of that synthetic set. The
/// synthetic points never join the user's data and are discarded on
/// completion.
#[derive(Debug)]
pub struct TraceSession {
    points: Vec<DataPoint>,
    cursor: usize,
    step_elapsed_ms: f64,
    step_delay_ms: f64,
    speed: f64,
    settle: Option<EaseSession>,
}

impl TraceSession {
    pub fn generate(speed: f64) -> Self {
        let mut rng = rand::thread_rng();
        let points = (0..TRACE_POINT_COUNT)
            .map(|_| DataPoint {
                x: round1(rng.gen_range(0.0..TRACE_RANGE)),
                y: round1(rng.gen_range(0.0..TRACE_RANGE)),
            })
            .collect();
        Self::from_points(points, speed)
    }

    pub fn from_points(points: Vec<DataPoint>, speed: f64) -> Self {
        TraceSession {
            points,
            cursor: 0,
            step_elapsed_ms: 0.0,
            step_delay_ms: (speed * STEP_DELAY_PER_SPEED_MS).max(MIN_STEP_DELAY_MS),
            speed,
            settle: None,
        }
    }

    /// Synthetic points visited so far, in trace order.
    pub fn visited(&self) -> &[DataPoint] {
        &self.points[..self.cursor]
    }

    fn advance(&mut self, dt_ms: f64, displayed: FitLine) -> (FitLine, bool) {
        if let Some(settle) = self.settle.as_mut() {
            return settle.advance(dt_ms);
        }
        self.step_elapsed_ms += dt_ms;
        while self.step_elapsed_ms >= self.step_delay_ms && self.cursor < self.points.len() {
            self.step_elapsed_ms -= self.step_delay_ms;
            self.cursor += 1;
        }
        if self.cursor == self.points.len() {
            let target = regression::fit(&self.points).line;
            self.settle = Some(EaseSession::new(displayed, target, self.speed));
        }
        (displayed, false)
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod test {
    use super::ease_in_out;
    use super::Animation;
    use super::TraceSession;
    use crate::regression;
    use crate::regression::DataPoint;
    use crate::regression::FitLine;

    fn run_to_completion(animation: &mut Animation, mut displayed: FitLine) -> FitLine {
        for _ in 0..100_000 {
            if !animation.is_active() {
                return displayed;
            }
            displayed = animation.advance(7.0, displayed);
        }
        panic!("animation never completed");
    }

    #[test]
    fn test_ease_shape() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        let mut last = 0.0;
        for i in 1..=100 {
            let v = ease_in_out(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_ease_lands_exactly_on_target() {
        let target = FitLine {
            slope: 1.2,
            intercept: 1.8,
        };
        let mut animation = Animation::ease(FitLine::ZERO, target, 30.0);
        let displayed = run_to_completion(&mut animation, FitLine::ZERO);
        assert_eq!(displayed, target);
    }

    #[test]
    fn test_spiral_leaves_no_residual_perturbation() {
        let target = FitLine {
            slope: -0.7,
            intercept: 4.0,
        };
        let mut animation = Animation::spiral(FitLine::ZERO, target, 50.0);
        let displayed = run_to_completion(&mut animation, FitLine::ZERO);
        assert_eq!(displayed, target);
    }

    #[test]
    fn test_superseding_session_wins() {
        let first = FitLine {
            slope: 5.0,
            intercept: 5.0,
        };
        let second = FitLine {
            slope: -1.0,
            intercept: 0.5,
        };
        let mut animation = Animation::ease(FitLine::ZERO, first, 100.0);
        let mut displayed = FitLine::ZERO;
        for _ in 0..10 {
            displayed = animation.advance(7.0, displayed);
        }
        assert!(animation.is_active());
        // a new point arrives: the in-flight session is replaced wholesale
        animation = Animation::ease(displayed, second, 100.0);
        let displayed = run_to_completion(&mut animation, displayed);
        assert_eq!(displayed, second);
    }

    #[test]
    fn test_idle_advance_is_identity() {
        let displayed = FitLine {
            slope: 2.0,
            intercept: -1.0,
        };
        let mut animation = Animation::Idle;
        assert_eq!(animation.advance(16.0, displayed), displayed);
        assert!(!animation.is_active());
    }

    #[test]
    fn test_trace_visits_points_then_settles_on_synthetic_fit() {
        let points = vec![
            DataPoint { x: 1.0, y: 2.0 },
            DataPoint { x: 2.0, y: 4.0 },
            DataPoint { x: 3.0, y: 6.0 },
        ];
        let expected = regression::fit(&points).line;
        // speed 10 -> 40ms per step
        let mut animation = Animation::trace(TraceSession::from_points(points, 10.0));
        let mut displayed = FitLine::ZERO;

        displayed = animation.advance(40.0, displayed);
        assert_eq!(animation.trace_session().unwrap().visited().len(), 1);
        displayed = animation.advance(40.0, displayed);
        assert_eq!(animation.trace_session().unwrap().visited().len(), 2);
        // stepping leaves the displayed line untouched
        assert_eq!(displayed, FitLine::ZERO);

        let displayed = run_to_completion(&mut animation, displayed);
        assert_eq!(displayed, expected);
        assert!((displayed.slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cancel_forces_idle() {
        let mut animation = Animation::ease(
            FitLine::ZERO,
            FitLine {
                slope: 1.0,
                intercept: 1.0,
            },
            20.0,
        );
        assert!(animation.is_active());
        animation.cancel();
        assert!(!animation.is_active());
    }
}
