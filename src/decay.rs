use crate::error::{PlanError, Result};

/// An implementation of a time-decaying value, evaluated at an episode index
pub trait Decay {
    /// Calculate value at episode `t`
    fn evaluate(&self, t: i64) -> f64;
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: i64) -> f64 {
        self.value
    }
}

/// Linear interpolation from `start` to `end` over `steps` episodes
///
/// v(t) = v<sub>s</sub> + (t / n) * (v<sub>e</sub> - v<sub>s</sub>)
///
/// Clamped to `start` for t <= 0 and to `end` for t >= n.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    start: f64,
    end: f64,
    steps: i64,
}

impl Linear {
    pub fn new(start: f64, end: f64, steps: i64) -> Self {
        Self { start, end, steps }
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: i64) -> f64 {
        let &Self { start, end, steps } = self;
        if t <= 0 {
            return start;
        }
        if t >= steps {
            return end;
        }
        start + (t as f64 / steps as f64) * (end - start)
    }
}

/// v(t) = v<sub>e</sub> + (v<sub>s</sub> - v<sub>e</sub>) * e<sup>-rt</sup>
///
/// Clamped to `start` for t <= 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    start: f64,
    end: f64,
}

impl Exponential {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self> {
        if !(rate >= 0.0) {
            return Err(PlanError::InvalidSchedule(format!(
                "`rate` must be non-negative, got {rate}"
            )));
        }
        Ok(Self { rate, start, end })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: i64) -> f64 {
        let &Self { rate, start, end } = self;
        if t <= 0 {
            return start;
        }
        end + (start - end) * (-rate * t as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn constant_decay() {
        let x = Constant::new(0.3);
        assert_eq!(x.evaluate(0), 0.3);
        assert_eq!(x.evaluate(1000), 0.3);
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.5, 0.05, 50);
        assert_eq!(x.evaluate(0), 0.5);
        assert_float_eq!(x.evaluate(25), 0.275, abs <= 1e-12);
        assert_eq!(x.evaluate(50), 0.05);
    }

    #[test]
    fn linear_decay_clamps() {
        let x = Linear::new(0.5, 0.05, 50);
        assert_eq!(x.evaluate(-1), 0.5);
        assert_eq!(x.evaluate(100), 0.05);
    }

    #[test]
    fn linear_decay_without_steps() {
        let x = Linear::new(1.0, 0.0, 0);
        assert_eq!(x.evaluate(0), 1.0);
        assert_eq!(x.evaluate(1), 0.0);
    }

    #[test]
    fn linear_growth() {
        let x = Linear::new(0.0, 1.0, 4);
        assert_float_eq!(x.evaluate(1), 0.25, abs <= 1e-12);
    }

    #[test]
    fn exponential_decay() {
        let x = Exponential::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0), 2.0);
        assert_eq!(x.evaluate(-3), 2.0);
        assert_float_eq!(x.evaluate(1), 0.5 + 1.5 * f64::exp(-2.0), abs <= 1e-12);
    }

    #[test]
    fn exponential_rejects_negative_rate() {
        assert!(Exponential::new(-1.0, 1.0, 0.0).is_err());
    }
}
