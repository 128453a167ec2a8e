/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```ignore
/// let gamma = 2.0;
/// assert_interval!(gamma, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`gamma\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Asserts that a discount factor is in the interval `(0,1]`
pub(crate) fn assert_discount(gamma: f64) {
    assert_interval!(gamma, 0.0, 1.0);
    assert!(gamma > 0.0, "Invalid value for `gamma`. Must be greater than 0.");
}

/// Index of the largest value, keeping the first one on ties
///
/// **Returns** `None` if `values` is empty
pub(crate) fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_keeps_first_tie() {
        assert_eq!(argmax([1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax([0.0, 0.0]), Some(0));
        assert_eq!(argmax(Vec::new()), None);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `gamma`")]
    fn discount_rejects_zero() {
        assert_discount(0.0);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `gamma`")]
    fn discount_rejects_above_one() {
        assert_discount(1.5);
    }
}
