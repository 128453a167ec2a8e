/// Upper confidence bound applied to trees
///
/// score = q + c * sqrt(ln(N + 1) / (1 + n))
///
/// ### Parameters
/// - `q` - The mean return observed through the child
/// - `visits` - The visit count `n` of the child
/// - `parent_visits` - The total visit count `N` across the child and its siblings
/// - `c` - The exploration constant, higher values favor rarely visited children
pub fn uct(q: f64, visits: u32, parent_visits: u32, c: f64) -> f64 {
    let n = visits as f64;
    let total = parent_visits as f64;
    q + c * ((total + 1.0).ln() / (1.0 + n)).sqrt()
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn uct_without_exploration_is_q() {
        assert_eq!(uct(0.7, 3, 10, 0.0), 0.7);
    }

    #[test]
    fn uct_functional() {
        assert_float_eq!(uct(0.5, 1, 3, 2.0), 0.5 + 2.0 * (4f64.ln() / 2.0).sqrt(), abs <= 1e-12);
    }

    #[test]
    fn uct_favors_rarely_visited() {
        assert!(uct(0.0, 1, 10, 1.4) > uct(0.0, 9, 10, 1.4));
    }
}
