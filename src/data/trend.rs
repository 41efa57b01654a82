use super::model::Row;

/// Number of points sampled along the fitted line.
pub const TREND_SAMPLES: usize = 100;

/// Least-squares line of tip on total bill.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// `TREND_SAMPLES` points spanning [min bill, max bill], ready to plot.
    pub points: Vec<[f64; 2]>,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `tip = slope * total_bill + intercept` over the rows.
///
/// Returns `None` unless there are at least two distinct bill amounts.
pub fn fit(rows: &[Row]) -> Option<TrendLine> {
    let points: Vec<(f64, f64)> = rows.iter().map(|r| (r.total_bill, r.tip)).collect();
    fit_points(&points)
}

/// Ordinary least squares over `(x, y)` pairs.
pub fn fit_points(points: &[(f64, f64)]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }

    let (min_x, max_x) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
            (lo.min(x), hi.max(x))
        });
    // Single distinct x: the variance is zero.
    if min_x == max_x {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), &(x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let line = TrendLine {
        slope,
        intercept,
        points: Vec::new(),
    };
    let points = linspace(min_x, max_x, TREND_SAMPLES)
        .map(|x| [x, line.predict(x)])
        .collect();

    Some(TrendLine { points, ..line })
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| if i + 1 == n { end } else { start + step * i as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_recovers_colinear_line() {
        let points: Vec<(f64, f64)> = [10.0, 15.5, 22.0, 31.25, 48.0]
            .into_iter()
            .map(|x| (x, 0.2 * x + 1.0))
            .collect();

        let line = fit_points(&points).unwrap();
        assert!((line.slope - 0.2).abs() < 1e-9);
        assert!((line.intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_samples_span_x_range() {
        let points = vec![(12.0, 2.0), (40.0, 6.0), (25.0, 3.5)];
        let line = fit_points(&points).unwrap();

        assert_eq!(line.points.len(), TREND_SAMPLES);
        assert_eq!(line.points.first().unwrap()[0], 12.0);
        assert_eq!(line.points.last().unwrap()[0], 40.0);
        for [x, y] in &line.points {
            assert!((y - line.predict(*x)).abs() < 1e-12);
        }
        assert!(line.points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn test_fit_degenerate_inputs() {
        assert!(fit_points(&[]).is_none());
        assert!(fit_points(&[(30.0, 5.0)]).is_none());
        assert!(fit_points(&[(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)]).is_none());
    }

    #[test]
    fn test_fit_two_points_is_exact() {
        let line = fit_points(&[(20.0, 3.0), (30.0, 5.0)]).unwrap();
        assert!((line.slope - 0.2).abs() < 1e-12);
        assert!((line.intercept + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs: Vec<f64> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 3.0, 1).collect::<Vec<_>>(), vec![3.0]);
    }
}
