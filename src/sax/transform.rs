//! Numeric transforms applied to each discretization window

/// Arithmetic mean (0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator, 0 for fewer than two values)
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mu = mean(values);
    let ss: f64 = values.iter().map(|x| (x - mu) * (x - mu)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Z-normalize, or return all zeros when the spread is below `threshold`
///
/// Near-flat windows carry no shape; stretching their noise to unit variance
/// would invent one.
pub fn znorm(values: &[f64], threshold: f64) -> Vec<f64> {
    let sd = std_dev(values);
    if sd < threshold {
        return vec![0.0; values.len()];
    }
    let mu = mean(values);
    values.iter().map(|x| (x - mu) / sd).collect()
}

/// Piecewise aggregate approximation to `segments` values
///
/// Segment boundaries may fall inside a point; such a point contributes to
/// both neighbouring segments in proportion to its overlap.
pub fn paa(values: &[f64], segments: usize) -> Vec<f64> {
    let n = values.len();
    if n == segments {
        return values.to_vec();
    }
    if n == 0 || segments == 0 {
        return vec![0.0; segments];
    }

    let points_per_segment = n as f64 / segments as f64;
    (0..segments)
        .map(|i| {
            let start = i as f64 * points_per_segment;
            let end = (i + 1) as f64 * points_per_segment;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(n);

            let mut sum = 0.0;
            for (j, &value) in values.iter().enumerate().take(last).skip(first) {
                let lo = start.max(j as f64);
                let hi = end.min((j + 1) as f64);
                sum += value * (hi - lo).max(0.0);
            }
            sum / points_per_segment
        })
        .collect()
}
