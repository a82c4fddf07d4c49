use crate::models::{Dataset, MacroRegion};
use serde::Serialize;

/// Per-region averages over every joined quarter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMeans {
    pub region: MacroRegion,
    pub unemployment: f64,
    pub inflation: f64,
    pub quarters: usize,
}

/// Pearson correlation with its two-tailed significance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Ordinary least squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Means per region, in region code order. Regions without rows are absent.
pub fn region_means(dataset: &Dataset) -> Vec<RegionMeans> {
    MacroRegion::ALL
        .iter()
        .filter_map(|&region| {
            let (unemployment, inflation): (Vec<f64>, Vec<f64>) = dataset
                .for_region(region)
                .map(|r| (r.unemployment, r.inflation))
                .unzip();
            Some(RegionMeans {
                region,
                unemployment: mean(&unemployment)?,
                inflation: mean(&inflation)?,
                quarters: unemployment.len(),
            })
        })
        .collect()
}

// Centered sums of squares and cross products: (sxx, syy, sxy)
fn centered_moments(x: &[f64], y: &[f64]) -> Option<(f64, f64, f64)> {
    if x.len() != y.len() {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    Some(x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (&xi, &yi)| {
        let dx = xi - mx;
        let dy = yi - my;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    }))
}

/// Pearson r between `x` and `y` with a two-tailed p-value from Student's t
/// on `n - 2` degrees of freedom.
///
/// Returns `None` for mismatched lengths, fewer than two points, or a
/// constant series.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<Correlation> {
    let n = x.len();
    if n < 2 {
        return None;
    }
    let (sxx, syy, sxy) = centered_moments(x, y)?;
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let p_value = if n == 2 {
        1.0
    } else {
        let df = (n - 2) as f64;
        let residual = 1.0 - r * r;
        if residual <= 0.0 {
            0.0
        } else {
            let t2 = r * r * df / residual;
            regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t2))
        }
    };

    Some(Correlation { r, p_value, n })
}

/// Least-squares line through the points; `None` if `x` has no variance.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() < 2 {
        return None;
    }
    let (sxx, _, sxy) = centered_moments(x, y)?;
    if sxx <= 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = mean(y)? - slope * mean(x)?;
    Some(LinearFit { slope, intercept })
}

const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)]
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Natural log of the gamma function (Lanczos approximation)
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = LANCZOS_COEFFICIENTS[0];
    for (i, c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Regularized incomplete beta function I_x(a, b)
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let front = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();
    // The continued fraction converges fast only on this side of the mean
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 300;
    const EPSILON: f64 = 3e-14;
    const FLOOR: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < FLOOR { FLOOR } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let even = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + even * d);
        c = guard(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + odd * d);
        c = guard(1.0 + odd / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    h
}
