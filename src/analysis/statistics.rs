use statrs::distribution::{Continuous, Normal};

use crate::dataset::{NumericColumn, PenguinTable};
use crate::error::PenguinError;

/// Sample mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with ddof = 1. `NaN` for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile with linear interpolation between order statistics
/// (position q * (n - 1)). `NaN` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 < sorted.len() {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Minimum value. `NaN` for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::min)
}

/// Maximum value. `NaN` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::max)
}

/// Pearson correlation coefficient between two equal-length samples.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx <= 0.0 || vy <= 0.0 {
        return f64::NAN;
    }
    cov / (vx.sqrt() * vy.sqrt())
}

/// Pairwise Pearson correlation matrix over numeric columns.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

/// Compute the correlation matrix over all numeric columns of the table.
pub fn correlation_matrix(table: &PenguinTable) -> Result<CorrelationMatrix, PenguinError> {
    if table.len() < 2 {
        return Err(PenguinError::InsufficientData(
            "Need at least 2 records for a correlation matrix".to_string(),
        ));
    }

    let columns: Vec<Vec<f64>> = NumericColumn::ALL
        .iter()
        .map(|c| table.numeric(*c))
        .collect();
    let labels: Vec<&'static str> = NumericColumn::ALL.iter().map(|c| c.label()).collect();

    let k = columns.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        for j in 0..k {
            values[i][j] = if i == j {
                1.0
            } else {
                pearson(&columns[i], &columns[j])
            };
        }
    }

    Ok(CorrelationMatrix { labels, values })
}

/// Equal-width histogram bins over a sample.
#[derive(Debug, Clone)]
pub struct HistogramBins {
    /// Bin edges; `edges.len() == counts.len() + 1`
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramBins {
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin a sample into `bins` equal-width buckets over its own range.
pub fn histogram(values: &[f64], bins: usize) -> Result<HistogramBins, PenguinError> {
    if values.is_empty() {
        return Err(PenguinError::InsufficientData(
            "Cannot bin an empty sample".to_string(),
        ));
    }
    if bins == 0 {
        return Err(PenguinError::AnalysisError(
            "Histogram needs at least one bin".to_string(),
        ));
    }

    let mut lo = min(values);
    let mut hi = max(values);
    if lo == hi {
        // Degenerate sample; widen to a unit range around the value
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(HistogramBins { edges, counts })
}

/// Gaussian kernel density estimate sampled over a regular grid.
///
/// Bandwidth follows Scott's rule, `sigma * n^(-1/5)`.
pub fn kde_curve(values: &[f64], grid_points: usize) -> Result<Vec<(f64, f64)>, PenguinError> {
    let n = values.len();
    if n < 2 {
        return Err(PenguinError::InsufficientData(
            "Need at least 2 values for a density estimate".to_string(),
        ));
    }

    let sigma = std_dev(values);
    let h = sigma * (n as f64).powf(-0.2);
    if !h.is_finite() || h <= 0.0 {
        return Err(PenguinError::AnalysisError(
            "Degenerate sample: kernel bandwidth is zero".to_string(),
        ));
    }

    let kernel = Normal::new(0.0, 1.0).map_err(|e| PenguinError::AnalysisError(e.to_string()))?;
    let points = grid_points.max(2);
    let lo = min(values) - 3.0 * h;
    let hi = max(values) + 3.0 * h;
    let step = (hi - lo) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = values
                .iter()
                .map(|&xi| kernel.pdf((x - xi) / h))
                .sum::<f64>()
                / (n as f64 * h);
            (x, density)
        })
        .collect();

    Ok(curve)
}
