//! Per-feature standardization fitted on training statistics only.

/// Zero-mean unit-variance scaler.
///
/// Fit on the training block and applied unchanged to inference rows so
/// the inference point never leaks into its own normalization. Columns
/// with zero variance keep a scale of 1 and pass through centered.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and population standard deviations.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_features = rows.first().map_or(0, |r| r.len());
        let n = rows.len() as f64;
        let mut means = vec![0.0; n_features];
        let mut scales = vec![1.0; n_features];
        if rows.is_empty() {
            return Self { means, scales };
        }

        for row in rows {
            for (j, v) in row.iter().enumerate() {
                means[j] += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut variances = vec![0.0; n_features];
        for row in rows {
            for (j, v) in row.iter().enumerate() {
                variances[j] += (v - means[j]).powi(2);
            }
        }
        for (s, var_sum) in scales.iter_mut().zip(variances) {
            let var = var_sum / n;
            if var > 0.0 {
                *s = var.sqrt();
            }
        }

        Self { means, scales }
    }

    /// Standardize a single row.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(j, v)| (v - self.means[j]) / self.scales[j])
            .collect()
    }

    /// Standardize a block of rows.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}
