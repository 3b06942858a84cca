use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// Per feature z-score standardization: `(x - mean) / std`.
///
/// The standard deviation is the population one. A constant feature has a zero standard
/// deviation and transforms into non-finite values, nothing guards against it.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f32>,
    std: Array1<f32>,
}

impl StandardScaler {
    /// Fits the scaler to the columns of `x`.
    ///
    /// # Arguments
    /// * `x` - The reference samples, one per row.
    ///
    /// # Returns
    /// The fitted scaler, or an error if `x` has no rows.
    pub fn fit(x: ArrayView2<f32>) -> Result<Self> {
        let mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyBatch)?;
        let std = x.std_axis(Axis(0), 0.);

        Ok(Self { mean, std })
    }

    /// Returns the amount of features this scaler was fitted on.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn transform(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_width(x.ncols())?;
        Ok((&x - &self.mean) / &self.std)
    }

    pub fn inverse_transform(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_width(x.ncols())?;
        Ok(&x * &self.std + &self.mean)
    }

    /// Transforms a single sample.
    pub fn transform_row(&self, row: &[f32]) -> Result<Array1<f32>> {
        self.check_width(row.len())?;
        let row = ArrayView1::from(row);
        Ok((&row - &self.mean) / &self.std)
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width != self.len() {
            return Err(MlErr::SizeMismatch {
                what: "scaler features",
                got: width,
                expected: self.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn fitted_columns_have_zero_mean_and_unit_variance() {
        let x = array![[1.0, 100.0], [2.0, 300.0], [3.0, 200.0], [6.0, 400.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let z = scaler.transform(x.view()).unwrap();

        for col in z.columns() {
            assert!(col.mean().unwrap().abs() < 1e-5);
            assert!((col.std(0.) - 1.).abs() < 1e-5);
        }
    }

    #[test]
    fn round_trip_returns_the_input() {
        let x = array![[0.5, -3.0, 12.0], [1.5, 4.0, 10.0], [-2.0, 0.0, 11.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let sample = array![[3.25, -1.5, 10.5]];
        let z = scaler.transform(sample.view()).unwrap();
        let back = scaler.inverse_transform(z.view()).unwrap();

        for (a, b) in sample.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-4, "{a} != {b}");
        }
    }

    #[test]
    fn constant_feature_is_not_finite() {
        let x = array![[1.0, 5.0], [2.0, 5.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let z = scaler.transform(x.view()).unwrap();

        assert!(z.column(0).iter().all(|v| v.is_finite()));
        assert!(z.column(1).iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn wrong_width_is_a_size_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        let res = scaler.transform_row(&[1.0, 2.0, 3.0]);
        assert!(matches!(res, Err(MlErr::SizeMismatch { got: 3, expected: 2, .. })));
    }

    #[test]
    fn empty_input_cannot_be_fitted() {
        let x = Array2::<f32>::zeros((0, 3));
        assert!(StandardScaler::fit(x.view()).is_err());
    }
}
