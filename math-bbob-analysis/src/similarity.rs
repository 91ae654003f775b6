//! Labelled algorithm × algorithm similarity matrices
//!
//! Performance similarity is derived from Euclidean distances between
//! algorithm performance vectors: `s = 1 / (1 + d)`. It is symmetric with a
//! unit diagonal. Component similarity lives in [`crate::component`].

use math_bbob_stats::NumericBackend;
use ndarray::{Array2, ArrayView2};

use crate::error::{AnalysisError, Result};

/// Square similarity matrix with one label per row/column.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    labels: Vec<String>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix; `values` must be `labels.len()` square.
    pub fn new(labels: Vec<String>, values: Array2<f64>) -> Result<Self> {
        let n = labels.len();
        if values.dim() != (n, n) {
            return Err(AnalysisError::IncompleteTable(format!(
                "similarity matrix is {:?} for {n} labels",
                values.dim()
            )));
        }
        Ok(Self { labels, values })
    }

    /// Row/column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Matrix values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of algorithms.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the matrix has no algorithm.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Similarity of row `a` to column `b`.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[[self.index_of(a)?, self.index_of(b)?]])
    }

    /// Copy without the row and column of `label`; unchanged if absent.
    pub fn without(&self, label: &str) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.labels[i] != label)
            .collect();
        self.select(&keep)
    }

    /// Copy restricted to and ordered by `labels`.
    pub fn reindexed(&self, labels: &[String]) -> Result<Self> {
        let indices = labels
            .iter()
            .map(|l| {
                self.index_of(l)
                    .ok_or_else(|| AnalysisError::UnknownAlgorithm(l.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.select(&indices))
    }

    fn select(&self, indices: &[usize]) -> Self {
        let values = Array2::from_shape_fn((indices.len(), indices.len()), |(i, j)| {
            self.values[[indices[i], indices[j]]]
        });
        Self {
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
            values,
        }
    }

    /// Values in row-major order.
    pub fn flatten(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Whether `m[i][j]` and `m[j][i]` agree within `tolerance` everywhere.
    ///
    /// Cells where both sides are `NaN` count as equal.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.values[[i, j]], self.values[[j, i]]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }
}

/// Distance → similarity transform, mapping `[0, ∞)` onto `(0, 1]`.
pub fn distance_to_similarity(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// Performance similarity between algorithm columns of `data`.
///
/// `data` has one row per function and one column per algorithm, already
/// scaled by the problem dimension. `labels` name the columns.
pub fn performance_similarity<B: NumericBackend>(
    backend: &B,
    data: ArrayView2<f64>,
    labels: &[String],
) -> Result<SimilarityMatrix> {
    if data.ncols() != labels.len() {
        return Err(AnalysisError::IncompleteTable(format!(
            "{} performance columns for {} algorithms",
            data.ncols(),
            labels.len()
        )));
    }
    let distances = backend.pairwise_distance(data.t());
    SimilarityMatrix::new(labels.to_vec(), distances.mapv(distance_to_similarity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use math_bbob_stats::NativeBackend;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_performance_similarity() {
        // rows = functions, columns = algorithms
        let data = array![[0.0, 3.0, 0.0], [0.0, 4.0, 0.0]];
        let sim = performance_similarity(&NativeBackend, data.view(), &labels(&["A", "B", "C"]))
            .unwrap();
        assert_relative_eq!(sim.get("A", "B").unwrap(), 1.0 / 6.0, epsilon = 1e-15);
        assert_eq!(sim.get("A", "C").unwrap(), 1.0);
        assert_eq!(sim.get("B", "B").unwrap(), 1.0);
    }

    #[test]
    fn test_performance_similarity_properties() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..30 {
            let functions = rng.random_range(1..25);
            let algorithms = rng.random_range(2..11);
            let data = Array2::from_shape_fn((functions, algorithms), |_| {
                rng.random_range(-50.0..50.0)
            });
            let names: Vec<String> = (0..algorithms).map(|i| format!("alg{i}")).collect();
            let sim = performance_similarity(&NativeBackend, data.view(), &names).unwrap();

            assert!(sim.is_symmetric(0.0));
            for i in 0..algorithms {
                assert_eq!(sim.values()[[i, i]], 1.0);
            }
            assert!(sim.values().iter().all(|&v| v > 0.0 && v <= 1.0));
        }
    }

    #[test]
    fn test_missing_values_propagate() {
        let data = array![[1.0, f64::NAN], [2.0, 2.0]];
        let sim = performance_similarity(&NativeBackend, data.view(), &labels(&["A", "B"]))
            .unwrap();
        assert!(sim.get("A", "B").unwrap().is_nan());
        assert_eq!(sim.get("B", "B").unwrap(), 1.0);
    }

    #[test]
    fn test_without_and_reindex() {
        let m = SimilarityMatrix::new(
            labels(&["A", "B", "C"]),
            array![[1.0, 0.2, 0.3], [0.4, 1.0, 0.6], [0.7, 0.8, 1.0]],
        )
        .unwrap();

        let without = m.without("B");
        assert_eq!(without.labels(), &labels(&["A", "C"])[..]);
        assert_eq!(without.flatten(), vec![1.0, 0.3, 0.7, 1.0]);
        assert_eq!(m.without("Z"), m);

        let reindexed = m.reindexed(&labels(&["C", "A"])).unwrap();
        assert_eq!(reindexed.flatten(), vec![1.0, 0.7, 0.3, 1.0]);
        assert!(m.reindexed(&labels(&["D"])).is_err());
        assert!(!m.is_symmetric(1e-9));
    }

    #[test]
    fn test_shape_checks() {
        assert!(SimilarityMatrix::new(labels(&["A"]), Array2::zeros((2, 2))).is_err());
        let data = Array2::zeros((3, 2));
        assert!(performance_similarity(&NativeBackend, data.view(), &labels(&["A"])).is_err());
    }
}
