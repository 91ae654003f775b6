//! Algorithm design components and their pairwise similarity
//!
//! The component table is a CSV file with one row per algorithm. The first
//! cell of each row is the algorithm name, the header names the components:
//!
//! ```text
//! algorithm,Recombination,Restart,...
//! CMA-ES-pycma,weighted,IPOP,...
//! HE-ES,weighted,X,...
//! ```
//!
//! A cell equal to the not-applicable sentinel (`X` by default) means the
//! component does not exist in that algorithm.

use ndarray::Array2;
use std::fs;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::similarity::SimilarityMatrix;

/// Default not-applicable marker.
pub const NOT_APPLICABLE: &str = "X";

/// One cell of the component table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentValue {
    /// Categorical value of the component
    Value(String),
    /// The algorithm has no such component
    NotApplicable,
}

impl ComponentValue {
    /// Parse a trimmed cell, mapping `sentinel` to [`ComponentValue::NotApplicable`].
    pub fn parse(cell: &str, sentinel: &str) -> Self {
        let cell = cell.trim();
        if cell == sentinel {
            ComponentValue::NotApplicable
        } else {
            ComponentValue::Value(cell.to_string())
        }
    }

    /// Whether the component exists.
    pub fn is_applicable(&self) -> bool {
        matches!(self, ComponentValue::Value(_))
    }
}

/// Algorithms × components table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMatrix {
    /// Row labels
    pub algorithms: Vec<String>,
    /// Column labels, trimmed
    pub components: Vec<String>,
    /// One row of `components.len()` values per algorithm
    pub values: Vec<Vec<ComponentValue>>,
}

impl ComponentMatrix {
    /// Read a component table, treating cells equal to `sentinel` as not applicable.
    pub fn from_csv<P: AsRef<Path>>(path: P, sentinel: &str) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let parse_error = |line: usize, message: String| AnalysisError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());
        let (_, header) = lines
            .next()
            .ok_or_else(|| parse_error(1, "empty component table".to_string()))?;
        let components: Vec<String> = header
            .split(',')
            .skip(1)
            .map(|c| c.trim().to_string())
            .collect();

        let mut matrix = Self {
            algorithms: Vec::new(),
            components,
            values: Vec::new(),
        };
        for (idx, line) in lines {
            let line_no = idx + 1;
            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != matrix.components.len() + 1 {
                return Err(parse_error(
                    line_no,
                    format!(
                        "expected {} cells, got {}",
                        matrix.components.len() + 1,
                        cells.len()
                    ),
                ));
            }
            let algorithm = cells[0].trim().to_string();
            if matrix.algorithms.contains(&algorithm) {
                return Err(parse_error(
                    line_no,
                    format!("algorithm '{algorithm}' listed twice"),
                ));
            }
            matrix.algorithms.push(algorithm);
            matrix.values.push(
                cells[1..]
                    .iter()
                    .map(|cell| ComponentValue::parse(cell, sentinel))
                    .collect(),
            );
        }

        log::info!(
            "Loaded {} algorithms x {} components from {}",
            matrix.algorithms.len(),
            matrix.components.len(),
            path.display()
        );
        Ok(matrix)
    }

    /// Copy without the named components.
    pub fn without_components(&self, excluded: &[String]) -> Result<Self> {
        let mut keep = vec![true; self.components.len()];
        for name in excluded {
            let idx = self
                .components
                .iter()
                .position(|c| c == name.trim())
                .ok_or_else(|| AnalysisError::UnknownComponent(name.clone()))?;
            keep[idx] = false;
        }

        Ok(Self {
            algorithms: self.algorithms.clone(),
            components: retain_flagged(&self.components, &keep),
            values: self
                .values
                .iter()
                .map(|row| retain_flagged(row, &keep))
                .collect(),
        })
    }

    /// Components of `algorithm`, if listed.
    pub fn row(&self, algorithm: &str) -> Option<&[ComponentValue]> {
        self.algorithms
            .iter()
            .position(|a| a == algorithm)
            .map(|i| self.values[i].as_slice())
    }
}

fn retain_flagged<T: Clone>(items: &[T], keep: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(item, _)| item.clone())
        .collect()
}

/// Share of the components of `a` that `b` implements the same way.
///
/// Only components applicable to both are compared, but the denominator
/// counts every component applicable to `a`, so the measure is not
/// symmetric. `NaN` when `a` has no applicable component.
pub fn component_similarity(a: &[ComponentValue], b: &[ComponentValue]) -> f64 {
    let applicable = a.iter().filter(|v| v.is_applicable()).count();
    let shared = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_applicable() && y.is_applicable() && x == y)
        .count();
    shared as f64 / applicable as f64
}

fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Matrix with `[i][j] = component_similarity(alg_i, alg_j)`, rounded to two decimals.
pub fn component_similarity_matrix(components: &ComponentMatrix) -> Result<SimilarityMatrix> {
    let n = components.algorithms.len();
    let values = Array2::from_shape_fn((n, n), |(i, j)| {
        round2(component_similarity(
            &components.values[i],
            &components.values[j],
        ))
    });
    SimilarityMatrix::new(components.algorithms.clone(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_data_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        test_data_dir("component").join(name)
    }

    fn row(cells: &[&str]) -> Vec<ComponentValue> {
        cells
            .iter()
            .map(|c| ComponentValue::parse(c, NOT_APPLICABLE))
            .collect()
    }

    fn write_table(name: &str) -> PathBuf {
        let path = temp_path(name);
        fs::write(
            &path,
            "algorithm,Recombination,Sampling,Ranking ,Restart\n\
             A, weighted ,gaussian,rank,IPOP\n\
             B,weighted,gaussian,rank,IPOP\n\
             C,uniform,mirrored,fitness,BIPOP\n\
             D,weighted,X,X,X\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_similarity_values() {
        let a = row(&["weighted", "IPOP", "active"]);
        let b = row(&["weighted", "IPOP", "active"]);
        let c = row(&["uniform", "BIPOP", "passive"]);
        assert_eq!(component_similarity(&a, &b), 1.0);
        assert_eq!(component_similarity(&a, &c), 0.0);
        assert_eq!(component_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_similarity_is_asymmetric() {
        let a = row(&["weighted", "IPOP", "active"]);
        let d = row(&["weighted", "X", "X"]);
        assert!((component_similarity(&a, &d) - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(component_similarity(&d, &a), 1.0);
    }

    #[test]
    fn test_nothing_applicable_is_nan() {
        let empty = row(&["X", "X"]);
        let other = row(&["weighted", "IPOP"]);
        assert!(component_similarity(&empty, &other).is_nan());
        assert_eq!(component_similarity(&other, &empty), 0.0);
    }

    #[test]
    fn test_read_and_exclude() {
        let path = write_table("components.csv");
        let matrix = ComponentMatrix::from_csv(&path, NOT_APPLICABLE).unwrap();
        assert_eq!(matrix.algorithms, vec!["A", "B", "C", "D"]);
        assert_eq!(matrix.components[2], "Ranking");
        assert_eq!(
            matrix.row("A").unwrap()[0],
            ComponentValue::Value("weighted".to_string())
        );
        assert!(!matrix.row("D").unwrap()[1].is_applicable());

        let excluded = vec!["Sampling".to_string(), "Ranking ".to_string()];
        let reduced = matrix.without_components(&excluded).unwrap();
        assert_eq!(reduced.components, vec!["Recombination", "Restart"]);
        assert_eq!(reduced.values[2].len(), 2);

        let unknown = vec!["Step-size Adaptation".to_string()];
        assert!(matches!(
            matrix.without_components(&unknown),
            Err(AnalysisError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_similarity_matrix() {
        let path = write_table("components_matrix.csv");
        let matrix = ComponentMatrix::from_csv(&path, NOT_APPLICABLE).unwrap();
        let sim = component_similarity_matrix(&matrix).unwrap();

        assert_eq!(sim.get("A", "B"), Some(1.0));
        assert_eq!(sim.get("A", "C"), Some(0.0));
        assert_eq!(sim.get("A", "D"), Some(0.25));
        assert_eq!(sim.get("D", "A"), Some(1.0));
        assert_eq!(sim.get("C", "C"), Some(1.0));
        assert!(!sim.is_symmetric(1e-9));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_ragged_row_rejected() {
        let path = temp_path("components_ragged.csv");
        fs::write(&path, "algorithm,R,S\nA,x,y\nB,x\n").unwrap();
        let err = ComponentMatrix::from_csv(&path, NOT_APPLICABLE).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 3, .. }));
    }
}
