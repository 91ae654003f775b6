//! Heatmap rendering of similarity matrices with plotly

use plotly::common::{ColorScale, ColorScalePalette, Title};
use plotly::{HeatMap, Layout, Plot};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::metrics::slug;
use crate::similarity::SimilarityMatrix;

/// File name of the component similarity figure.
pub const COMPONENT_FIGURE: &str = "component_sim.html";

const FIGURE_SIZE: usize = 800;

/// File name of a performance similarity figure, e.g. `10D_ERT_Area_Functions_1-5.html`.
pub fn performance_figure_name(dimension: usize, metric: &str, group: &str) -> String {
    format!("{dimension}D_{}_{}.html", slug(metric), slug(group))
}

/// Title of a performance similarity figure.
pub fn performance_figure_title(dimension: usize, metric: &str, group: &str) -> String {
    format!("{group} in {dimension}D using the {metric} metric")
}

/// Build a heatmap of `matrix`, labelled on both axes.
pub fn similarity_heatmap(matrix: &SimilarityMatrix, title: &str) -> Plot {
    let labels = matrix.labels().to_vec();
    let z: Vec<Vec<f64>> = matrix
        .values()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();

    let heatmap = HeatMap::new(labels.clone(), labels, z)
        .color_scale(ColorScale::Palette(ColorScalePalette::Blues));

    let layout = Layout::new()
        .title(Title::with_text(title))
        .width(FIGURE_SIZE)
        .height(FIGURE_SIZE);

    let mut plot = Plot::new();
    plot.add_trace(heatmap);
    plot.set_layout(layout);
    plot
}

/// Render `matrix` to an HTML file at `path`, creating parent directories.
pub fn write_heatmap<P: AsRef<Path>>(
    matrix: &SimilarityMatrix,
    title: &str,
    path: P,
) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    similarity_heatmap(matrix, title).write_html(path);
    log::info!("Saved heatmap '{}' to {}", title, path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_data_dir;
    use ndarray::array;

    #[test]
    fn test_names() {
        assert_eq!(
            performance_figure_name(10, "ERT Area", "Functions 1-5"),
            "10D_ERT_Area_Functions_1-5.html"
        );
        assert_eq!(
            performance_figure_title(10, "ERT Area", "Functions 1-24"),
            "Functions 1-24 in 10D using the ERT Area metric"
        );
    }

    #[test]
    fn test_write_heatmap() {
        let matrix = SimilarityMatrix::new(
            vec!["A".to_string(), "B".to_string()],
            array![[1.0, 0.5], [f64::NAN, 1.0]],
        )
        .unwrap();
        let path = test_data_dir("heatmap").join("figures").join(COMPONENT_FIGURE);
        let written = write_heatmap(&matrix, "Component similarity", &path).unwrap();
        assert_eq!(written, path);
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("Component similarity"));
    }
}
