//! Two-cluster k-means over flattened crop features.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

const CLUSTERS: usize = 2;

/// Lloyd's algorithm with deterministic seeding.
///
/// The first sample seeds cluster 0 and the sample farthest from it seeds
/// cluster 1, so identical input always yields identical labels.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub max_iterations: usize,
    /// Stop once the summed squared center shift drops to this value
    pub tolerance: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Result of a k-means fit.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Cluster index (0 or 1) per sample
    pub labels: Vec<usize>,
    /// Euclidean distance of every sample to every center, shape (n, 2)
    pub distances: Array2<f64>,
    /// Cluster centers, shape (2, dim)
    pub centers: Array2<f64>,
}

impl Clustering {
    pub fn cluster_sizes(&self) -> [usize; CLUSTERS] {
        let mut sizes = [0; CLUSTERS];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

impl KMeans {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Cluster the rows of `samples` into two groups.
    pub fn fit(&self, samples: ArrayView2<f32>) -> Clustering {
        let (n, dim) = samples.dim();
        if n == 0 {
            return Clustering {
                labels: Vec::new(),
                distances: Array2::zeros((0, CLUSTERS)),
                centers: Array2::zeros((CLUSTERS, dim)),
            };
        }

        let data = samples.mapv(f64::from);
        let mut centers = Array2::zeros((CLUSTERS, dim));
        centers.row_mut(0).assign(&data.row(0));
        centers.row_mut(1).assign(&data.row(farthest_from(&data, 0)));

        let mut labels = vec![0; n];
        for _ in 0..self.max_iterations {
            assign(&data, &centers, &mut labels);
            let updated = recompute_centers(&data, &labels, &centers);
            let shift = (&updated - &centers).mapv(|v| v * v).sum();
            centers = updated;
            if shift <= self.tolerance {
                break;
            }
        }

        let distances = distance_matrix(&data, &centers);
        let labels = distances
            .rows()
            .into_iter()
            .map(|row| if row[1] < row[0] { 1 } else { 0 })
            .collect();

        Clustering {
            labels,
            distances,
            centers,
        }
    }
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the sample farthest from sample `origin`; the first one on ties.
fn farthest_from(data: &Array2<f64>, origin: usize) -> usize {
    let anchor = data.row(origin);
    let mut best = origin;
    let mut best_dist = 0.0;
    for (i, row) in data.rows().into_iter().enumerate() {
        let d = squared_distance(row, anchor);
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn assign(data: &Array2<f64>, centers: &Array2<f64>, labels: &mut [usize]) {
    for (label, row) in labels.iter_mut().zip(data.rows()) {
        let d0 = squared_distance(row, centers.row(0));
        let d1 = squared_distance(row, centers.row(1));
        *label = if d1 < d0 { 1 } else { 0 };
    }
}

/// Mean of each cluster's members; an empty cluster keeps its old center.
fn recompute_centers(data: &Array2<f64>, labels: &[usize], previous: &Array2<f64>) -> Array2<f64> {
    let mut centers = previous.clone();
    for k in 0..CLUSTERS {
        let members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter_map(|(i, &label)| (label == k).then_some(i))
            .collect();
        let mean: Option<Array1<f64>> = data.select(Axis(0), &members).mean_axis(Axis(0));
        if let Some(mean) = mean {
            centers.row_mut(k).assign(&mean);
        }
    }
    centers
}

fn distance_matrix(data: &Array2<f64>, centers: &Array2<f64>) -> Array2<f64> {
    Array2::from_shape_fn((data.nrows(), CLUSTERS), |(i, k)| {
        squared_distance(data.row(i), centers.row(k)).sqrt()
    })
}
