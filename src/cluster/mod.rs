pub mod dbscan;
pub mod labels;
pub mod params;

pub use dbscan::Dbscan;
pub use labels::{ClusterLabels, NOISE};
pub use params::{ClusterParams, DEFAULT_EPS, DEFAULT_MIN_SAMPLES};
