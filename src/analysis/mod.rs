// Proximity analysis — word, topic, and corpus-level distance aggregation
// plus outlier detection.

pub mod global_proximity;
pub mod graph;
pub mod outliers;
pub mod pairs;
pub mod topic_proximity;
pub mod word_distance;
pub mod word_graph;
