// Topic communities — hierarchical clustering of topic proximity profiles.

pub mod detector;
pub mod error;
pub mod linkage;

pub use detector::{detect_communities, Community, CommunityDetector, CommunityReport};
pub use error::ClusterError;
