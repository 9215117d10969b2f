// Pipeline orchestration — sequences the analysis stages over a corpus.

pub mod analysis;
