// langprox: lexical proximity analysis across translations.
//
// This is the library root. Each module corresponds to a stage or
// supporting layer of the analysis pipeline.

pub mod analysis;
pub mod community;
pub mod config;
pub mod corpus;
pub mod lexical;
pub mod output;
pub mod pipeline;
pub mod status;
