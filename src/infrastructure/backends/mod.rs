mod analysis_api;

pub use analysis_api::*;
