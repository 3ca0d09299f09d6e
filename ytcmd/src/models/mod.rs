mod quality;
mod selection;

pub use quality::{QualityCatalog, QualityLabel};
pub use selection::{SelectionExpression, build_selection, merge_container};
