pub mod normalize;
pub mod schema;
pub mod verdict;

pub use normalize::strip_dateline;
pub use verdict::{LabelMap, LabelMapError, Prediction, Verdict};
