//! Per-request machine learning primitives: standardization and a
//! seeded random forest. Nothing here holds state between requests;
//! the predictor constructs a fresh scaler and forest every call.

pub mod forest;
pub mod scaler;
pub mod tree;

pub use forest::{ForestConfig, RandomForest};
pub use scaler::StandardScaler;
pub use tree::{DecisionTree, TreeConfig};
