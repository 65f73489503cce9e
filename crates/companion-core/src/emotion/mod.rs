//! Emotion classification domain module.
//!
//! # Module Structure
//!
//! - `category`: The closed `EmotionCategory` enumeration
//! - `keywords`: Keyword tables (`KeywordTable`) with built-in defaults
//! - `classifier`: Priority-ordered keyword classifier (`EmotionClassifier`)

mod category;
mod classifier;
mod keywords;

// Re-export public API
pub use category::EmotionCategory;
pub use classifier::{Classification, EmotionClassifier};
pub use keywords::KeywordTable;
