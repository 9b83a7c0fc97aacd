pub mod dead_code;

pub use dead_code::{DeadCodeDetection, DeadCodeReport};
