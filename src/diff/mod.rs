pub mod reconcile;
pub mod segments;
pub mod tokenize;

pub use reconcile::reconcile;
pub use segments::{render, render_original, revert, revert_all, revised_count, TextSegment};
pub use tokenize::tokenize;
