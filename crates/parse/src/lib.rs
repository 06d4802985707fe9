pub mod scanner;
pub mod types;

// Re-export main types
pub use scanner::scan;
pub use types::{Block, Declaration, Item, Scope, Stylesheet};
