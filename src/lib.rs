pub mod tokenizer;

// Re-exports
pub use tokenizer::*;
