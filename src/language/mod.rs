pub mod core;
pub mod source;

// Re-export the main types for convenience
pub use self::core::{Language, DEFAULT_LANGUAGE};
pub use self::source::{word_source, BundledWords, FileWords, WordSource};
