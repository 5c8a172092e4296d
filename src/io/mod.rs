pub mod reader;
pub mod walker;
pub mod writer;

pub use reader::{read_text_lossy, ReadOutcome};
pub use walker::FileWalker;
pub use writer::write_text_atomic;
