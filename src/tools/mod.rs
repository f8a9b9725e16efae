pub mod read_docs;

pub use read_docs::*;
