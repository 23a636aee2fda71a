//! A Rust-native WebAssembly module construction library: build a `Module` data model
//! covering the core spec plus the garbage collection, threads, and tail-call proposals,
//! then serialize it to the binary or text (WAT) format.

pub mod binary;
pub mod leb128;
pub mod model;
pub mod text;

pub use model::*;
