//! Word-level Huffman coding.
//!
//! Text is split into words and punctuation symbols, a Huffman tree is
//! built from their counts, and each block of text is encoded as a
//! string of `'0'`/`'1'` characters.

pub mod config;
pub mod corpus;
pub mod error;
pub mod huffman;
pub mod render;
pub mod serialize;
pub mod stream;
pub mod tokenizer;

pub use error::{Error, RenderError, Result};
