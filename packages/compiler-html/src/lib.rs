//! Static HTML output for rendered bio pages.
//!
//! Takes the render tree produced by `portyo-renderer` and writes a
//! standalone document: page background and header from the bio's design
//! fields, the block nodes in order, and only the `@keyframes` the blocks
//! actually reference.

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{compile_fragment, compile_to_html, escape_html, CompileError, CompileOptions};
