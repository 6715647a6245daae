//! Benchmarks for the CLUT crates.
//!
//! Run with: `cargo bench -p clut-bench`
