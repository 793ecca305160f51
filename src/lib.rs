//! Purpose: Library crate behind the `wsldb` CLI: decode WSL flat-file
//! databases into an in-memory, read-only snapshot.
//! Exports: `api` (stable surface), `core` (lexers, decoder, schema, errors).
//! Role: One-shot decoder; not a database engine and not a schema validator.
//! Invariants: Decoding is fail-fast; no partial database is ever returned.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
