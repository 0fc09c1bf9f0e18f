//! Gridfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `gridfall::{core,engine,input,term,types}`; the implementation lives in
//! dedicated crates under `crates/`.

pub use gridfall_core as core;
pub use gridfall_engine as engine;
pub use gridfall_input as input;
pub use gridfall_term as term;
pub use gridfall_types as types;
