//! Phantom engine layer (workspace facade crate).
//!
//! Re-exports the member crates under one roof so hosts can depend on a
//! single package: `phantom::{core, input, audio, term, types}`.

pub use phantom_audio as audio;
pub use phantom_core as core;
pub use phantom_input as input;
pub use phantom_term as term;
pub use phantom_types as types;
