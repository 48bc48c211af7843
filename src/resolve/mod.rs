//! The rendering core: value normalization, preview derivation, and slot
//! resolution
//!
//! Resolution operates on a cloned template instance, never on the parsed
//! document itself, so one record's failures cannot leak into the next.

mod normalize;
mod preview;
mod slots;

pub use normalize::{normalize, Resolved, ResolveContext, ResolveError};
pub use preview::derive_preview;
pub use slots::resolve_slots;
