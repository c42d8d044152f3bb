//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Introspect)]` | on struct/enum | Register members, call operators, rebind rule |

mod introspect;

pub use introspect::expand_derive_introspect;
