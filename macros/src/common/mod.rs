// Common utilities shared between internal and user-facing macros
//
// - parse_utils: capability table, generator input, ident helpers

mod parse_utils;

pub use parse_utils::*;
