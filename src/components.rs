//! Reusable HTML components for page generation
//!
//! Maud component functions shared across page types (index, blob,
//! directory, commits, tags). Every component that emits links takes the
//! page's root href so output stays relative and servable from any prefix.

pub mod file_list;
pub mod icons;
pub mod layout;
pub mod nav;
pub mod refs;
