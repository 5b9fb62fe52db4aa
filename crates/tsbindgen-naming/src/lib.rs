//! The naming authority.
//!
//! One process-wide [`Renamer`] makes every naming decision in the
//! pipeline. Passes, planners, and the emitter look names up; nothing else
//! may invent a target-language identifier. The renamer's reservation maps
//! are the sole mutable state of the core.

pub mod scope;
pub use scope::{Scope, ScopeFactory, ScopeForm, Side};

pub mod reserved;
pub use reserved::{is_reserved_word, sanitize_identifier};

pub mod renamer;
pub use renamer::{Renamer, Reservation};

pub mod typemap;
pub use typemap::{PrimitiveLift, TypeMap};

pub mod printer;
pub use printer::TypePrinter;

pub mod context;
pub use context::BuildContext;

pub mod reserve;
pub use reserve::{
    member_base_scope, member_surface_scope, reserve_graph_names, reserve_member_names,
};
