// Operations that move data around without computing on it.
pub mod concat;
pub mod identity;
pub mod split;

pub use concat::{concat_op, Concat};
pub use identity::{identity_op, Identity};
pub use split::{split_op, Split};
