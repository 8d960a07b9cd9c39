pub mod exp;
pub mod log;

pub use exp::{exp_op, Exp};
pub use log::{log_op, Log};
