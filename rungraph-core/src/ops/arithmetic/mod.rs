// Element-wise arithmetic on tensors of identical shape, plus the variants
// taking a constant operand.
pub mod add;
pub mod constant;
pub mod div;
pub mod mul;
pub mod neg;
pub mod sub;

pub use add::{add_op, Add};
pub use constant::{add_constant_op, mul_constant_op, pow_constant_op, AddConstant, MulConstant, PowConstant};
pub use div::{div_op, Div};
pub use mul::{mul_op, Mul};
pub use neg::{neg_op, Neg};
pub use sub::{sub_op, Sub};
