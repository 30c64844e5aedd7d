pub mod bigcomplex;
pub mod bigfloat;
pub mod complex;
pub mod extcomplex;
pub mod floatexp;
pub mod precision;
pub mod tier;

pub use bigcomplex::BigComplex;
pub use bigfloat::BigFloat;
pub use complex::Complex;
pub use extcomplex::ExtComplex;
pub use floatexp::FloatExp;
pub use precision::working_precision_bits;
pub use tier::{ComplexTier, PrecisionMismatch, RealScalar};
