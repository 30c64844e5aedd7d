pub mod dense;
pub mod error;
pub mod mandelbrot;
pub mod newton;
pub mod refine;

pub use dense::DensePoly;
pub use error::EvalError;
pub use mandelbrot::MandelbrotPoly;
pub use newton::{analyze, Convergence, Evaluation, NewtonPoly};
pub use refine::{refine, RefineConfig, RootEstimate, RootStatus};
