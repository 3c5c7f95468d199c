pub mod impute;
pub mod input;
pub mod scaler;

pub use impute::*;
pub use input::*;
pub use scaler::*;
