pub mod params;
pub mod prog;
pub mod xpr;

pub use params::*;
pub use prog::*;
pub use xpr::*;
