pub mod error;
pub mod naming;
pub mod validate;
pub mod visitor;

pub use error::*;
pub use naming::*;
pub use validate::*;
pub use visitor::*;
