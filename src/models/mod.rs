pub mod common;
pub mod plan;
pub mod upgrade;

pub use common::*;
pub use plan::*;
pub use upgrade::*;
