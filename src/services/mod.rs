pub mod authorization;
pub mod plan_service;
pub mod upgrade_service;

pub use authorization::*;
pub use plan_service::*;
pub use upgrade_service::*;
