pub mod jwt;
pub mod proration;

pub use jwt::*;
pub use proration::{days_remaining, price_difference, prorated_upgrade_price};
