pub mod plan;

pub use plan::plan_config;
