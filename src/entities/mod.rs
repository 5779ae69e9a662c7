pub mod plans;
pub mod subscription_activations;
pub mod subscriptions;
pub mod teams;
pub mod users;

pub use plans as plan_entity;
pub use subscription_activations as activation_entity;
pub use subscriptions as subscription_entity;
pub use subscriptions::SubscriptionType;
pub use teams as team_entity;
pub use users as user_entity;
