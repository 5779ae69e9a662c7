use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// A paid validity window of a subscription.
///
/// There is no stored status column: whether a subscription is active is
/// always derived from its activation rows at query time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "subscription_activations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subscription_id: i64,
    pub activation_date: DateTime<Utc>,
    pub last_active_date: DateTime<Utc>,
}

impl Model {
    /// The window still covers `now` (the last active instant is inclusive).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.last_active_date >= now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscriptions::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscriptions::Column::Id"
    )]
    Subscription,
}

impl Related<super::subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn window(last_active_date: DateTime<Utc>) -> Model {
        Model {
            id: 1,
            subscription_id: 1,
            activation_date: last_active_date - Duration::days(30),
            last_active_date,
        }
    }

    #[test]
    fn test_is_active_at() {
        let now = Utc::now();
        assert!(window(now + Duration::days(3)).is_active_at(now));
        assert!(window(now).is_active_at(now));
        assert!(!window(now - Duration::seconds(1)).is_active_at(now));
    }
}
