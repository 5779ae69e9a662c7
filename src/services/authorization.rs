use crate::database::BillingStore;
use crate::error::{AppError, AppResult};

pub const ADMIN_ONLY: &str = "Only admin allowed to access";

/// Actions that need more than an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManagePlans,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ManagePlans => write!(f, "manage_plans"),
        }
    }
}

/// Fails with `Forbidden` unless `caller_id` holds `capability`.
///
/// Unknown users are treated like users without the capability.
pub async fn authorize(
    store: &dyn BillingStore,
    caller_id: i64,
    capability: Capability,
) -> AppResult<()> {
    let user = store.find_user_by_id(caller_id).await?;
    let granted = match capability {
        Capability::ManagePlans => user.is_some_and(|u| u.is_admin),
    };

    if !granted {
        log::warn!("User {caller_id} denied capability {capability}");
        return Err(AppError::forbidden(ADMIN_ONLY));
    }
    Ok(())
}
