use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::session::models::BusinessMember;
use crate::modules::store::{Collection, Query, RemoteStore};
use crate::shared::constants::FIELD_USER_ID;

/// Resolves the owning business of this admin session, once, at startup
pub struct SessionService {
    store: Arc<dyn RemoteStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn resolve_business_id(&self, config: &SessionConfig) -> Result<Uuid> {
        let user_id = match config {
            SessionConfig::Business(id) => return Ok(*id),
            SessionConfig::Member(user_id) => *user_id,
        };

        let query = Query::new().eq(FIELD_USER_ID, user_id.to_string());
        let rows = self
            .store
            .select_all(Collection::BusinessMembers, &query)
            .await
            .map_err(|e| {
                AppError::Precondition(format!("Failed to resolve business for session: {}", e))
            })?;

        let member: BusinessMember = rows
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::Precondition(format!("User '{}' is not a member of any business", user_id))
            })
            .and_then(|row| {
                serde_json::from_value(row).map_err(|e| {
                    AppError::Precondition(format!("Invalid membership record: {}", e))
                })
            })?;

        tracing::info!(
            "Resolved business {} from membership of user {}",
            member.business_id,
            user_id
        );
        Ok(member.business_id)
    }
}
