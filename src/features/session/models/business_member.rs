use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership of an admin user in a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMember {
    pub user_id: Uuid,
    pub business_id: Uuid,
}
