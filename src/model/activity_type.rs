use serde::{Deserialize, Serialize};

/// Category of an activity, e.g. "regular work" or "overtime".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityType {
    pub id: i64,
    pub name: String,
}
