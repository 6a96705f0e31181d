use serde::{Deserialize, Serialize};

/// Position an employee held while doing an activity, e.g. "team lead".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
}
