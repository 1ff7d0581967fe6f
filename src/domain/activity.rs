use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One audit-trail entry: who did what to which record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: i32,
    pub org_id: i32,
    /// Email of the user that performed the action.
    pub actor: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<i32>,
    pub detail: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewActivity {
    pub org_id: i32,
    pub actor: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<i32>,
    pub detail: Option<String>,
}

impl NewActivity {
    #[must_use]
    pub fn new(org_id: i32, actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            org_id,
            actor: actor.into(),
            action: action.into(),
            entity: None,
            entity_id: None,
            detail: None,
        }
    }

    pub fn entity(mut self, entity: impl Into<String>, entity_id: i32) -> Self {
        self.entity = Some(entity.into());
        self.entity_id = Some(entity_id);
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
