use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::activities)]
/// Diesel model for [`crate::domain::activity::Activity`].
pub struct Activity {
    pub id: i32,
    pub org_id: i32,
    pub actor: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<i32>,
    pub detail: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity<'a> {
    pub org_id: i32,
    pub actor: &'a str,
    pub action: &'a str,
    pub entity: Option<&'a str>,
    pub entity_id: Option<i32>,
    pub detail: Option<&'a str>,
}

impl From<Activity> for DomainActivity {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            org_id: activity.org_id,
            actor: activity.actor,
            action: activity.action,
            entity: activity.entity,
            entity_id: activity.entity_id,
            detail: activity.detail,
            created_at: activity.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity<'a> {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            org_id: activity.org_id,
            actor: activity.actor.as_str(),
            action: activity.action.as_str(),
            entity: activity.entity.as_deref(),
            entity_id: activity.entity_id,
            detail: activity.detail.as_deref(),
        }
    }
}
