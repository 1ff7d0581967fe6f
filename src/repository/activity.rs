//! Repository implementation for the activity log.

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::activity::{Activity, NewActivity};
use crate::models::activity::{Activity as DbActivity, NewActivity as DbNewActivity};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivitySortBy, ActivityWriter, DieselRepository,
};

impl ActivityReader for DieselRepository {
    fn list_activity(&self, query: ActivityListQuery) -> RepositoryResult<(usize, Vec<Activity>)> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = activities::table
                .filter(activities::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(action) = &query.action {
                items = items.filter(activities::action.eq(action.clone()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    activities::actor
                        .like(pattern.clone())
                        .or(activities::action.like(pattern.clone()))
                        .nullable()
                        .or(activities::detail.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((ActivitySortBy::CreatedAt, SortDirection::Descending));
        let mut items = match (by, dir) {
            (ActivitySortBy::Actor, SortDirection::Ascending) => {
                build().order(activities::actor.asc())
            }
            (ActivitySortBy::Actor, SortDirection::Descending) => {
                build().order(activities::actor.desc())
            }
            (ActivitySortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(activities::created_at.asc())
            }
            (ActivitySortBy::CreatedAt, SortDirection::Descending) => {
                build().order(activities::created_at.desc())
            }
        }
        .then_order_by(activities::id.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let entries = items
            .load::<DbActivity>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, entries))
    }

    fn recent_activity(&self, org_id: i32, limit: usize) -> RepositoryResult<Vec<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let entries = activities::table
            .filter(activities::org_id.eq(org_id))
            .order(activities::created_at.desc())
            .then_order_by(activities::id.desc())
            .limit(limit as i64)
            .load::<DbActivity>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(entries)
    }
}

impl ActivityWriter for DieselRepository {
    fn log_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_new: DbNewActivity = activity.into();

        let created = diesel::insert_into(activities::table)
            .values(&db_new)
            .get_result::<DbActivity>(&mut conn)?;

        Ok(created.into())
    }
}
