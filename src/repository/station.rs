//! Repository implementation for network stations.

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::station::{NewStation, Station, UpdateStation};
use crate::models::station::{
    NewStation as DbNewStation, Station as DbStation, UpdateStation as DbUpdateStation,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, StationListQuery, StationReader, StationSortBy, StationWriter,
};

impl StationReader for DieselRepository {
    fn get_station_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Station>> {
        use crate::schema::stations;

        let mut conn = self.conn()?;
        let station = stations::table
            .filter(stations::id.eq(id))
            .filter(stations::org_id.eq(org_id))
            .first::<DbStation>(&mut conn)
            .optional()?;

        match station {
            Some(station) => Ok(Some(
                Station::try_from(station).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_stations(&self, query: StationListQuery) -> RepositoryResult<(usize, Vec<Station>)> {
        use crate::schema::stations;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = stations::table
                .filter(stations::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(stations::status.eq(status.to_string()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    stations::name
                        .like(pattern.clone())
                        .nullable()
                        .or(stations::location.like(pattern.clone()))
                        .or(stations::ip_address.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((StationSortBy::Name, SortDirection::Ascending));
        let mut items = match (by, dir) {
            (StationSortBy::Name, SortDirection::Ascending) => build().order(stations::name.asc()),
            (StationSortBy::Name, SortDirection::Descending) => {
                build().order(stations::name.desc())
            }
            (StationSortBy::Status, SortDirection::Ascending) => {
                build().order(stations::status.asc())
            }
            (StationSortBy::Status, SortDirection::Descending) => {
                build().order(stations::status.desc())
            }
            (StationSortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(stations::created_at.asc())
            }
            (StationSortBy::CreatedAt, SortDirection::Descending) => {
                build().order(stations::created_at.desc())
            }
        }
        .then_order_by(stations::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let stations = items
            .load::<DbStation>(&mut conn)?
            .into_iter()
            .map(|s| Station::try_from(s).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, stations))
    }
}

impl StationWriter for DieselRepository {
    fn create_station(&self, new_station: &NewStation) -> RepositoryResult<Station> {
        use crate::schema::stations;

        let mut conn = self.conn()?;
        let db_new: DbNewStation = new_station.into();

        let created = diesel::insert_into(stations::table)
            .values(&db_new)
            .get_result::<DbStation>(&mut conn)?;

        Station::try_from(created).map_err(RepositoryError::from)
    }

    fn update_station(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdateStation,
    ) -> RepositoryResult<Station> {
        use crate::schema::stations;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateStation = updates.into();

        let updated = diesel::update(
            stations::table
                .filter(stations::id.eq(id))
                .filter(stations::org_id.eq(org_id)),
        )
        .set(&db_updates)
        .get_result::<DbStation>(&mut conn)?;

        Station::try_from(updated).map_err(RepositoryError::from)
    }
}
