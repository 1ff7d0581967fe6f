use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn pool_applies_sqlite_pragmas() {
    let test_db = common::TestDb::new("pragmas.db");
    let mut conn = test_db.pool().get().expect("get connection");

    // Foreign keys are off by default in SQLite; the pool must turn them on
    // for every acquired connection.
    let row: PragmaRow = sql_query("PRAGMA foreign_keys")
        .get_result(&mut conn)
        .expect("read pragma");
    assert_eq!(row.foreign_keys, 1);
}
