//! Region directory - enumerates the subregions driving region mode

use super::runner::QueryRunner;
use crate::error::AggregateResult;
use crate::query::Identifier;
use crate::region::RegionId;

/// List every subregion identifier in the lookup table, ascending
pub async fn list_region_ids<R: QueryRunner + ?Sized>(
    runner: &mut R,
    subregions: &Identifier,
) -> AggregateResult<Vec<RegionId>> {
    let sql = format!(
        "SELECT DISTINCT reg_id FROM {} WHERE reg_id IS NOT NULL ORDER BY reg_id",
        subregions
    );
    let rows = runner.run(&sql, &[]).await?.into_rows();

    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(cell) = row.first() {
            ids.push(RegionId(cell.as_integer()?));
        }
    }

    log::info!("📍 Found {} subregions in {}", ids.len(), subregions);
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRunner;
    use rusqlite::Connection;

    #[tokio::test]
    async fn test_lists_distinct_ids_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE hcr_subregions (xyind INTEGER, mun INTEGER, area INTEGER, dist INTEGER, reg_id BIGINT);
             INSERT INTO hcr_subregions VALUES (1, 91, 1, 10, 300), (2, 91, 1, 10, 100), (3, 91, 2, 20, 300), (4, 49, 3, 30, NULL);",
        )
        .unwrap();
        let mut runner = SqliteRunner::from_connection(conn);

        let ids = list_region_ids(&mut runner, &Identifier::new("hcr_subregions").unwrap())
            .await
            .unwrap();
        assert_eq!(ids, vec![RegionId(100), RegionId(300)]);
    }
}
