// ==========================================
// 固废处置数据管道 - 目标库 DDL
// ==========================================
// 三张关系: disposal (处置方式维表) / material (物料维表) /
//           waste (事实表, 物料 × 处置方式 × 年份)
// ==========================================

use crate::repository::error::RepositoryResult;
use rusqlite::Connection;

/// 建表语句,建库时一次性执行
const CREATE_TABLES: &str = r#"
CREATE TABLE disposal (
    id INTEGER PRIMARY KEY,
    disposal_type TEXT NOT NULL
);

CREATE TABLE material (
    id INTEGER PRIMARY KEY,
    product INTEGER NOT NULL,
    material_type TEXT NOT NULL,
    material_subtype TEXT NOT NULL
);

CREATE TABLE waste (
    id INTEGER PRIMARY KEY,
    material_id INTEGER NOT NULL REFERENCES material(id),
    disposal_id INTEGER NOT NULL REFERENCES disposal(id),
    year INTEGER NOT NULL,
    waste_in_tons INTEGER,
    UNIQUE (material_id, disposal_id, year)
);
"#;

/// 创建全部关系 (在调用方事务内执行)
pub fn create_all(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_all_builds_three_relations() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('disposal', 'material', 'waste')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_waste_rejects_duplicate_triples() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        conn.execute("INSERT INTO disposal (disposal_type) VALUES ('landfill')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO material (product, material_type, material_subtype) \
             VALUES (1, 'Glass', 'Glass')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO waste (material_id, disposal_id, year, waste_in_tons) \
             VALUES (1, 1, 2018, 100)",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO waste (material_id, disposal_id, year, waste_in_tons) \
             VALUES (1, 1, 2018, 200)",
            [],
        );
        assert!(duplicate.is_err());
    }
}
