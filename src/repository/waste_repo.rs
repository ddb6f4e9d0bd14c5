// ==========================================
// 固废处置数据管道 - 目标库仓储
// ==========================================
// 职责: 建表、种子数据与事实数据的事务化载入,行数查询,导出入口
// 红线: 不含修复/映射逻辑;所有插入参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{DisposalMethod, MaterialCategory, WasteRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{export, schema};
use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};

/// 三张关系的实际行数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationCounts {
    pub disposal: i64,
    pub material: i64,
    pub waste: i64,
}

// ==========================================
// WasteRepository
// ==========================================
pub struct WasteRepository {
    conn: Connection,
}

impl WasteRepository {
    /// 打开目标数据库 (文件不存在时创建)
    pub fn create(db_path: &Path) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// 单事务完成建表、维表种子与事实数据载入
    ///
    /// 全部成功才提交;任何一步失败整体回滚,不留部分数据。
    pub fn load_all(
        &mut self,
        categories: &[MaterialCategory],
        records: &[WasteRecord],
    ) -> RepositoryResult<RelationCounts> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        schema::create_all(&tx)?;
        Self::seed_disposal_tx(&tx)?;
        Self::seed_material_tx(&tx, categories)?;
        Self::insert_waste_tx(&tx, records)?;
        let counts = Self::relation_counts_tx(&tx)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(counts)
    }

    /// 三张关系的平面导出 (提交成功后调用)
    pub fn export_csv(&self, export_dir: &Path) -> RepositoryResult<Vec<PathBuf>> {
        export::export_all(&self.conn, export_dir)
    }

    // ==========================================
    // 事务内插入
    // ==========================================

    /// 在事务中写入处置方式维表,插入顺序即主键 1..=10
    fn seed_disposal_tx(tx: &Transaction) -> RepositoryResult<()> {
        let mut stmt =
            tx.prepare("INSERT INTO disposal (disposal_type) VALUES (?1)")?;
        for method in DisposalMethod::ALL {
            stmt.execute(params![method.label()])?;
        }
        Ok(())
    }

    /// 在事务中写入物料维表,插入顺序即主键 1..=13
    fn seed_material_tx(
        tx: &Transaction,
        categories: &[MaterialCategory],
    ) -> RepositoryResult<()> {
        let mut stmt = tx.prepare(
            "INSERT INTO material (product, material_type, material_subtype) \
             VALUES (?1, ?2, ?3)",
        )?;
        for category in categories {
            stmt.execute(params![
                category.is_product,
                category.group,
                category.label
            ])?;
        }
        Ok(())
    }

    /// 在事务中批量写入事实记录,无观测写入 NULL
    fn insert_waste_tx(tx: &Transaction, records: &[WasteRecord]) -> RepositoryResult<()> {
        let mut stmt = tx.prepare(
            "INSERT INTO waste (material_id, disposal_id, year, waste_in_tons) \
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for record in records {
            stmt.execute(params![
                record.material_id,
                record.disposal_id,
                record.year,
                record.tons
            ])?;
        }
        Ok(())
    }

    fn relation_counts_tx(tx: &Transaction) -> RepositoryResult<RelationCounts> {
        let count = |table: &str| -> RepositoryResult<i64> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            Ok(tx.query_row(&sql, [], |row| row.get(0))?)
        };
        Ok(RelationCounts {
            disposal: count("disposal")?,
            material: count("material")?,
            waste: count("waste")?,
        })
    }
}
