// ==========================================
// 固废处置数据管道 - 关系平面导出
// ==========================================
// 职责: 三张关系各导出一份 CSV,表头在首行,每记录一行
// 约束: 仅在载入提交成功后调用;NULL 导出为空字段
// ==========================================

use crate::repository::error::RepositoryResult;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 导出全部关系,返回生成的文件路径
pub fn export_all(conn: &Connection, export_dir: &Path) -> RepositoryResult<Vec<PathBuf>> {
    fs::create_dir_all(export_dir)?;

    let paths = vec![
        export_disposal(conn, &export_dir.join("disposal_table.csv"))?,
        export_material(conn, &export_dir.join("material_table.csv"))?,
        export_waste(conn, &export_dir.join("waste_table.csv"))?,
    ];

    info!(files = paths.len(), dir = %export_dir.display(), "CSV 导出完成");
    Ok(paths)
}

fn export_disposal(conn: &Connection, path: &Path) -> RepositoryResult<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "disposal_type"])?;

    let mut stmt = conn.prepare("SELECT id, disposal_type FROM disposal ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;
    for row in rows {
        let (id, disposal_type) = row?;
        writer.write_record([id.to_string(), disposal_type])?;
    }

    writer.flush()?;
    Ok(path.to_path_buf())
}

fn export_material(conn: &Connection, path: &Path) -> RepositoryResult<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "product", "material_type", "material_subtype"])?;

    let mut stmt = conn.prepare(
        "SELECT id, product, material_type, material_subtype FROM material ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;
    for row in rows {
        let (id, product, material_type, material_subtype) = row?;
        writer.write_record([
            id.to_string(),
            product.to_string(),
            material_type,
            material_subtype,
        ])?;
    }

    writer.flush()?;
    Ok(path.to_path_buf())
}

fn export_waste(conn: &Connection, path: &Path) -> RepositoryResult<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "material_id", "disposal_id", "year", "waste_in_tons"])?;

    let mut stmt = conn.prepare(
        "SELECT id, material_id, disposal_id, year, waste_in_tons FROM waste ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, Option<i64>>(4)?,
        ))
    })?;
    for row in rows {
        let (id, material_id, disposal_id, year, tons) = row?;
        writer.write_record([
            id.to_string(),
            material_id.to_string(),
            disposal_id.to_string(),
            year.to_string(),
            // 无观测导出为空字段,不是 0
            tons.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(path.to_path_buf())
}
