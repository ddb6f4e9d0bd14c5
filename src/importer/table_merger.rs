// ==========================================
// 固废处置数据管道 - 拆分表合并器
// ==========================================
// 职责: 将被抽取拆成两张表的单一逻辑表 (标签列/数值列) 合并
// 约束: 两侧按行位置对齐,标签文本在修复后不可靠,
//       位置对齐才是权威;末行为小计,合并后丢弃
// ==========================================

use crate::domain::{MaterialRow, RawTable, RepairedTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::plans::MergePlan;
use crate::importer::table_repairer::{normalize_value_cell, parse_cell};
use tracing::debug;

pub struct TableMerger;

impl TableMerger {
    /// 合并标签表与数值表
    ///
    /// # 参数
    /// - labels: 只含标签列的表
    /// - values: 只含单一年份数值列的表
    /// - plan: 合并配置 (锚点子串/年份/期望行数)
    ///
    /// # 返回
    /// - Ok(RepairedTable): 列为 [Material, year] 的规范化表格
    /// - Err: 两侧无法对齐或行数不符
    pub fn merge(
        labels: RawTable,
        values: RawTable,
        plan: &MergePlan,
    ) -> ImportResult<RepairedTable> {
        let label_rows = recover_label_side(labels, plan.anchor);
        let value_rows = recover_value_side(values, plan.year);

        let label_rows = join_fragments(label_rows, plan.anchor)?;

        // 两侧行位置必须严格一致,行数不符即中止,绝不静默截断
        if label_rows.len() != value_rows.len() {
            return Err(ImportError::MergeMisaligned {
                labels: label_rows.len(),
                values: value_rows.len(),
            });
        }

        let mut joined: Vec<(String, String)> =
            label_rows.into_iter().zip(value_rows).collect();
        // 末行为计算小计,不是观测数据
        joined.pop();

        let mut rows = Vec::with_capacity(joined.len());
        for (r, (label, value)) in joined.into_iter().enumerate() {
            let amount = parse_cell(&normalize_value_cell(&value), r)?;
            rows.push(MaterialRow {
                label,
                amounts: vec![amount],
            });
        }

        let merged = RepairedTable {
            years: vec![plan.year],
            rows,
        };
        debug!(rows = merged.row_count(), "拆分表合并完成");

        if merged.row_count() != plan.expected_rows {
            return Err(ImportError::ShapeMismatch {
                disposal: "wasted food pathways".to_string(),
                expected: plan.expected_rows,
                actual: merged.row_count(),
            });
        }
        Ok(merged)
    }
}

// ==========================================
// 两侧的表头找回
// ==========================================

/// 标签侧: 表头含锚点子串即为被吞的数据行
fn recover_label_side(table: RawTable, anchor: &str) -> Vec<String> {
    let mut rows: Vec<String> = Vec::with_capacity(table.rows.len() + 1);

    let header = first_cell(&table.header);
    if header.contains(anchor) {
        rows.push(header);
    }
    rows.extend(table.rows.iter().map(|cells| first_cell(cells)));
    rows
}

/// 数值侧: 表头与年份标签不符即为被吞的数据行
fn recover_value_side(table: RawTable, year: i32) -> Vec<String> {
    let mut rows: Vec<String> = Vec::with_capacity(table.rows.len() + 1);

    let header = first_cell(&table.header);
    if header != year.to_string() {
        rows.push(header);
    }
    rows.extend(table.rows.iter().map(|cells| first_cell(cells)));
    rows
}

/// 续行片段归并: 不含锚点子串的标签行并回上一行
fn join_fragments(rows: Vec<String>, anchor: &str) -> ImportResult<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(rows.len());
    for (idx, label) in rows.into_iter().enumerate() {
        if label.contains(anchor) {
            out.push(label);
        } else {
            let prev = out.last_mut().ok_or_else(|| ImportError::OrphanFragment {
                row: idx,
                label: label.clone(),
            })?;
            prev.push(' ');
            prev.push_str(&label);
        }
    }
    Ok(out)
}

fn first_cell(cells: &[String]) -> String {
    cells.first().map(|c| c.trim().to_string()).unwrap_or_default()
}
