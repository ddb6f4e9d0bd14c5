// ==========================================
// 固废处置数据管道 - 关系行生成器
// ==========================================
// 职责: 将修复后的表格展开为规范化事实记录
// 映射: 行位置 + 每表基准 → material_id;表身份 → disposal_id;
//       食物其他去向表逐行对应处置方式 5..=10
// 约束: 无观测单元格生成 NULL 记录,绝不丢行
// ==========================================

use crate::domain::{
    CellValue, DisposalMethod, MaterialCategory, RepairedTable, WasteRecord,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::plans::{MergePlan, TablePlan};

/// 食物其他去向表中唯一涉及的物料
const WASTED_FOOD_MATERIAL: &str = "Food";

pub struct RelationLoader;

impl RelationLoader {
    /// 展开一张处置表: 每行 × 每年份生成一条记录
    pub fn load_disposal_table(
        table: &RepairedTable,
        plan: &TablePlan,
    ) -> Vec<WasteRecord> {
        let disposal_id = plan.disposal.id();
        let mut records = Vec::with_capacity(table.row_count() * table.years.len());

        for (r, row) in table.rows.iter().enumerate() {
            let material_id = plan.material_id_base + r as i64;
            for (i, year) in table.years.iter().enumerate() {
                let tons = row
                    .amounts
                    .get(i)
                    .copied()
                    .unwrap_or(CellValue::Missing)
                    .as_tons();
                records.push(WasteRecord {
                    material_id,
                    disposal_id,
                    year: *year,
                    tons,
                });
            }
        }
        records
    }

    /// 展开食物其他去向表: 行位置对应处置方式 5..=10,
    /// 物料固定为 Food,年份固定为表配置年份
    pub fn load_wasted_food_table(
        table: &RepairedTable,
        plan: &MergePlan,
        categories: &[MaterialCategory],
    ) -> ImportResult<Vec<WasteRecord>> {
        let food = categories
            .iter()
            .find(|c| c.label == WASTED_FOOD_MATERIAL)
            .ok_or_else(|| ImportError::MissingCategory {
                label: WASTED_FOOD_MATERIAL.to_string(),
            })?;

        let first_disposal_id = DisposalMethod::AnimalFeed.id();
        Ok(table
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| WasteRecord {
                material_id: food.id,
                disposal_id: first_disposal_id + r as i64,
                year: plan.year,
                tons: row
                    .amounts
                    .first()
                    .copied()
                    .unwrap_or(CellValue::Missing)
                    .as_tons(),
            })
            .collect())
    }
}
