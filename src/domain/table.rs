// ==========================================
// 固废处置数据管道 - 表格实体
// ==========================================
// RawTable: 抽取协作方给出的原始网格,表头可能误吞首条数据行
// RepairedTable: 修复后的表,首列为规范顺序的物料标签,
//                其余列为数值或显式缺失哨兵
// ==========================================

use crate::domain::types::CellValue;
use serde::{Deserialize, Serialize};

// ==========================================
// 原始表格 (Raw Table)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// 声明的列标签,抽取缺陷下可能实为首条数据行
    pub header: Vec<String>,
    /// 数据行,每行为一串单元格文本
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }
}

// ==========================================
// 修复后的表格 (Repaired Table)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairedTable {
    /// 数值列对应的年份,与每行 amounts 一一对应
    pub years: Vec<i32>,
    pub rows: Vec<MaterialRow>,
}

/// 修复后的一行: 物料标签 + 各年份数值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub label: String,
    pub amounts: Vec<CellValue>,
}

impl RepairedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 首列标签,顺序即表内行序
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_preserve_row_order() {
        let table = RepairedTable {
            years: vec![2017, 2018],
            rows: vec![
                MaterialRow {
                    label: "Food".to_string(),
                    amounts: vec![CellValue::Tons(100), CellValue::Tons(90)],
                },
                MaterialRow {
                    label: "Yard Trimmings".to_string(),
                    amounts: vec![CellValue::Tons(0), CellValue::Missing],
                },
            ],
        };
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.labels(), vec!["Food", "Yard Trimmings"]);
    }
}
