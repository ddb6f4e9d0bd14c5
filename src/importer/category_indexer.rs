// ==========================================
// 固废处置数据管道 - 物料分类索引器
// ==========================================
// 职责: 从一张修复完成的全量表派生 13 条物料分类
// 约束: 各处置表共享同一行序,任意一张 13 行表均可作来源;
//       分类建立后不再变更,作为 material 维表的种子数据
// ==========================================

use crate::domain::{MaterialCategory, RepairedTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::plans::{MATERIAL_COUNT, NON_PRODUCT_COUNT};

/// 规范顺序中的金属细类行 (0 起) ,大类归并为 "Metals"
const METALS_POSITIONS: std::ops::RangeInclusive<usize> = 2..=4;

pub struct CategoryIndexer;

impl CategoryIndexer {
    /// 派生物料分类
    ///
    /// # 参数
    /// - table: 修复完成的 13 行表 (行序即规范顺序)
    ///
    /// # 返回
    /// - Ok(Vec<MaterialCategory>): 13 条分类,id 为行位置 + 1
    /// - Err: 行数不是 13
    pub fn index(table: &RepairedTable) -> ImportResult<Vec<MaterialCategory>> {
        if table.row_count() != MATERIAL_COUNT {
            return Err(ImportError::CategoryCountMismatch {
                expected: MATERIAL_COUNT,
                actual: table.row_count(),
            });
        }

        Ok(table
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| {
                let label = normalize_label(&row.label);
                let group = if METALS_POSITIONS.contains(&pos) {
                    "Metals".to_string()
                } else {
                    label.clone()
                };
                MaterialCategory {
                    id: pos as i64 + 1,
                    label,
                    is_product: pos < MATERIAL_COUNT - NON_PRODUCT_COUNT,
                    group,
                }
            })
            .collect())
    }
}

/// 去除脚注星号后缀 ("Other **" 还原为 "Other")
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['*', ' '])
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellValue, MaterialRow};

    fn table_from_labels(labels: &[&str]) -> RepairedTable {
        RepairedTable {
            years: vec![2018],
            rows: labels
                .iter()
                .map(|l| MaterialRow {
                    label: l.to_string(),
                    amounts: vec![CellValue::Missing],
                })
                .collect(),
        }
    }

    fn canonical_labels() -> Vec<&'static str> {
        vec![
            "Paper and Paperboard",
            "Glass",
            "Metals - Ferrous",
            "Metals - Aluminum",
            "Metals - Other Nonferrous",
            "Plastics",
            "Rubber and Leather",
            "Textiles",
            "Wood",
            "Other **",
            "Food",
            "Yard Trimmings",
            "Miscellaneous Inorganic Wastes",
        ]
    }

    #[test]
    fn test_index_classifies_products_and_groups() {
        let categories =
            CategoryIndexer::index(&table_from_labels(&canonical_labels())).unwrap();

        assert_eq!(categories.len(), 13);
        // id 为规范顺序中的位置
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[12].id, 13);

        // 尾部 3 类非产品
        assert!(categories[9].is_product);
        assert!(!categories[10].is_product);
        assert!(!categories[11].is_product);
        assert!(!categories[12].is_product);

        // 金属细类归并到 Metals 大类,其余大类与细类同名
        assert_eq!(categories[2].group, "Metals");
        assert_eq!(categories[3].group, "Metals");
        assert_eq!(categories[4].group, "Metals");
        assert_eq!(categories[2].label, "Metals - Ferrous");
        assert_eq!(categories[1].group, "Glass");
        assert_eq!(categories[10].group, "Food");
    }

    #[test]
    fn test_asterisk_footnote_marker_normalized() {
        let categories =
            CategoryIndexer::index(&table_from_labels(&canonical_labels())).unwrap();
        assert_eq!(categories[9].label, "Other");
        assert_eq!(categories[9].group, "Other");
    }

    #[test]
    fn test_wrong_label_count_is_an_error() {
        let result = CategoryIndexer::index(&table_from_labels(&["Food", "Glass"]));
        assert!(matches!(
            result,
            Err(ImportError::CategoryCountMismatch {
                expected: 13,
                actual: 2
            })
        ));
    }
}
