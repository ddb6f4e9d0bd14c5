// ==========================================
// 固废处置数据管道 - 表格修复器
// ==========================================
// 职责: 按每表配置修复抽取缺陷,产出规范化表格
// 流程: 找回表头 → 结构行清理 → 哨兵替换 → 列重排 → 行数校验
// 约束: 各步骤对已干净的输入幂等
// ==========================================

use crate::domain::{CellValue, MaterialRow, RawTable, RepairedTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::plans::{RepairRule, TablePlan, CANONICAL_YEARS, MISSING_SENTINEL};
use tracing::debug;

/// 分组标签行,整行删除 (对 "Metals" 先将其后 3 行并入组名)
const GROUP_LABELS: [&str; 2] = ["Metals", "Other Wastes"];

/// 小计/说明行的部分匹配标记
const PARTIAL_MARKERS: [&str; 2] = ["composted", "Total"];

/// "Metals" 分组标签覆盖的细类行数
const METALS_SPAN: usize = 3;

pub struct TableRepairer;

impl TableRepairer {
    /// 修复一张处置表
    ///
    /// # 参数
    /// - raw: 抽取协作方给出的原始表格
    /// - plan: 该表的已知缺陷配置
    ///
    /// # 返回
    /// - Ok(RepairedTable): 规范化表格,行数已校验
    /// - Err: 修复失败或行数不符
    pub fn repair(raw: RawTable, plan: &TablePlan) -> ImportResult<RepairedTable> {
        let mut header = raw.header;
        let mut rows = raw.rows;

        for rule in plan.rules {
            match rule {
                RepairRule::RecoverHeader => recover_header(&mut header, &mut rows),
                RepairRule::DropStructuralRows => drop_structural_rows(&mut rows),
                RepairRule::FillSentinels => fill_sentinels(&mut rows),
            }
        }

        let repaired = build_repaired(rows)?;
        debug!(
            disposal = %plan.disposal,
            rows = repaired.row_count(),
            "表格修复完成"
        );

        if repaired.row_count() != plan.expected_rows {
            return Err(ImportError::ShapeMismatch {
                disposal: plan.disposal.to_string(),
                expected: plan.expected_rows,
                actual: repaired.row_count(),
            });
        }
        Ok(repaired)
    }
}

// ==========================================
// 修复步骤
// ==========================================

/// 表头吞数据修复: 首个规范年份不在表头中,说明表头实为首条数据行
fn recover_header(header: &mut Vec<String>, rows: &mut Vec<Vec<String>>) {
    let first_year = CANONICAL_YEARS[0].to_string();
    if header.iter().any(|cell| cell.trim() == first_year) {
        return;
    }

    let generic: Vec<String> = (0..header.len()).map(|i| format!("column_{i}")).collect();
    let swallowed = std::mem::replace(header, generic);
    rows.insert(0, swallowed);
}

/// 结构行清理: 自上而下扫描,删除分组标签与小计行
///
/// - 标签与分组名完全一致 ("Metals" / "Other Wastes") 即结构行;
///   "Metals" 行另将其后 3 行改名为 "Metals - {细类}"
/// - 标签含部分匹配标记 ("composted" / "Total") 即结构行
/// - 标签含 "Inorganic" 但不含 "Inorganic Wastes" 为断行片段,
///   先并入下一行标签再删除本行
fn drop_structural_rows(rows: &mut Vec<Vec<String>>) {
    // 全空行为抽取噪声,直接丢弃
    rows.retain(|cells| !cells.iter().all(|c| c.trim().is_empty()));

    let mut keep = vec![true; rows.len()];
    for idx in 0..rows.len() {
        let label = row_label(&rows[idx]);

        if label == "Metals" {
            for offset in 1..=METALS_SPAN {
                if let Some(next) = rows.get_mut(idx + offset) {
                    let own = row_label(next);
                    set_row_label(next, format!("{label} - {own}"));
                }
            }
            keep[idx] = false;
        } else if GROUP_LABELS.contains(&label.as_str()) {
            keep[idx] = false;
        } else if is_split_label_fragment(&label) {
            if let Some(next) = rows.get_mut(idx + 1) {
                let tail = row_label(next);
                set_row_label(next, format!("{label} {tail}"));
            }
            keep[idx] = false;
        } else if PARTIAL_MARKERS.iter().any(|m| label.contains(m)) {
            keep[idx] = false;
        }
    }

    let mut it = keep.iter();
    rows.retain(|_| *it.next().unwrap_or(&true));
}

/// 断行片段: 物料标签被抽取拆成两行时的前半段
fn is_split_label_fragment(label: &str) -> bool {
    label.contains("Inorganic") && !label.contains("Inorganic Wastes")
}

/// 哨兵替换: "Neg." 为可忽略量,记 0;空白为无观测,记缺失哨兵
fn fill_sentinels(rows: &mut [Vec<String>]) {
    for cells in rows.iter_mut() {
        for cell in cells.iter_mut().skip(1) {
            let text = cell.trim();
            if text == "Neg." {
                *cell = "0".to_string();
            } else if text.is_empty() {
                *cell = MISSING_SENTINEL.to_string();
            }
        }
    }
}

/// 收尾: 列重排为 [Material] + 规范年份,行从 0 起连续编号
fn build_repaired(rows: Vec<Vec<String>>) -> ImportResult<RepairedTable> {
    let years = CANONICAL_YEARS.to_vec();
    let mut out = Vec::with_capacity(rows.len());

    for (r, cells) in rows.iter().enumerate() {
        let label = row_label(cells);
        let mut amounts = Vec::with_capacity(years.len());
        for i in 0..years.len() {
            let cell = cells
                .get(i + 1)
                .map(String::as_str)
                .unwrap_or(MISSING_SENTINEL);
            amounts.push(parse_cell(cell, r)?);
        }
        out.push(MaterialRow { label, amounts });
    }

    Ok(RepairedTable { years, rows: out })
}

// ==========================================
// 单元格工具 (合并器复用)
// ==========================================

/// 解析哨兵替换后的单元格: 缺失哨兵或千分位整数
pub(crate) fn parse_cell(raw: &str, row: usize) -> ImportResult<CellValue> {
    let text = raw.trim();
    if text == MISSING_SENTINEL {
        return Ok(CellValue::Missing);
    }
    text.replace(',', "")
        .parse::<i64>()
        .map(CellValue::Tons)
        .map_err(|_| ImportError::TypeConversionError {
            row,
            value: raw.to_string(),
        })
}

/// 数值单元格的哨兵替换 (单格版本)
pub(crate) fn normalize_value_cell(raw: &str) -> String {
    let text = raw.trim();
    if text == "Neg." {
        "0".to_string()
    } else if text.is_empty() {
        MISSING_SENTINEL.to_string()
    } else {
        text.to_string()
    }
}

fn row_label(cells: &[String]) -> String {
    cells.first().map(|c| c.trim().to_string()).unwrap_or_default()
}

fn set_row_label(cells: &mut [String], label: String) {
    if let Some(first) = cells.first_mut() {
        *first = label;
    }
}
