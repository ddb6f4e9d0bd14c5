// ==========================================
// 固废处置数据管道 - 原始表格来源
// ==========================================
// 职责: 消费 PDF 表格抽取协作方 (tabula) 的 JSON 导出
// 约定: 每张表的首行提升为表头,与协作方一致;
//       表头吞掉数据行的缺陷即源于此约定
// ==========================================

use crate::domain::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 原始表格来源 (抽取协作方的输出)
///
/// 文档与抽取模板归协作方所有,管道只消费按文档内位置
/// 排列的表格集合。
pub trait TableSource {
    /// 按文档内位置顺序返回全部原始表格
    fn extract(&self) -> ImportResult<Vec<RawTable>>;
}

// ==========================================
// tabula JSON 导出文件
// ==========================================

/// tabula JSON 导出中的单元格
#[derive(Debug, Deserialize)]
struct TabulaCell {
    #[serde(default)]
    text: String,
}

/// tabula JSON 导出中的一张表
#[derive(Debug, Deserialize)]
struct TabulaTable {
    #[serde(default)]
    data: Vec<Vec<TabulaCell>>,
}

/// 从 tabula JSON 导出文件读取原始表格
pub struct TabulaJsonFile {
    path: PathBuf,
}

impl TabulaJsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for TabulaJsonFile {
    fn extract(&self) -> ImportResult<Vec<RawTable>> {
        // 检查文件存在
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        let tables: Vec<TabulaTable> = serde_json::from_str(&content)?;

        Ok(tables.into_iter().map(raw_from_tabula).collect())
    }
}

/// 首行提升为表头,其余为数据行
fn raw_from_tabula(table: TabulaTable) -> RawTable {
    let mut rows = table.data.into_iter().map(|row| {
        row.into_iter()
            .map(|cell| cell.text.trim().to_string())
            .collect::<Vec<_>>()
    });

    let header = rows.next().unwrap_or_default();
    RawTable::new(header, rows.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extract_promotes_first_row_to_header() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"[
                {{"data": [
                    [{{"text": "Materials"}}, {{"text": "1960"}}],
                    [{{"text": "Glass"}}, {{"text": " 6,620 "}}],
                    [{{"text": "Wood"}}, {{"text": ""}}]
                ]}},
                {{"data": []}}
            ]"#
        )
        .unwrap();

        let source = TabulaJsonFile::new(temp_file.path());
        let tables = source.extract().unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].header, vec!["Materials", "1960"]);
        assert_eq!(tables[0].rows.len(), 2);
        // 单元格文本应去除首尾空白
        assert_eq!(tables[0].rows[0], vec!["Glass", "6,620"]);
        assert_eq!(tables[0].rows[1], vec!["Wood", ""]);
        // 空表保持为空
        assert!(tables[1].header.is_empty());
        assert!(tables[1].rows.is_empty());
    }

    #[test]
    fn test_extract_missing_file() {
        let source = TabulaJsonFile::new("no_such_extraction.json");
        let result = source.extract();
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_extract_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json at all").unwrap();

        let source = TabulaJsonFile::new(temp_file.path());
        let result = source.extract();
        assert!(matches!(result, Err(ImportError::ExtractionParseError(_))));
    }
}
