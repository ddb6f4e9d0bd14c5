// ==========================================
// 固废处置数据管道 - 运行配置
// ==========================================
// 无命令行参数: 配置文件存在则读取,否则使用默认值
// 文档与抽取模板归抽取协作方所有,此处仅作记录与日志
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 源 PDF 文档 (抽取协作方的输入)
    pub document_path: PathBuf,
    /// tabula 抽取模板 (抽取协作方的输入)
    pub template_path: PathBuf,
    /// 协作方产出的表格抽取结果,按文档内位置排列
    pub extraction_path: PathBuf,
    /// 目标 SQLite 数据库
    pub database_path: PathBuf,
    /// CSV 导出目录
    pub export_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("./2018_tables_and_figures_dec_2020_fnl_508.pdf"),
            template_path: PathBuf::from(
                "./tabula-2018_tables_and_figures_dec_2020_fnl_508.json",
            ),
            extraction_path: PathBuf::from("./2018_tables_extracted.json"),
            database_path: PathBuf::from("./wasted_data.sqlite"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl PipelineConfig {
    /// 配置文件存在则读取,否则返回默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_matches_known_artifact_names() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.database_path,
            PathBuf::from("./wasted_data.sqlite")
        );
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = PipelineConfig::load_or_default("no_such_config.json").unwrap();
        assert_eq!(
            config.database_path,
            PipelineConfig::default().database_path
        );
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"database_path": "/tmp/other.sqlite"}}"#).unwrap();

        let config = PipelineConfig::load_or_default(temp_file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.sqlite"));
        // 未给出的字段保持默认
        assert_eq!(config.export_dir, PathBuf::from("."));
    }
}
