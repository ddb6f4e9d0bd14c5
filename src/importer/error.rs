// ==========================================
// 固废处置数据管道 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 修复/归类阶段的错误在本次运行内不可恢复,
//       任何一张表失败即整体中止,不落半成品数据
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入层错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 抽取结果相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("抽取结果解析失败: {0}")]
    ExtractionParseError(String),

    #[error("表格位置越界: 需要第 {index} 张表,抽取结果仅 {available} 张")]
    TableIndexOutOfRange { index: usize, available: usize },

    // ===== 表格修复错误 =====
    #[error("数值解析失败 (行 {row}): 无法识别单元格 '{value}'")]
    TypeConversionError { row: usize, value: String },

    #[error("续行片段无可归并的上一行 (行 {row}): '{label}'")]
    OrphanFragment { row: usize, label: String },

    #[error("拆分表两侧行数不一致: 标签列 {labels} 行, 数值列 {values} 行")]
    MergeMisaligned { labels: usize, values: usize },

    #[error("表格行数异常: {disposal} 期望 {expected} 行, 实际 {actual} 行")]
    ShapeMismatch {
        disposal: String,
        expected: usize,
        actual: usize,
    },

    // ===== 分类索引错误 =====
    #[error("物料分类数量异常: 期望 {expected} 条, 实际 {actual} 条")]
    CategoryCountMismatch { expected: usize, actual: usize },

    #[error("物料分类缺失: {label}")]
    MissingCategory { label: String },

    // ===== 入库校验错误 =====
    #[error("关系行数校验失败: {relation} 期望 {expected} 行, 实际 {actual} 行")]
    CountVerificationFailed {
        relation: String,
        expected: i64,
        actual: i64,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    // ===== 下层错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ExtractionParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
