// ==========================================
// 固废处置数据管道 - 核心库
// ==========================================
// 数据源: EPA 2018 固废统计报告的表格抽取结果
// 技术栈: Rust + SQLite
// 流程: 抽取结果 → 表格修复 → 分类索引 → 关系载入 → CSV 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 表格修复与载入流程
pub mod importer;

// 数据仓储层 - 目标库访问
pub mod repository;

// 配置层
pub mod config;

// 数据库基础设施 (连接初始化/PRAGMA 统一)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 配置
pub use config::PipelineConfig;

// 领域类型
pub use domain::{
    CellValue, DisposalMethod, MaterialCategory, MaterialRow, RawTable, RepairedTable,
    WasteRecord,
};

// 导入层
pub use importer::{
    ImportError, ImportResult, RunOutcome, RunSummary, TableSource, WastePipeline,
};

// 仓储层
pub use repository::{RelationCounts, RepositoryError, RepositoryResult, WasteRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "固废处置数据管道";
