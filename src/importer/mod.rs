// ==========================================
// 固废处置数据管道 - 导入层
// ==========================================
// 职责: 从抽取结果到规范化关系行的全部修复与映射
// 流程: 来源 → 修复 → 合并 → 分类索引 → 关系行 → 编排
// ==========================================

// 模块声明
pub mod category_indexer;
pub mod error;
pub mod pipeline;
pub mod plans;
pub mod relation_loader;
pub mod table_merger;
pub mod table_repairer;
pub mod table_source;

// 重导出核心类型
pub use category_indexer::CategoryIndexer;
pub use error::{ImportError, ImportResult};
pub use pipeline::{RunOutcome, RunSummary, WastePipeline};
pub use plans::{MergePlan, RepairRule, TablePlan};
pub use relation_loader::RelationLoader;
pub use table_merger::TableMerger;
pub use table_repairer::TableRepairer;
pub use table_source::{TableSource, TabulaJsonFile};
