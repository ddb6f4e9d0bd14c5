// ==========================================
// 固废处置数据管道 - 数据仓储层
// ==========================================
// 职责: 提供目标库访问接口,屏蔽数据库细节
// 红线: Repository 不含修复/映射逻辑
// 约束: 所有插入参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod export;
pub mod schema;
pub mod waste_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use waste_repo::{RelationCounts, WasteRepository};
