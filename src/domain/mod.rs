// ==========================================
// 固废处置数据管道 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含修复逻辑
// ==========================================

pub mod material;
pub mod table;
pub mod types;

// 重导出核心类型
pub use material::{MaterialCategory, WasteRecord};
pub use table::{MaterialRow, RawTable, RepairedTable};
pub use types::{CellValue, DisposalMethod};
