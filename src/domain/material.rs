// ==========================================
// 固废处置数据管道 - 物料分类与事实记录
// ==========================================
// MaterialCategory: 13 条物料分类,建立后不再变更
// WasteRecord: (物料, 处置方式, 年份) 至多一条,金额可为无观测
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 物料分类 (Material Category)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCategory {
    /// 数据库主键,等于规范顺序中的位置 (1..=13)
    pub id: i64,
    /// 物料细类标签 (material_subtype 列)
    pub label: String,
    /// 是否产品类物料 (尾部 3 类为非产品)
    pub is_product: bool,
    /// 物料大类 (material_type 列,金属细类归并为 "Metals")
    pub group: String,
}

// ==========================================
// 事实记录 (Waste Record)
// ==========================================
// 仅持有外键,不反向引用分类实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub material_id: i64,
    pub disposal_id: i64,
    pub year: i32,
    /// None 表示源表无观测,与显式 0 不同
    pub tons: Option<i64>,
}
