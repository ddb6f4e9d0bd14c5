// ==========================================
// 固废处置数据管道 - 源表修复配置
// ==========================================
// 每张源表的已知缺陷以数据的形式描述,修复器按配置执行
// 约束: 所有规则对已干净的输入幂等
// ==========================================

use crate::domain::DisposalMethod;

// ==========================================
// 规范常量
// ==========================================

/// 处置表的规范年份序列 (数值列顺序)
pub const CANONICAL_YEARS: [i32; 10] =
    [1960, 1970, 1980, 1990, 2000, 2005, 2010, 2015, 2017, 2018];

/// 食物其他去向表覆盖的单一年份
pub const WASTED_FOOD_YEAR: i32 = 2018;

/// 物料分类总数
pub const MATERIAL_COUNT: usize = 13;

/// 非产品分类数 (规范顺序尾部,由堆肥表覆盖)
pub const NON_PRODUCT_COUNT: usize = 3;

/// 缺失哨兵 (单元格无观测时的显式标记,与数值 0 不同)
pub const MISSING_SENTINEL: &str = "null";

/// 最终三张关系的期望行数
pub const EXPECTED_DISPOSAL_ROWS: i64 = 10;
pub const EXPECTED_MATERIAL_ROWS: i64 = 13;
pub const EXPECTED_WASTE_ROWS: i64 = 396;

// ==========================================
// 修复规则与每表配置
// ==========================================

/// 修复规则,按声明顺序执行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairRule {
    /// 表头实为首条数据行,需还原为数据并代以通用列名
    RecoverHeader,
    /// 删除结构行 (分组标签/小计),并处理金属组改名与断行标签
    DropStructuralRows,
    /// 单元格哨兵替换: "Neg." 记 0,空白记缺失哨兵
    FillSentinels,
}

/// 单张处置表的修复配置
#[derive(Debug, Clone)]
pub struct TablePlan {
    /// 该表在抽取结果中的位置
    pub table_index: usize,
    /// 对应的处置方式
    pub disposal: DisposalMethod,
    /// 适用的修复规则
    pub rules: &'static [RepairRule],
    /// 行位置到 material_id 的基准 (堆肥表覆盖尾部分类,基准为 11)
    pub material_id_base: i64,
    /// 修复后期望行数,不符即中止
    pub expected_rows: usize,
}

/// 拆分表 (标签列与数值列分离) 的合并配置
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// 标签列所在表的位置
    pub label_table_index: usize,
    /// 数值列所在表的位置
    pub value_table_index: usize,
    /// 非续行标签必含的锚点子串
    pub anchor: &'static str,
    /// 该表覆盖的单一年份
    pub year: i32,
    /// 合并后期望行数
    pub expected_rows: usize,
}

/// 四张处置表的修复配置
///
/// 燃烧表与填埋表覆盖全部 13 类物料,回收表只覆盖 10 类产品,
/// 堆肥表只覆盖尾部 3 类非产品。回收表的表头吞掉了首条数据行,
/// 填埋表存在 "Miscellaneous Inorganic" 断行标签。
pub fn disposal_table_plans() -> Vec<TablePlan> {
    vec![
        TablePlan {
            table_index: 10,
            disposal: DisposalMethod::Combustion,
            rules: &[RepairRule::DropStructuralRows, RepairRule::FillSentinels],
            material_id_base: 1,
            expected_rows: MATERIAL_COUNT,
        },
        TablePlan {
            table_index: 3,
            disposal: DisposalMethod::Composting,
            rules: &[RepairRule::DropStructuralRows, RepairRule::FillSentinels],
            material_id_base: (MATERIAL_COUNT - NON_PRODUCT_COUNT) as i64 + 1,
            expected_rows: NON_PRODUCT_COUNT,
        },
        TablePlan {
            table_index: 2,
            disposal: DisposalMethod::Recycling,
            rules: &[
                RepairRule::RecoverHeader,
                RepairRule::DropStructuralRows,
                RepairRule::FillSentinels,
            ],
            material_id_base: 1,
            expected_rows: MATERIAL_COUNT - NON_PRODUCT_COUNT,
        },
        TablePlan {
            table_index: 12,
            disposal: DisposalMethod::Landfill,
            rules: &[RepairRule::DropStructuralRows, RepairRule::FillSentinels],
            material_id_base: 1,
            expected_rows: MATERIAL_COUNT,
        },
    ]
}

/// 食物其他去向拆分表的合并配置
///
/// 标签列与数值列被抽取为两张表,两侧均存在表头吞数据的缺陷,
/// 标签列另有跨行断开的长标签。
pub fn wasted_food_merge_plan() -> MergePlan {
    MergePlan {
        label_table_index: 4,
        value_table_index: 5,
        anchor: "Food",
        year: WASTED_FOOD_YEAR,
        expected_rows: 6,
    }
}
