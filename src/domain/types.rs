// ==========================================
// 固废处置数据管道 - 领域类型定义
// ==========================================
// 处置方式为固定枚举,不由输入数据派生
// 入库顺序即主键顺序 (id 1..=10)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 处置方式 (Disposal Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisposalMethod {
    Combustion,
    Composting,
    Recycling,
    Landfill,
    AnimalFeed,
    BioBasedProcessing,
    Codigestion,
    Donation,
    LandApplication,
    SewerTreatment,
}

impl DisposalMethod {
    /// 全部处置方式,数组顺序决定数据库主键
    pub const ALL: [DisposalMethod; 10] = [
        DisposalMethod::Combustion,
        DisposalMethod::Composting,
        DisposalMethod::Recycling,
        DisposalMethod::Landfill,
        DisposalMethod::AnimalFeed,
        DisposalMethod::BioBasedProcessing,
        DisposalMethod::Codigestion,
        DisposalMethod::Donation,
        DisposalMethod::LandApplication,
        DisposalMethod::SewerTreatment,
    ];

    /// 数据库主键 (1..=10)
    pub fn id(self) -> i64 {
        Self::ALL
            .iter()
            .position(|m| *m == self)
            .map(|p| p as i64 + 1)
            .unwrap_or_default()
    }

    /// 入库文本 (disposal 表的 disposal_type 列)
    pub fn label(self) -> &'static str {
        match self {
            DisposalMethod::Combustion => "combustion",
            DisposalMethod::Composting => "composting",
            DisposalMethod::Recycling => "recycling",
            DisposalMethod::Landfill => "landfill",
            DisposalMethod::AnimalFeed => "animal feed",
            DisposalMethod::BioBasedProcessing => {
                "bio-based materials/biochemical processing"
            }
            DisposalMethod::Codigestion => "codigestion/anaerobic digestion",
            DisposalMethod::Donation => "donation",
            DisposalMethod::LandApplication => "land application",
            DisposalMethod::SewerTreatment => "sewer/wastewater treatment",
        }
    }
}

impl fmt::Display for DisposalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 单元格取值 (Cell Value)
// ==========================================
// Missing 表示"无观测",与数值 0 严格区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Tons(i64),
    Missing,
}

impl CellValue {
    /// 转为入库值 (Missing 写入 NULL)
    pub fn as_tons(self) -> Option<i64> {
        match self {
            CellValue::Tons(v) => Some(v),
            CellValue::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposal_ids_follow_declaration_order() {
        assert_eq!(DisposalMethod::Combustion.id(), 1);
        assert_eq!(DisposalMethod::Composting.id(), 2);
        assert_eq!(DisposalMethod::Recycling.id(), 3);
        assert_eq!(DisposalMethod::Landfill.id(), 4);
        assert_eq!(DisposalMethod::AnimalFeed.id(), 5);
        assert_eq!(DisposalMethod::SewerTreatment.id(), 10);
    }

    #[test]
    fn test_disposal_labels_match_store_text() {
        assert_eq!(DisposalMethod::Combustion.label(), "combustion");
        assert_eq!(
            DisposalMethod::Codigestion.label(),
            "codigestion/anaerobic digestion"
        );
        assert_eq!(
            DisposalMethod::SewerTreatment.to_string(),
            "sewer/wastewater treatment"
        );
    }

    #[test]
    fn test_cell_value_missing_is_not_zero() {
        assert_eq!(CellValue::Tons(0).as_tons(), Some(0));
        assert_eq!(CellValue::Missing.as_tons(), None);
    }
}
