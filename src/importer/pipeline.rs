// ==========================================
// 固废处置数据管道 - 流程编排
// ==========================================
// 流程: 读取抽取结果 → 修复 → 合并 → 分类索引 → 生成关系行
//       → 单事务入库 → 行数校验 → CSV 导出
// 约束: 产物已存在即不做任何处理;失败的运行不留半成品,
//       目标库文件会被移除,下次从干净状态重来
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{DisposalMethod, RawTable, RepairedTable, WasteRecord};
use crate::importer::category_indexer::CategoryIndexer;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::plans::{
    disposal_table_plans, wasted_food_merge_plan, TablePlan, EXPECTED_DISPOSAL_ROWS,
    EXPECTED_MATERIAL_ROWS, EXPECTED_WASTE_ROWS,
};
use crate::importer::relation_loader::RelationLoader;
use crate::importer::table_merger::TableMerger;
use crate::importer::table_repairer::TableRepairer;
use crate::importer::table_source::{TableSource, TabulaJsonFile};
use crate::repository::{RelationCounts, WasteRepository};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 一次运行的结局
#[derive(Debug)]
pub enum RunOutcome {
    /// 目标库已存在,本次运行未做任何处理
    AlreadyMaterialized,
    /// 载入与导出全部完成
    Completed(RunSummary),
}

/// 完整运行的结果汇总
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: String,
    pub disposal_rows: i64,
    pub material_rows: i64,
    pub waste_rows: i64,
    pub exports: Vec<PathBuf>,
}

// ==========================================
// WastePipeline
// ==========================================
pub struct WastePipeline {
    config: PipelineConfig,
    source: Box<dyn TableSource>,
}

impl WastePipeline {
    /// 以默认表格来源 (tabula JSON 导出文件) 创建管道
    pub fn new(config: PipelineConfig) -> Self {
        let source = Box::new(TabulaJsonFile::new(&config.extraction_path));
        Self { config, source }
    }

    /// 以注入的表格来源创建管道
    pub fn with_source(config: PipelineConfig, source: Box<dyn TableSource>) -> Self {
        Self { config, source }
    }

    /// 执行一次完整运行
    #[instrument(skip(self))]
    pub fn run(&self) -> ImportResult<RunOutcome> {
        if self.config.database_path.exists() {
            info!(
                database = %self.config.database_path.display(),
                "数据库已存在,本次运行不做任何处理"
            );
            return Ok(RunOutcome::AlreadyMaterialized);
        }

        let run_id = Uuid::new_v4().to_string();
        match self.execute(&run_id) {
            Ok(summary) => Ok(RunOutcome::Completed(summary)),
            Err(err) => {
                self.discard_partial_database(&run_id);
                Err(err)
            }
        }
    }

    fn execute(&self, run_id: &str) -> ImportResult<RunSummary> {
        info!(
            run_id = %run_id,
            document = %self.config.document_path.display(),
            template = %self.config.template_path.display(),
            "开始处理源文档的表格抽取结果"
        );

        // === 步骤 1: 读取抽取结果 ===
        let raw_tables = self.source.extract()?;
        info!(tables = raw_tables.len(), "抽取结果读取完成");

        // === 步骤 2: 修复四张处置表 ===
        let plans = disposal_table_plans();
        let mut repaired: Vec<RepairedTable> = Vec::with_capacity(plans.len());
        for plan in &plans {
            let raw = table_at(&raw_tables, plan.table_index)?;
            let table = TableRepairer::repair(raw, plan)?;
            debug!(
                disposal = %plan.disposal,
                rows = table.row_count(),
                years = table.years.len(),
                "处置表修复完成"
            );
            repaired.push(table);
        }

        // === 步骤 3: 合并食物其他去向拆分表 ===
        let merge_plan = wasted_food_merge_plan();
        let wasted_food = TableMerger::merge(
            table_at(&raw_tables, merge_plan.label_table_index)?,
            table_at(&raw_tables, merge_plan.value_table_index)?,
            &merge_plan,
        )?;

        // === 步骤 4: 建立物料分类索引 ===
        // 燃烧表覆盖全部 13 类物料,行序即规范顺序
        let combustion = combustion_table(&plans, &repaired)?;
        let categories = CategoryIndexer::index(combustion)?;
        info!(categories = categories.len(), "物料分类索引建立完成");

        // === 步骤 5: 生成关系行 ===
        let mut records: Vec<WasteRecord> = Vec::new();
        for (plan, table) in plans.iter().zip(&repaired) {
            records.extend(RelationLoader::load_disposal_table(table, plan));
        }
        records.extend(RelationLoader::load_wasted_food_table(
            &wasted_food,
            &merge_plan,
            &categories,
        )?);
        info!(records = records.len(), "关系行生成完成");

        // === 步骤 6: 单事务入库 ===
        let mut repo = WasteRepository::create(&self.config.database_path)?;
        let counts = repo.load_all(&categories, &records)?;
        info!(
            disposal = counts.disposal,
            material = counts.material,
            waste = counts.waste,
            "入库完成"
        );

        // === 步骤 7: 最终行数校验 ===
        // 任何一张关系行数不符即判定本次运行失败,产物随后被移除
        verify_relation_counts(&counts)?;

        // === 步骤 8: CSV 导出 ===
        let exports = repo.export_csv(&self.config.export_dir)?;

        info!(run_id = %run_id, "管道运行完成");
        Ok(RunSummary {
            run_id: run_id.to_string(),
            disposal_rows: counts.disposal,
            material_rows: counts.material,
            waste_rows: counts.waste,
            exports,
        })
    }

    /// 失败的运行不留半成品数据库
    fn discard_partial_database(&self, run_id: &str) {
        let db_path = &self.config.database_path;
        if db_path.exists() {
            match fs::remove_file(db_path) {
                Ok(()) => {
                    info!(run_id = %run_id, database = %db_path.display(), "已移除半成品数据库")
                }
                Err(err) => {
                    warn!(run_id = %run_id, error = %err, "半成品数据库移除失败")
                }
            }
        }
    }
}

/// 按位置取原始表格
fn table_at(tables: &[RawTable], index: usize) -> ImportResult<RawTable> {
    tables
        .get(index)
        .cloned()
        .ok_or(ImportError::TableIndexOutOfRange {
            index,
            available: tables.len(),
        })
}

/// 修复结果中的燃烧表 (分类索引的来源)
fn combustion_table<'a>(
    plans: &[TablePlan],
    repaired: &'a [RepairedTable],
) -> ImportResult<&'a RepairedTable> {
    plans
        .iter()
        .zip(repaired)
        .find(|(plan, _)| plan.disposal == DisposalMethod::Combustion)
        .map(|(_, table)| table)
        .ok_or_else(|| ImportError::InternalError("处置表配置缺少燃烧表".to_string()))
}

/// 最终校验: 三张关系的实际行数必须全部命中期望值
fn verify_relation_counts(counts: &RelationCounts) -> ImportResult<()> {
    let checks = [
        ("disposal", EXPECTED_DISPOSAL_ROWS, counts.disposal),
        ("material", EXPECTED_MATERIAL_ROWS, counts.material),
        ("waste", EXPECTED_WASTE_ROWS, counts.waste),
    ];
    for (relation, expected, actual) in checks {
        if expected != actual {
            return Err(ImportError::CountVerificationFailed {
                relation: relation.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySource;

    impl TableSource for EmptySource {
        fn extract(&self) -> ImportResult<Vec<RawTable>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_existing_database_short_circuits_the_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("existing.sqlite");
        std::fs::write(&db_path, b"").unwrap();

        let config = PipelineConfig {
            database_path: db_path.clone(),
            export_dir: temp_dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let pipeline = WastePipeline::with_source(config, Box::new(EmptySource));

        let outcome = pipeline.run().unwrap();
        assert!(matches!(outcome, RunOutcome::AlreadyMaterialized));
        // 既有产物不可被改动
        assert!(db_path.exists());
    }

    #[test]
    fn test_missing_tables_abort_without_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("aborted.sqlite");

        let config = PipelineConfig {
            database_path: db_path.clone(),
            export_dir: temp_dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let pipeline = WastePipeline::with_source(config, Box::new(EmptySource));

        let result = pipeline.run();
        assert!(matches!(
            result,
            Err(ImportError::TableIndexOutOfRange { .. })
        ));
        assert!(!db_path.exists());
    }

    #[test]
    fn test_verify_relation_counts_rejects_short_waste_relation() {
        let counts = RelationCounts {
            disposal: 10,
            material: 13,
            waste: 1,
        };
        let result = verify_relation_counts(&counts);
        assert!(matches!(
            result,
            Err(ImportError::CountVerificationFailed { expected: 396, actual: 1, .. })
        ));

        let complete = RelationCounts {
            disposal: 10,
            material: 13,
            waste: 396,
        };
        assert!(verify_relation_counts(&complete).is_ok());
    }
}
