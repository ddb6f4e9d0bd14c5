// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供固定抽取结果路径与临时运行目录的配置
// ==========================================

use std::path::PathBuf;
use wasted_data_etl::PipelineConfig;

/// 仓库内的抽取结果固定样本 (覆盖全部已知抽取缺陷)
pub fn fixture_extraction_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tabula_extraction.json")
}

/// 指向临时目录的运行配置,目标库与导出互不干扰
pub fn scratch_config(temp_dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        extraction_path: fixture_extraction_path(),
        database_path: temp_dir.join("wasted_data.sqlite"),
        export_dir: temp_dir.join("exports"),
        ..PipelineConfig::default()
    }
}
