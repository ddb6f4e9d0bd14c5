// ==========================================
// 固废处置数据管道 - 批处理入口
// ==========================================
// 无命令行参数: 运行即处理既定源文档的抽取结果,
// 目标库已存在时直接退出
// ==========================================

use anyhow::Result;
use tracing::info;
use wasted_data_etl::{logging, PipelineConfig, RunOutcome, WastePipeline};

/// 默认配置文件位置,不存在时使用内置默认值
const CONFIG_PATH: &str = "./pipeline_config.json";

fn main() -> Result<()> {
    logging::init();

    info!("==================================================");
    info!("{} v{}", wasted_data_etl::APP_NAME, wasted_data_etl::VERSION);
    info!("==================================================");

    let config = PipelineConfig::load_or_default(CONFIG_PATH)?;
    info!(
        extraction = %config.extraction_path.display(),
        database = %config.database_path.display(),
        "运行配置就绪"
    );

    let pipeline = WastePipeline::new(config);
    match pipeline.run()? {
        RunOutcome::AlreadyMaterialized => {
            info!("数据库已存在,无需重复构建");
        }
        RunOutcome::Completed(summary) => {
            info!(
                run_id = %summary.run_id,
                disposal = summary.disposal_rows,
                material = summary.material_rows,
                waste = summary.waste_rows,
                exports = summary.exports.len(),
                "全部关系载入并导出完成"
            );
        }
    }

    Ok(())
}
