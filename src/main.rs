// ==========================================
// 电子秤称重数据分析系统 - 批处理主入口
// ==========================================
// 用法: scale-analysis <参考数据文件> <待检数据文件> [输出目录] [配置文件.json]
// 输出: report.json (总报告) + records.csv (逐条判定)
// ==========================================

use anyhow::{bail, Context};
use scale_analysis::{logging, AnalysisConfig, AnalysisOrchestrator, ReportWriter};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", scale_analysis::APP_NAME);
    tracing::info!("系统版本: {}", scale_analysis::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!(
            "用法: {} <参考数据文件> <待检数据文件> [输出目录] [配置文件.json]",
            args[0]
        );
    }

    let reference_path = Path::new(&args[1]);
    let test_path = Path::new(&args[2]);
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("analysis_output"));

    // 配置: 未提供配置文件时使用内置默认值
    let config = match args.get(4) {
        Some(path) => {
            tracing::info!("使用配置文件: {}", path);
            AnalysisConfig::from_json_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("输出目录创建失败: {}", output_dir.display()))?;

    // 执行批量分析
    let orchestrator = AnalysisOrchestrator::new(config);
    let report = orchestrator.analyze_files(reference_path, test_path)?;

    // 落盘
    let report_path = output_dir.join("report.json");
    let records_path = output_dir.join("records.csv");
    ReportWriter::write_json(&report, &report_path)?;
    ReportWriter::write_record_csv(&report, &records_path)?;

    // 结果摘要
    tracing::info!("--------------------------------------------------");
    tracing::info!(
        "参考数据: {} 条记录（丢弃 {} 行）",
        report.reference.record_count,
        report.reference.dropped_rows
    );
    tracing::info!(
        "待检数据: {} 条记录（丢弃 {} 行）",
        report.test.record_count,
        report.test.dropped_rows
    );

    match (&report.comparison, &report.comparison_skipped) {
        (Some(c), _) => tracing::info!(
            "异常检测: 高置信 {} / 仅Z-Score {} / 仅IQR {}",
            c.common_count,
            c.z_only_count,
            c.iqr_only_count
        ),
        (None, Some(reason)) => tracing::warn!("异常检测未执行: {}", reason),
        (None, None) => {}
    }

    if let Some(reason) = &report.time_stats_skipped {
        tracing::warn!("时间分布统计未执行: {}", reason);
    } else if let Some(stats) = &report.time_stats {
        tracing::info!(
            "时间分布: {} 天 / {} 周 / {} 月（排除无时间戳 {} 条、非正重量 {} 条）",
            stats.daily.len(),
            stats.weekly.len(),
            stats.monthly.len(),
            stats.excluded_no_timestamp,
            stats.excluded_nonpositive_weight
        );
    }

    tracing::info!("报告已写出: {}", report_path.display());
    tracing::info!("记录判定已写出: {}", records_path.display());

    Ok(())
}
