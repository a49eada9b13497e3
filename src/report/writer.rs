// ==========================================
// 电子秤称重数据分析系统 - 报告写出器
// ==========================================
// 职责: JSON 总报告 + 逐条记录判定 CSV
// ==========================================

use crate::report::AnalysisReport;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct ReportWriter;

impl ReportWriter {
    /// 写出 JSON 总报告（pretty 格式,供可视化层直接消费）
    pub fn write_json<P: AsRef<Path>>(report: &AnalysisReport, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(report).context("报告序列化失败")?;
        fs::write(path, json).with_context(|| format!("报告写入失败: {}", path.display()))?;

        info!(path = %path.display(), "JSON 报告已写出");
        Ok(())
    }

    /// 写出逐条记录判定 CSV
    ///
    /// 检测被跳过的列输出空值,而非伪造的默认判定。
    pub fn write_record_csv<P: AsRef<Path>>(report: &AnalysisReport, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("CSV 写入失败: {}", path.display()))?;

        writer.write_record(["序号", "重量(kg)", "K值", "标定比值", "Z分数", "Z判定", "IQR判定"])?;

        for verdict in &report.records {
            writer.write_record([
                verdict.index.to_string(),
                format!("{:.3}", verdict.weight_kg),
                format!("{:.1}", verdict.k_value),
                format!("{:.6}", verdict.ratio),
                verdict.z_score.map(|z| format!("{:.4}", z)).unwrap_or_default(),
                verdict.severity.map(|s| s.to_string()).unwrap_or_default(),
                verdict.iqr_flag.map(|f| f.to_string()).unwrap_or_default(),
            ])?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = report.records.len(), "记录判定 CSV 已写出");
        Ok(())
    }
}
