// ==========================================
// 电子秤称重数据分析系统 - 报告层
// ==========================================
// 职责: 定义分析结果数据契约并落盘（JSON 报告 / 逐条记录 CSV）
// 红线: 被丢弃/排除的数据必须在报告中留痕,不得无迹丢失
// ==========================================

pub mod writer;

pub use writer::ReportWriter;

use crate::domain::{IqrFlag, Severity};
use crate::engine::comparator::MethodComparison;
use crate::engine::iqr::IqrAnalysis;
use crate::engine::stats::DescriptiveStats;
use crate::engine::time_buckets::TimeStatistics;
use crate::engine::zscore::ZScoreAnalysis;
use serde::{Deserialize, Serialize};

// ==========================================
// DatasetSummary - 单数据集概览
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// 数据来源（文件路径）
    pub source: String,
    /// 源文件数据行数（不含表头,不含完全空白行）
    pub total_rows: usize,
    /// 必填字段解析失败被丢弃的行数
    pub dropped_rows: usize,
    /// 时间字段非空但无法解析的记录数
    pub unparsed_timestamps: usize,
    /// 归一化成功的记录数
    pub record_count: usize,
    /// 标定比值的描述性统计（无记录时为 None,即"无数据"哨兵）
    pub ratio_stats: Option<DescriptiveStats>,
}

// ==========================================
// RecordVerdict - 逐条待检记录的判定汇总
// ==========================================
// 与待检记录序列按位置对齐；检测被跳过时对应字段为 None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordVerdict {
    pub index: usize,
    pub weight_kg: f64,
    pub k_value: f64,
    pub ratio: f64,
    pub z_score: Option<f64>,
    pub severity: Option<Severity>,
    pub iqr_flag: Option<IqrFlag>,
}

// ==========================================
// AnalysisReport - 分析总报告
// ==========================================
// 每个分析环节要么给出结果,要么给出明确的跳过原因,
// 使"数据不足未执行"与"执行成功但零异常"可区分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,

    pub reference: DatasetSummary,
    pub test: DatasetSummary,

    /// 逐条待检记录判定
    pub records: Vec<RecordVerdict>,

    /// Z-Score 检测结果 / 跳过原因
    pub z_score: Option<ZScoreAnalysis>,
    pub z_score_skipped: Option<String>,

    /// IQR 围栏检测结果 / 跳过原因
    pub iqr: Option<IqrAnalysis>,
    pub iqr_skipped: Option<String>,

    /// 双方法交叉验证结果 / 跳过原因
    pub comparison: Option<MethodComparison>,
    pub comparison_skipped: Option<String>,

    /// 时间分布统计（待检数据集）/ 跳过原因
    pub time_stats: Option<TimeStatistics>,
    pub time_stats_skipped: Option<String>,
}

impl AnalysisReport {
    /// 高置信异常数量（双方法同时命中）
    pub fn high_confidence_anomalies(&self) -> usize {
        self.comparison.as_ref().map_or(0, |c| c.common_count)
    }
}
