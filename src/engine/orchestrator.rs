// ==========================================
// 电子秤称重数据分析系统 - 分析总调度器
// ==========================================
// 流程: 解析 → 列识别 → 归一化 → 比值 → 统计 → 双方法检测 → 交叉验证 → 时间分桶
// 红线: 检测环节数据不足只降级为"跳过 + 原因",不中断整体分析
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::WeighingRecord;
use crate::engine::comparator::AnomalyComparator;
use crate::engine::error::AnalysisError;
use crate::engine::iqr::IqrDetector;
use crate::engine::stats::DescriptiveStats;
use crate::engine::time_buckets::TimeBucketAggregator;
use crate::engine::zscore::ZScoreDetector;
use crate::importer::{ColumnResolver, RecordNormalizer, UniversalFileParser};
use crate::report::{AnalysisReport, DatasetSummary, RecordVerdict};
use chrono::Local;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// 单数据集装载结果（概览 + 记录 + 时间列缺失原因）
struct LoadedDataset {
    summary: DatasetSummary,
    records: Vec<WeighingRecord>,
    time_column_missing: Option<String>,
}

// ==========================================
// AnalysisOrchestrator - 分析总调度器
// ==========================================
pub struct AnalysisOrchestrator {
    config: AnalysisConfig,
}

impl AnalysisOrchestrator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// 从参考/待检两个表格文件执行完整批量分析
    ///
    /// 文件级与必需列级错误直接返回 Err；行级与检测级问题降级为
    /// 报告内的计数与跳过原因。
    #[instrument(skip(self, reference_path, test_path))]
    pub fn analyze_files(
        &self,
        reference_path: &Path,
        test_path: &Path,
    ) -> anyhow::Result<AnalysisReport> {
        info!(
            reference = %reference_path.display(),
            test = %test_path.display(),
            "开始批量分析"
        );

        let reference = self.load_dataset(reference_path)?;
        let test = self.load_dataset(test_path)?;

        Ok(self.build_report(reference, test))
    }

    /// 对已归一化的记录执行分析（跳过文件装载,供上层复用）
    pub fn analyze_records(
        &self,
        reference: &[WeighingRecord],
        test: &[WeighingRecord],
    ) -> AnalysisReport {
        self.build_report(
            in_memory_dataset("<内存>", reference),
            in_memory_dataset("<内存>", test),
        )
    }

    // === 步骤 1-3: 解析 / 列识别 / 归一化 ===
    fn load_dataset(&self, path: &Path) -> anyhow::Result<LoadedDataset> {
        debug!(path = %path.display(), "步骤 1: 解析文件");
        let table = UniversalFileParser.parse(path)?;
        let total_rows = table.rows.len();
        if table.is_empty() {
            warn!(path = %path.display(), "文件不含数据行");
        }
        info!(path = %path.display(), total_rows, "文件解析完成");

        debug!("步骤 2: 列识别");
        let layout = ColumnResolver::new(&self.config).resolve(&table.headers)?;

        // 时间列缺失只阻断时间分布统计,比值/异常分析照常进行
        let time_column_missing = if layout.time_column.is_none() {
            Some(
                AnalysisError::NoTimeData(format!(
                    "未识别到时间列（关键字 \"{}\"），可用列: [{}]",
                    self.config.time_column_hint,
                    table.headers.join(", ")
                ))
                .to_string(),
            )
        } else {
            None
        };

        debug!("步骤 3: 记录归一化");
        let batch = RecordNormalizer::new(&layout).normalize(&table.rows);
        if batch.dropped_rows > 0 {
            warn!(
                path = %path.display(),
                dropped = batch.dropped_rows,
                "部分行因必填字段解析失败被丢弃"
            );
        }
        info!(
            path = %path.display(),
            records = batch.records.len(),
            dropped = batch.dropped_rows,
            "归一化完成"
        );

        let ratios: Vec<f64> = batch.records.iter().map(|r| r.ratio()).collect();
        let summary = DatasetSummary {
            source: path.display().to_string(),
            total_rows,
            dropped_rows: batch.dropped_rows,
            unparsed_timestamps: batch.unparsed_timestamps,
            record_count: batch.records.len(),
            ratio_stats: DescriptiveStats::from_sample(&ratios),
        };

        Ok(LoadedDataset {
            summary,
            records: batch.records,
            time_column_missing,
        })
    }

    // === 步骤 4-8: 检测 / 交叉验证 / 时间分桶 ===
    fn build_report(&self, reference: LoadedDataset, test: LoadedDataset) -> AnalysisReport {
        let reference_ratios: Vec<f64> = reference.records.iter().map(|r| r.ratio()).collect();
        let test_ratios: Vec<f64> = test.records.iter().map(|r| r.ratio()).collect();

        // 待检样本为空: 检测环节整体无事可做
        let empty_test_reason = if test_ratios.is_empty() {
            Some(AnalysisError::EmptyTestSample.to_string())
        } else {
            None
        };

        debug!("步骤 4: Z-Score 检测");
        let (z_score, z_score_skipped) = match &empty_test_reason {
            Some(reason) => (None, Some(reason.clone())),
            None => split_outcome(
                ZScoreDetector::new(&self.config).classify(&test_ratios, &reference_ratios),
            ),
        };

        debug!("步骤 5: IQR 围栏检测");
        let (iqr, iqr_skipped) = match &empty_test_reason {
            Some(reason) => (None, Some(reason.clone())),
            None => split_outcome(
                IqrDetector::new(&self.config).classify(&test_ratios, &reference_ratios),
            ),
        };

        debug!("步骤 6: 双方法交叉验证");
        let (comparison, comparison_skipped) = match (&z_score, &iqr) {
            (Some(z), Some(i)) => (
                Some(AnomalyComparator::compare(
                    &z.flagged_indices(),
                    &i.flagged_indices(),
                )),
                None,
            ),
            _ => (None, Some("任一检测方法未执行，交叉验证跳过".to_string())),
        };

        debug!("步骤 7: 逐条记录判定汇总");
        let records = test
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| RecordVerdict {
                index: i + 1,
                weight_kg: record.weight_kg,
                k_value: record.k_value(),
                ratio: record.ratio(),
                z_score: z_score.as_ref().map(|z| z.flags[i].z_score),
                severity: z_score.as_ref().map(|z| z.flags[i].severity),
                iqr_flag: iqr.as_ref().map(|q| q.verdicts[i].flag),
            })
            .collect();

        debug!("步骤 8: 时间分布统计");
        let (time_stats, time_stats_skipped) = match test.time_column_missing {
            Some(reason) => (None, Some(reason)),
            None => (
                Some(
                    TimeBucketAggregator::new(self.config.top_n_products)
                        .aggregate(&test.records),
                ),
                None,
            ),
        };

        let report = AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            reference: reference.summary,
            test: test.summary,
            records,
            z_score,
            z_score_skipped,
            iqr,
            iqr_skipped,
            comparison,
            comparison_skipped,
            time_stats,
            time_stats_skipped,
        };

        info!(
            test_records = report.test.record_count,
            high_confidence = report.high_confidence_anomalies(),
            "批量分析完成"
        );

        report
    }
}

// 检测结果 → (结果, 跳过原因) 二选一
fn split_outcome<T>(outcome: Result<T, AnalysisError>) -> (Option<T>, Option<String>) {
    match outcome {
        Ok(value) => (Some(value), None),
        Err(e) => {
            warn!(reason = %e, "检测环节跳过");
            (None, Some(e.to_string()))
        }
    }
}

fn in_memory_dataset(source: &str, records: &[WeighingRecord]) -> LoadedDataset {
    let ratios: Vec<f64> = records.iter().map(|r| r.ratio()).collect();
    LoadedDataset {
        summary: DatasetSummary {
            source: source.to_string(),
            total_rows: records.len(),
            dropped_rows: 0,
            unparsed_timestamps: 0,
            record_count: records.len(),
            ratio_stats: DescriptiveStats::from_sample(&ratios),
        },
        records: records.to_vec(),
        time_column_missing: None,
    }
}
