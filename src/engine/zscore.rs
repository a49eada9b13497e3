// ==========================================
// 电子秤称重数据分析系统 - Z-Score 异常检测引擎
// ==========================================
// 职责: 以参考样本的均值/标准差为基线,对待检比值逐个打分定级
// 前置条件: 参考样本数 >= 2 且标准差 != 0,否则显式返回"参考数据不足"
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::Severity;
use crate::engine::error::{AnalysisError, AnalysisResult};
use crate::engine::stats::sample_stdev;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// ZScoreFlag - 单条待检比值的判定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreFlag {
    pub z_score: f64,
    pub severity: Severity,
}

// ==========================================
// ZScoreAnalysis - 批量判定结果
// ==========================================
// flags 与待检序列按位置对齐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreAnalysis {
    pub ref_mean: f64,
    pub ref_stdev: f64,
    pub flags: Vec<ZScoreFlag>,
}

impl ZScoreAnalysis {
    /// 非正常判定的索引集（供交叉验证使用）
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.severity.is_anomalous())
            .map(|(i, _)| i)
            .collect()
    }
}

// ==========================================
// ZScoreDetector - Z-Score 检测引擎
// ==========================================
pub struct ZScoreDetector {
    mild_threshold: f64,
    severe_threshold: f64,
}

impl ZScoreDetector {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            mild_threshold: config.z_mild_threshold,
            severe_threshold: config.z_severe_threshold,
        }
    }

    /// 批量判定
    ///
    /// 输入不被修改；相同输入结果确定。
    pub fn classify(
        &self,
        test_ratios: &[f64],
        reference_ratios: &[f64],
    ) -> AnalysisResult<ZScoreAnalysis> {
        if reference_ratios.len() < 2 {
            return Err(AnalysisError::InsufficientReference(format!(
                "参考样本数 {} 少于 2，无法计算标准差",
                reference_ratios.len()
            )));
        }

        let ref_mean = reference_ratios.iter().sum::<f64>() / reference_ratios.len() as f64;
        let ref_stdev = sample_stdev(reference_ratios, ref_mean);

        if ref_stdev == 0.0 {
            return Err(AnalysisError::InsufficientReference(
                "参考样本标准差为 0，Z-Score 无定义".to_string(),
            ));
        }

        let flags = test_ratios
            .iter()
            .map(|&r| {
                let z_score = (r - ref_mean) / ref_stdev;
                ZScoreFlag {
                    z_score,
                    severity: self.severity_of(z_score),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            ref_mean,
            ref_stdev,
            flagged = flags.iter().filter(|f| f.severity.is_anomalous()).count(),
            "Z-Score 判定完成"
        );

        Ok(ZScoreAnalysis {
            ref_mean,
            ref_stdev,
            flags,
        })
    }

    fn severity_of(&self, z_score: f64) -> Severity {
        let abs = z_score.abs();
        if abs > self.severe_threshold {
            Severity::Severe
        } else if abs > self.mild_threshold {
            Severity::Mild
        } else {
            Severity::Normal
        }
    }
}
