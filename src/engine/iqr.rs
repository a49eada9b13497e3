// ==========================================
// 电子秤称重数据分析系统 - IQR 围栏异常检测引擎
// ==========================================
// 职责: 以参考样本的四分位距围栏判定待检比值是否越界
// 围栏: [Q1 - k_lower*IQR, Q3 + k_upper*IQR], 默认 k=1.5
// 前置条件: 参考样本数 >= 2,否则显式返回"参考数据不足"
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::IqrFlag;
use crate::engine::error::{AnalysisError, AnalysisResult};
use crate::engine::stats::percentile;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// IqrVerdict - 单条待检比值的判定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrVerdict {
    pub flag: IqrFlag,
    /// 判定说明（正常 / 低于下界 / 高于上界）
    pub description: String,
}

// ==========================================
// IqrAnalysis - 批量判定结果
// ==========================================
// verdicts 与待检序列按位置对齐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrAnalysis {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub verdicts: Vec<IqrVerdict>,
}

impl IqrAnalysis {
    /// 越界判定的索引集（供交叉验证使用）
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| v.flag.is_outlier())
            .map(|(i, _)| i)
            .collect()
    }
}

// ==========================================
// IqrDetector - IQR 围栏检测引擎
// ==========================================
pub struct IqrDetector {
    lower_k: f64,
    upper_k: f64,
}

impl IqrDetector {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            lower_k: config.iqr_lower_k,
            upper_k: config.iqr_upper_k,
        }
    }

    /// 批量判定
    ///
    /// Q1/Q3 取参考样本 25/75 百分位（线性插值口径）。
    pub fn classify(
        &self,
        test_ratios: &[f64],
        reference_ratios: &[f64],
    ) -> AnalysisResult<IqrAnalysis> {
        if reference_ratios.len() < 2 {
            return Err(AnalysisError::InsufficientReference(format!(
                "参考样本数 {} 少于 2，无法计算四分位距",
                reference_ratios.len()
            )));
        }

        let mut sorted = reference_ratios.to_vec();
        sorted.sort_by(f64::total_cmp);

        // 非空样本下 percentile 不会返回 None
        let q1 = percentile(&sorted, 25.0).unwrap_or(sorted[0]);
        let q3 = percentile(&sorted, 75.0).unwrap_or(sorted[sorted.len() - 1]);
        let iqr = q3 - q1;
        let lower_bound = q1 - self.lower_k * iqr;
        let upper_bound = q3 + self.upper_k * iqr;

        let verdicts = test_ratios
            .iter()
            .map(|&r| {
                let flag = if r < lower_bound {
                    IqrFlag::BelowLower
                } else if r > upper_bound {
                    IqrFlag::AboveUpper
                } else {
                    IqrFlag::Normal
                };
                IqrVerdict {
                    flag,
                    description: flag.to_string(),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            q1,
            q3,
            lower_bound,
            upper_bound,
            flagged = verdicts.iter().filter(|v| v.flag.is_outlier()).count(),
            "IQR 围栏判定完成"
        );

        Ok(IqrAnalysis {
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            verdicts,
        })
    }
}
