// ==========================================
// 电子秤称重数据分析系统 - 分析引擎错误类型
// ==========================================
// 红线: 数据不足是显式结果而非崩溃,且须与"成功但零异常"可区分
// ==========================================

use thiserror::Error;

/// 分析引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// 参考样本不足以建立基线（样本数 < 2,或 Z-Score 要求的标准差为 0）
    #[error("参考数据不足: {0}")]
    InsufficientReference(String),

    /// 待检样本为空,下游应按无事可做处理
    #[error("待检样本为空，无可分析数据")]
    EmptyTestSample,

    /// 数据集中没有任何可用于时间分布统计的记录
    #[error("无可用时间数据: {0}")]
    NoTimeData(String),
}

/// Result 类型别名
pub type AnalysisResult<T> = Result<T, AnalysisError>;
