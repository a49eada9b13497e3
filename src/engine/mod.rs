// ==========================================
// 电子秤称重数据分析系统 - 引擎层
// ==========================================
// 职责: 比值计算 / 描述性统计 / 双方法异常检测 / 交叉验证 / 时间分桶
// 红线: 引擎只消费不可变输入,输出全新构造的结果,所有跳过必须输出 reason
// ==========================================

pub mod comparator;
pub mod error;
pub mod iqr;
pub mod orchestrator;
pub mod ratio;
pub mod stats;
pub mod time_buckets;
pub mod zscore;

// 重导出核心引擎
pub use comparator::{AnomalyComparator, MethodComparison};
pub use error::{AnalysisError, AnalysisResult};
pub use iqr::{IqrAnalysis, IqrDetector, IqrVerdict};
pub use orchestrator::AnalysisOrchestrator;
pub use stats::DescriptiveStats;
pub use time_buckets::{BucketStats, ProductCount, TimeBucketAggregator, TimeStatistics, WeekdayWeekendComparison};
pub use zscore::{ZScoreAnalysis, ZScoreDetector, ZScoreFlag};
