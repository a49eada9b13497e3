// ==========================================
// 电子秤称重数据分析系统 - 核心库
// ==========================================
// 技术栈: Rust + csv/calamine + chrono + tracing
// 系统定位: 批处理分析工具 (标定比值异常检测 + 时间分布统计)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 统计与检测规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 分析参数
pub mod config;

// 报告层 - 结果契约与落盘
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{IqrFlag, Severity, WeighingRecord};

// 引擎
pub use engine::{
    AnalysisError, AnalysisOrchestrator, AnomalyComparator, DescriptiveStats, IqrDetector,
    TimeBucketAggregator, ZScoreDetector,
};

// 导入
pub use importer::{ColumnResolver, ImportError, RecordNormalizer, UniversalFileParser};

// 配置
pub use config::AnalysisConfig;

// 报告
pub use report::{AnalysisReport, ReportWriter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电子秤称重数据分析系统";
