// ==========================================
// 电子秤称重数据分析系统 - 配置层
// ==========================================
// 职责: 分析参数配置（列关键字 / 阈值 / Top-N）
// ==========================================

pub mod analysis_config;

pub use analysis_config::AnalysisConfig;
