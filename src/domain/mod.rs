// ==========================================
// 电子秤称重数据分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod record;
pub mod types;

// 重导出核心类型
pub use record::WeighingRecord;
pub use types::{IqrFlag, Severity};
