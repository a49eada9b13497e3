// ==========================================
// 电子秤称重数据分析系统 - 导入层
// ==========================================
// 职责: 外部表格数据导入,生成内部称重记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod error;
pub mod file_parser;
pub mod record_normalizer;

// 重导出核心类型
pub use column_resolver::{ColumnLayout, ColumnResolver};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, ParsedTable, UniversalFileParser};
pub use record_normalizer::{NormalizedBatch, RecordNormalizer};
