// ==========================================
// 电子秤称重数据分析系统 - 记录归一化器
// ==========================================
// 职责: 字段映射行 → 类型化 WeighingRecord
// 红线: 行级解析失败只丢弃该行并计数,绝不中断批处理
// ==========================================

use crate::domain::WeighingRecord;
use crate::importer::column_resolver::ColumnLayout;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use tracing::{debug, warn};

// 时间解析格式,按序尝试,首个成功生效
// 依次: ISO-8601 带秒 / 空格分隔带秒 / 空格分隔不带秒 / 仅日期（取当日零点）
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// NormalizedBatch - 归一化结果
// ==========================================
// dropped_rows: 必填字段缺失/非数值而被丢弃的行数（须向使用者报告）
// unparsed_timestamps: 时间字段非空但无法解析的记录数（记录保留,仅无时间戳）
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub records: Vec<WeighingRecord>,
    pub dropped_rows: usize,
    pub unparsed_timestamps: usize,
}

// ==========================================
// RecordNormalizer - 记录归一化器
// ==========================================
pub struct RecordNormalizer<'a> {
    layout: &'a ColumnLayout,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(layout: &'a ColumnLayout) -> Self {
        Self { layout }
    }

    /// 批量归一化
    ///
    /// 输出顺序与输入行顺序一致（被丢弃的行除外）。
    pub fn normalize(&self, rows: &[HashMap<String, String>]) -> NormalizedBatch {
        let mut records = Vec::with_capacity(rows.len());
        let mut dropped_rows = 0usize;
        let mut unparsed_timestamps = 0usize;

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;

            let ad_value = parse_numeric(row, &self.layout.ad_column);
            let zero_ad_value = parse_numeric(row, &self.layout.zero_ad_column);
            let weight_kg = parse_numeric(row, &self.layout.weight_column);

            let (ad_value, zero_ad_value, weight_kg) = match (ad_value, zero_ad_value, weight_kg) {
                (Some(ad), Some(zero), Some(w)) => (ad, zero, w),
                _ => {
                    warn!(row_number, "必填字段缺失或非数值，丢弃该行");
                    dropped_rows += 1;
                    continue;
                }
            };

            let timestamp = match self.raw_field(row, self.layout.time_column.as_deref()) {
                Some(raw) => {
                    let parsed = parse_timestamp(raw);
                    if parsed.is_none() {
                        debug!(row_number, value = %raw, "时间字段无法解析，记录保留但不参与时间分布统计");
                        unparsed_timestamps += 1;
                    }
                    parsed
                }
                None => None,
            };

            let product_name = self
                .raw_field(row, self.layout.product_column.as_deref())
                .map(|s| s.to_string());

            records.push(WeighingRecord {
                ad_value,
                zero_ad_value,
                weight_kg,
                timestamp,
                product_name,
            });
        }

        NormalizedBatch {
            records,
            dropped_rows,
            unparsed_timestamps,
        }
    }

    // 取可选列的非空原始值
    fn raw_field<'r>(&self, row: &'r HashMap<String, String>, column: Option<&str>) -> Option<&'r str> {
        let value = row.get(column?)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

// 数值解析：缺列 / 空值 / 非数值 均视为失败
fn parse_numeric(row: &HashMap<String, String>, column: &str) -> Option<f64> {
    row.get(column)?.trim().parse::<f64>().ok()
}

/// 按固定格式序列解析时间戳,全部失败返回 None
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
