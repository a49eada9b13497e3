// ==========================================
// 电子秤称重数据分析系统 - 称重记录领域模型
// ==========================================
// 红线: 记录一经构造不可变,引擎层只读
// 用途: 归一化层写入,分析引擎消费
// ==========================================

use crate::engine::ratio;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// WeighingRecord - 单条称重记录
// ==========================================
// 构造前提: AD值 / 零点AD值 / 重量 三个必填字段均解析成功
// 时间戳与商品名为可选字段,缺失不影响比值分析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighingRecord {
    // ===== 必填字段 =====
    pub ad_value: f64,      // 标定 AD 读数
    pub zero_ad_value: f64, // 零点 AD 读数
    pub weight_kg: f64,     // 操作员录入重量（kg）

    // ===== 可选字段 =====
    pub timestamp: Option<NaiveDateTime>, // 订单/创建时间（无法解析则为 None）
    pub product_name: Option<String>,     // 商品名（已去首尾空白）
}

impl WeighingRecord {
    /// K 值: 负载引起的 AD 增量
    pub fn k_value(&self) -> f64 {
        ratio::k_value(self.ad_value, self.zero_ad_value)
    }

    /// 标定比值: K / 重量 / 1000
    ///
    /// 注意: 重量为 0 时返回 0.0（显式钳制策略）。下游不得把 0 比值
    /// 当作"标定完美"解读,须同时检查 weight_kg。
    pub fn ratio(&self) -> f64 {
        ratio::calibration_ratio(self.ad_value, self.zero_ad_value, self.weight_kg)
    }

    /// 是否具备参与时间分布统计的条件（有时间戳且重量为正）
    pub fn is_bucketable(&self) -> bool {
        self.timestamp.is_some() && self.weight_kg > 0.0
    }
}
