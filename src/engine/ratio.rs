// ==========================================
// 电子秤称重数据分析系统 - 标定比值计算
// ==========================================
// 公式: ratio = (AD值 - 零点AD值) / 重量 / 1000
// 红线: 重量为 0 时比值钳制为 0,绝不触发除零
// ==========================================

/// K 值: 负载引起的 AD 增量
pub fn k_value(ad_value: f64, zero_ad_value: f64) -> f64 {
    ad_value - zero_ad_value
}

/// 标定比值: K / 重量 / 1000
///
/// 重量为 0 时返回 0.0。该 0 是钳制值而非真实物理比值,下游消费方
/// 不得据此判定"标定完美",须同时检查重量字段。
pub fn calibration_ratio(ad_value: f64, zero_ad_value: f64, weight_kg: f64) -> f64 {
    if weight_kg == 0.0 {
        return 0.0;
    }
    k_value(ad_value, zero_ad_value) / weight_kg / 1000.0
}
