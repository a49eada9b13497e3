// ==========================================
// 电子秤称重数据分析系统 - 领域类型定义
// ==========================================
// 红线: 判定结果是"等级制",不是评分制
// 序列化格式: snake_case (与报告 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 异常严重等级 (Z-Score Severity)
// ==========================================
// 依据: |z| > 3 → 严重, 2 < |z| <= 3 → 轻度, 其他 → 正常
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal, // 正常
    Mild,   // 轻度异常
    Severe, // 严重异常
}

impl Severity {
    /// 是否应计入异常索引集（供交叉验证使用）
    pub fn is_anomalous(&self) -> bool {
        !matches!(self, Severity::Normal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "正常"),
            Severity::Mild => write!(f, "轻度异常"),
            Severity::Severe => write!(f, "严重异常"),
        }
    }
}

// ==========================================
// IQR 围栏判定 (IQR Flag)
// ==========================================
// 区分"低于下界"与"高于上界",便于定位标定漂移方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IqrFlag {
    Normal,     // 围栏内
    BelowLower, // 低于下界 Q1 - k*IQR
    AboveUpper, // 高于上界 Q3 + k*IQR
}

impl IqrFlag {
    pub fn is_outlier(&self) -> bool {
        !matches!(self, IqrFlag::Normal)
    }
}

impl fmt::Display for IqrFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IqrFlag::Normal => write!(f, "正常"),
            IqrFlag::BelowLower => write!(f, "低于下界"),
            IqrFlag::AboveUpper => write!(f, "高于上界"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_anomalous() {
        assert!(!Severity::Normal.is_anomalous());
        assert!(Severity::Mild.is_anomalous());
        assert!(Severity::Severe.is_anomalous());
    }

    #[test]
    fn test_iqr_flag_outlier() {
        assert!(!IqrFlag::Normal.is_outlier());
        assert!(IqrFlag::BelowLower.is_outlier());
        assert!(IqrFlag::AboveUpper.is_outlier());
    }

    #[test]
    fn test_severity_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Severity::Severe).unwrap(), "\"severe\"");
        assert_eq!(serde_json::to_string(&IqrFlag::AboveUpper).unwrap(), "\"above_upper\"");
    }
}
