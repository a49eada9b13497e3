// ==========================================
// 电子秤称重数据分析系统 - 双方法交叉验证
// ==========================================
// 职责: 对 Z-Score 与 IQR 两套异常索引做集合差/交
// 语义: common 为高置信异常, z_only/iqr_only 为方法敏感的边界样本
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// MethodComparison - 交叉验证结果
// ==========================================
// 三个索引集两两不相交,并集等于两方法标记的并集
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodComparison {
    pub z_only: BTreeSet<usize>,
    pub iqr_only: BTreeSet<usize>,
    pub common: BTreeSet<usize>,
    pub z_only_count: usize,
    pub iqr_only_count: usize,
    pub common_count: usize,
}

// ==========================================
// AnomalyComparator - 交叉验证器
// ==========================================
pub struct AnomalyComparator;

impl AnomalyComparator {
    /// 纯集合代数,输入为两方法各自标记的异常索引（对同一待检序列按位置对齐）
    pub fn compare(z_flagged: &[usize], iqr_flagged: &[usize]) -> MethodComparison {
        let z_set: BTreeSet<usize> = z_flagged.iter().copied().collect();
        let iqr_set: BTreeSet<usize> = iqr_flagged.iter().copied().collect();

        let z_only: BTreeSet<usize> = z_set.difference(&iqr_set).copied().collect();
        let iqr_only: BTreeSet<usize> = iqr_set.difference(&z_set).copied().collect();
        let common: BTreeSet<usize> = z_set.intersection(&iqr_set).copied().collect();

        MethodComparison {
            z_only_count: z_only.len(),
            iqr_only_count: iqr_only.len(),
            common_count: common.len(),
            z_only,
            iqr_only,
            common,
        }
    }
}
