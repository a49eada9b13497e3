// ==========================================
// 电子秤称重数据分析系统 - 描述性统计
// ==========================================
// 职责: count/mean/median/stdev/min/max + 百分位数
// 口径: 标准差取样本定义（n-1 分母）,单样本标准差为 0
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DescriptiveStats - 描述性统计结果
// ==========================================
// 空样本无定义：调用方先检查样本是否为空（from_sample 返回 None）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    #[serde(rename = "std_dev")]
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// 对非空样本计算描述性统计,空样本返回 None
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }

        let count = sample.len();
        let mean = sample.iter().sum::<f64>() / count as f64;

        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        let stdev = sample_stdev(sample, mean);
        let min = sorted[0];
        let max = sorted[count - 1];

        Some(Self {
            count,
            mean,
            median,
            stdev,
            min,
            max,
        })
    }
}

/// 样本标准差（n-1 分母）,单样本返回 0.0
pub fn sample_stdev(sample: &[f64], mean: f64) -> f64 {
    let n = sample.len();
    if n < 2 {
        return 0.0;
    }

    let sum_sq: f64 = sample.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// 百分位数（线性插值口径）: pos = p/100 * (n-1)
///
/// 输入须为升序序列；空序列返回 None。
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let pos = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let frac = pos - lower as f64;

    if lower + 1 >= sorted.len() {
        return Some(sorted[sorted.len() - 1]);
    }

    Some(sorted[lower] + frac * (sorted[lower + 1] - sorted[lower]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_is_none() {
        assert_eq!(DescriptiveStats::from_sample(&[]), None);
    }

    #[test]
    fn test_single_sample() {
        let stats = DescriptiveStats::from_sample(&[5.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_basic_sample() {
        let stats = DescriptiveStats::from_sample(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.median - 4.5).abs() < 1e-12);
        // 样本标准差（n-1）: sqrt(32/7)
        assert!((stats.stdev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_reference_scenario_stdev() {
        // 参考样本 [1,1,1,1,10]: mean=2.8, 样本标准差 sqrt(64.8/4)
        let stats = DescriptiveStats::from_sample(&[1.0, 1.0, 1.0, 1.0, 10.0]).unwrap();
        assert!((stats.mean - 2.8).abs() < 1e-12);
        assert!((stats.stdev - (64.8f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_median_odd_and_even() {
        let odd = DescriptiveStats::from_sample(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(odd.median, 2.0);

        let even = DescriptiveStats::from_sample(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(even.median, 2.5);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        // [1..10]: Q1=3.25, Q3=7.75
        assert!((percentile(&sorted, 25.0).unwrap() - 3.25).abs() < 1e-12);
        assert!((percentile(&sorted, 75.0).unwrap() - 7.75).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 100.0), Some(10.0));
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[7.0], 25.0), Some(7.0));
    }
}
