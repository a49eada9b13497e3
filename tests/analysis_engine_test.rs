// ==========================================
// 电子秤称重数据分析系统 - 分析引擎集成测试
// ==========================================
// 覆盖: 双方法检测的典型场景 + 交叉验证不变式
// ==========================================

use scale_analysis::config::AnalysisConfig;
use scale_analysis::domain::{IqrFlag, Severity};
use scale_analysis::engine::{AnomalyComparator, IqrDetector, ZScoreDetector};
use std::collections::BTreeSet;

#[test]
fn test_zscore_severe_tier_on_skewed_reference() {
    // 参考 [1,1,1,1,10]: mean=2.8, stdev≈4.02；待检 15.0 → z≈3.04 → 严重
    let config = AnalysisConfig::default();
    let analysis = ZScoreDetector::new(&config)
        .classify(&[15.0], &[1.0, 1.0, 1.0, 1.0, 10.0])
        .unwrap();

    assert_eq!(analysis.flags.len(), 1);
    assert!(analysis.flags[0].z_score > 3.0);
    assert_eq!(analysis.flags[0].severity, Severity::Severe);
}

#[test]
fn test_iqr_fences_on_uniform_reference() {
    // 参考 [1..10] → 围栏 [-3.5, 14.5]；20 越上界,5 正常
    let config = AnalysisConfig::default();
    let reference: Vec<f64> = (1..=10).map(|v| v as f64).collect();
    let analysis = IqrDetector::new(&config)
        .classify(&[20.0, 5.0], &reference)
        .unwrap();

    assert_eq!(analysis.verdicts[0].flag, IqrFlag::AboveUpper);
    assert_eq!(analysis.verdicts[1].flag, IqrFlag::Normal);
}

#[test]
fn test_zscore_output_length_and_tiers() {
    let config = AnalysisConfig::default();
    let reference = vec![0.9, 1.0, 1.0, 1.1, 1.0, 0.95, 1.05];
    let test = vec![1.0, 1.5, 2.0, 0.5, 10.0];

    let analysis = ZScoreDetector::new(&config)
        .classify(&test, &reference)
        .unwrap();

    // 输出长度与待检序列一致
    assert_eq!(analysis.flags.len(), test.len());

    // 严重程度对 |z| 单调
    for flag in &analysis.flags {
        let abs = flag.z_score.abs();
        match flag.severity {
            Severity::Normal => assert!(abs <= 2.0),
            Severity::Mild => assert!(abs > 2.0 && abs <= 3.0),
            Severity::Severe => assert!(abs > 3.0),
        }
    }
}

#[test]
fn test_comparator_invariants_against_detectors() {
    let config = AnalysisConfig::default();
    let reference: Vec<f64> = vec![0.9, 0.95, 1.0, 1.0, 1.05, 1.1, 1.0, 0.98, 1.02, 1.03];
    let test: Vec<f64> = vec![1.0, 1.3, 5.0, -3.0, 0.99, 1.15];

    let z = ZScoreDetector::new(&config).classify(&test, &reference).unwrap();
    let iqr = IqrDetector::new(&config).classify(&test, &reference).unwrap();

    let z_flagged = z.flagged_indices();
    let iqr_flagged = iqr.flagged_indices();
    let comparison = AnomalyComparator::compare(&z_flagged, &iqr_flagged);

    // 三集两两不相交
    assert!(comparison.z_only.is_disjoint(&comparison.iqr_only));
    assert!(comparison.z_only.is_disjoint(&comparison.common));
    assert!(comparison.iqr_only.is_disjoint(&comparison.common));

    // 并集等于两方法标记之并
    let mut union: BTreeSet<usize> = comparison.z_only.clone();
    union.extend(&comparison.iqr_only);
    union.extend(&comparison.common);
    let expected: BTreeSet<usize> = z_flagged.iter().chain(iqr_flagged.iter()).copied().collect();
    assert_eq!(union, expected);

    // 明显离群值 5.0 / -3.0 应为双方法共同命中
    assert!(comparison.common.contains(&2));
    assert!(comparison.common.contains(&3));
}

#[test]
fn test_iqr_reference_never_flagged_by_own_bounds() {
    let config = AnalysisConfig::default();
    let reference: Vec<f64> = (1..=10).map(|v| v as f64).collect();

    let analysis = IqrDetector::new(&config)
        .classify(&reference, &reference)
        .unwrap();

    // 围栏由参考样本导出且必然包含其四分位核心
    assert!(analysis.lower_bound <= analysis.q1);
    assert!(analysis.upper_bound >= analysis.q3);
    // [1..10] 的围栏 [-3.5, 14.5] 包含全部参考值
    assert!(analysis.verdicts.iter().all(|v| !v.flag.is_outlier()));
}

#[test]
fn test_custom_thresholds_respected() {
    let config = AnalysisConfig {
        z_mild_threshold: 1.0,
        z_severe_threshold: 2.0,
        ..AnalysisConfig::default()
    };

    let analysis = ZScoreDetector::new(&config)
        .classify(&[1.5], &[-2.0, -1.0, 0.0, 1.0, 2.0])
        .unwrap();

    // stdev=sqrt(2.5)≈1.58, z≈0.95 → 正常；阈值收紧后再验证轻度档
    assert_eq!(analysis.flags[0].severity, Severity::Normal);

    let analysis = ZScoreDetector::new(&config)
        .classify(&[2.5], &[-2.0, -1.0, 0.0, 1.0, 2.0])
        .unwrap();
    // z≈1.58 → 落入 (1.0, 2.0] → 轻度
    assert_eq!(analysis.flags[0].severity, Severity::Mild);
}
