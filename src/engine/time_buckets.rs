// ==========================================
// 电子秤称重数据分析系统 - 时间分布聚合引擎
// ==========================================
// 职责: 按 日 / ISO周 / 月 / 周内-周末 分桶统计重量分布与商品排行
// 口径: 仅正重量记录计入统计；无时间戳与非正重量记录排除并计数
// 桶键: YYYY-MM-DD / {ISO年}-W{ISO周:02} / YYYY-MM / {周键}_weekday|_weekend
// ==========================================

use crate::domain::WeighingRecord;
use crate::engine::stats::DescriptiveStats;
use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

// ==========================================
// ProductCount - 商品频次
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCount {
    pub name: String,
    pub count: usize,
}

// ==========================================
// BucketStats - 单桶统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 桶内按 (频次降序, 名称升序) 排列的前 N 个商品
    pub top_products: Vec<ProductCount>,
}

// ==========================================
// WeekdayWeekendComparison - 全数据集 周内 vs 周末 对比
// ==========================================
// 百分比以周内为基线: (周末 - 周内) / 周内 * 100
// 周内基线为 0 时对比无定义,置 None 而非输出无穷大
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayWeekendComparison {
    pub weekday_count: usize,
    pub weekend_count: usize,
    pub weekday_mean: Option<f64>,
    pub weekend_mean: Option<f64>,
    pub count_diff_pct: Option<f64>,
    pub mean_diff_pct: Option<f64>,
}

// ==========================================
// TimeStatistics - 聚合总输出
// ==========================================
// BTreeMap 保证桶键有序,输出可复现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStatistics {
    pub daily: BTreeMap<String, BucketStats>,
    pub weekly: BTreeMap<String, BucketStats>,
    pub monthly: BTreeMap<String, BucketStats>,
    pub weekly_weekday_weekend: BTreeMap<String, BucketStats>,
    pub weekday_weekend_comparison: WeekdayWeekendComparison,

    // ===== 排除诊断（被排除的记录必须留痕）=====
    pub excluded_no_timestamp: usize,
    pub excluded_nonpositive_weight: usize,
}

// 单桶累加器：一次聚合遍历期间可变,输出后只读
#[derive(Default)]
struct BucketAccumulator {
    weights: Vec<f64>,
    products: HashMap<String, usize>,
}

impl BucketAccumulator {
    fn push(&mut self, weight: f64, product: Option<&str>) {
        self.weights.push(weight);
        if let Some(name) = product {
            *self.products.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    fn finalize(self, top_n: usize) -> BucketStats {
        // 累加器仅在收到过记录时存在,样本必然非空
        let stats = DescriptiveStats::from_sample(&self.weights)
            .expect("桶内样本不应为空");

        let mut ranked: Vec<ProductCount> = self
            .products
            .into_iter()
            .map(|(name, count)| ProductCount { name, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(top_n);

        BucketStats {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.stdev,
            min: stats.min,
            max: stats.max,
            top_products: ranked,
        }
    }
}

// ==========================================
// TimeBucketAggregator - 时间分布聚合引擎
// ==========================================
pub struct TimeBucketAggregator {
    top_n: usize,
}

impl TimeBucketAggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// 单遍聚合
    ///
    /// 输入记录只读；各桶相互独立,输出与输入顺序无关。
    #[instrument(skip(self, records), fields(total = records.len()))]
    pub fn aggregate(&self, records: &[WeighingRecord]) -> TimeStatistics {
        let mut daily: HashMap<String, BucketAccumulator> = HashMap::new();
        let mut weekly: HashMap<String, BucketAccumulator> = HashMap::new();
        let mut monthly: HashMap<String, BucketAccumulator> = HashMap::new();
        let mut partitions: HashMap<String, BucketAccumulator> = HashMap::new();

        let mut weekday_pool: Vec<f64> = Vec::new();
        let mut weekend_pool: Vec<f64> = Vec::new();

        let mut excluded_no_timestamp = 0usize;
        let mut excluded_nonpositive_weight = 0usize;

        for record in records {
            let ts = match record.timestamp {
                Some(ts) => ts,
                None => {
                    excluded_no_timestamp += 1;
                    continue;
                }
            };

            if record.weight_kg <= 0.0 {
                excluded_nonpositive_weight += 1;
                continue;
            }

            let weight = record.weight_kg;
            let product = record.product_name.as_deref();

            daily
                .entry(day_key(&ts))
                .or_default()
                .push(weight, product);

            let week = week_key(&ts);
            weekly
                .entry(week.clone())
                .or_default()
                .push(weight, product);

            monthly
                .entry(month_key(&ts))
                .or_default()
                .push(weight, product);

            let weekend = is_weekend(&ts);
            let part_key = if weekend {
                format!("{}_weekend", week)
            } else {
                format!("{}_weekday", week)
            };
            partitions.entry(part_key).or_default().push(weight, product);

            if weekend {
                weekend_pool.push(weight);
            } else {
                weekday_pool.push(weight);
            }
        }

        debug!(
            daily = daily.len(),
            weekly = weekly.len(),
            monthly = monthly.len(),
            excluded_no_timestamp,
            excluded_nonpositive_weight,
            "时间分桶完成"
        );

        TimeStatistics {
            daily: self.finalize_map(daily),
            weekly: self.finalize_map(weekly),
            monthly: self.finalize_map(monthly),
            weekly_weekday_weekend: self.finalize_map(partitions),
            weekday_weekend_comparison: compare_pools(&weekday_pool, &weekend_pool),
            excluded_no_timestamp,
            excluded_nonpositive_weight,
        }
    }

    fn finalize_map(&self, buckets: HashMap<String, BucketAccumulator>) -> BTreeMap<String, BucketStats> {
        buckets
            .into_iter()
            .map(|(key, acc)| (key, acc.finalize(self.top_n)))
            .collect()
    }
}

fn day_key(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// ISO-8601 周键: 周一为一周起点,第 1 周为包含当年首个周四的周
fn week_key(ts: &NaiveDateTime) -> String {
    let iso = ts.date().iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

fn month_key(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

fn is_weekend(ts: &NaiveDateTime) -> bool {
    matches!(ts.weekday(), Weekday::Sat | Weekday::Sun)
}

// 全数据集 周内/周末 汇总对比
fn compare_pools(weekday_pool: &[f64], weekend_pool: &[f64]) -> WeekdayWeekendComparison {
    let weekday_mean = DescriptiveStats::from_sample(weekday_pool).map(|s| s.mean);
    let weekend_mean = DescriptiveStats::from_sample(weekend_pool).map(|s| s.mean);

    let count_diff_pct = if weekday_pool.is_empty() {
        None
    } else {
        Some(
            (weekend_pool.len() as f64 - weekday_pool.len() as f64) / weekday_pool.len() as f64
                * 100.0,
        )
    };

    let mean_diff_pct = match (weekday_mean, weekend_mean) {
        (Some(wd), Some(we)) if wd != 0.0 => Some((we - wd) / wd * 100.0),
        _ => None,
    };

    WeekdayWeekendComparison {
        weekday_count: weekday_pool.len(),
        weekend_count: weekend_pool.len(),
        weekday_mean,
        weekend_mean,
        count_diff_pct,
        mean_diff_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), hms: (u32, u32, u32), weight: f64, product: Option<&str>) -> WeighingRecord {
        WeighingRecord {
            ad_value: weight * 1000.0,
            zero_ad_value: 0.0,
            weight_kg: weight,
            timestamp: Some(
                NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                    .unwrap()
                    .and_hms_opt(hms.0, hms.1, hms.2)
                    .unwrap(),
            ),
            product_name: product.map(|s| s.to_string()),
        }
    }

    fn aggregator() -> TimeBucketAggregator {
        TimeBucketAggregator::new(3)
    }

    #[test]
    fn test_single_day_bucket_stats() {
        // 2025-01-06 为周一,三条 5kg 记录 → 单日桶 count=3, mean=5, std=0
        let records = vec![
            record((2025, 1, 6), (8, 0, 0), 5.0, None),
            record((2025, 1, 6), (12, 0, 0), 5.0, None),
            record((2025, 1, 6), (18, 0, 0), 5.0, None),
        ];

        let stats = aggregator().aggregate(&records);

        let day = stats.daily.get("2025-01-06").unwrap();
        assert_eq!(day.count, 3);
        assert_eq!(day.mean, 5.0);
        assert_eq!(day.std_dev, 0.0);

        // 同周: 周内分区 3 条,周末分区不存在
        let weekday = stats.weekly_weekday_weekend.get("2025-W02_weekday").unwrap();
        assert_eq!(weekday.count, 3);
        assert!(!stats.weekly_weekday_weekend.contains_key("2025-W02_weekend"));
    }

    #[test]
    fn test_daily_counts_sum_to_week_count() {
        // 2025-W02: 2025-01-06(一) ~ 2025-01-12(日)
        let records = vec![
            record((2025, 1, 6), (8, 0, 0), 2.0, None),
            record((2025, 1, 7), (8, 0, 0), 3.0, None),
            record((2025, 1, 7), (9, 0, 0), 4.0, None),
            record((2025, 1, 11), (8, 0, 0), 5.0, None), // 周六
            record((2025, 1, 12), (8, 0, 0), 6.0, None), // 周日
        ];

        let stats = aggregator().aggregate(&records);

        let day_sum: usize = stats.daily.values().map(|b| b.count).sum();
        let week = stats.weekly.get("2025-W02").unwrap();
        assert_eq!(day_sum, week.count);

        // 周内 + 周末 = 周总数
        let weekday = stats.weekly_weekday_weekend.get("2025-W02_weekday").unwrap();
        let weekend = stats.weekly_weekday_weekend.get("2025-W02_weekend").unwrap();
        assert_eq!(weekday.count + weekend.count, week.count);
        assert_eq!(weekday.count, 3);
        assert_eq!(weekend.count, 2);
    }

    #[test]
    fn test_iso_week_year_boundary() {
        // 2024-12-30 是周一,按 ISO 规则属于 2025 年第 1 周
        let records = vec![record((2024, 12, 30), (10, 0, 0), 1.0, None)];
        let stats = aggregator().aggregate(&records);

        assert!(stats.weekly.contains_key("2025-W01"));
        assert!(stats.monthly.contains_key("2024-12"));
        assert!(stats.daily.contains_key("2024-12-30"));
    }

    #[test]
    fn test_zero_weight_excluded_but_counted() {
        let mut records = vec![
            record((2025, 1, 6), (8, 0, 0), 5.0, None),
            record((2025, 1, 6), (9, 0, 0), 0.0, None),
        ];
        records.push(WeighingRecord {
            ad_value: 100.0,
            zero_ad_value: 0.0,
            weight_kg: 2.0,
            timestamp: None,
            product_name: None,
        });

        let stats = aggregator().aggregate(&records);

        let day = stats.daily.get("2025-01-06").unwrap();
        assert_eq!(day.count, 1);
        assert_eq!(day.mean, 5.0);
        assert_eq!(stats.excluded_nonpositive_weight, 1);
        assert_eq!(stats.excluded_no_timestamp, 1);
    }

    #[test]
    fn test_top_products_ranking_with_tie() {
        let records = vec![
            record((2025, 1, 6), (8, 0, 0), 1.0, Some("香蕉")),
            record((2025, 1, 6), (9, 0, 0), 1.0, Some("香蕉")),
            record((2025, 1, 6), (10, 0, 0), 1.0, Some("苹果")),
            record((2025, 1, 6), (11, 0, 0), 1.0, Some("苹果")),
            record((2025, 1, 6), (12, 0, 0), 1.0, Some("梨")),
            record((2025, 1, 6), (13, 0, 0), 0.0, Some("橙子")), // 零重量不计入排行
        ];

        let stats = aggregator().aggregate(&records);
        let day = stats.daily.get("2025-01-06").unwrap();

        // 频次并列时按名称升序
        assert_eq!(day.top_products.len(), 3);
        assert_eq!(day.top_products[0].count, 2);
        assert_eq!(day.top_products[1].count, 2);
        assert!(day.top_products[0].name < day.top_products[1].name);
        assert_eq!(day.top_products[2], ProductCount { name: "梨".to_string(), count: 1 });
    }

    #[test]
    fn test_top_products_truncated_to_n() {
        let records: Vec<WeighingRecord> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|p| record((2025, 1, 6), (8, 0, 0), 1.0, Some(p)))
            .collect();

        let stats = TimeBucketAggregator::new(2).aggregate(&records);
        let day = stats.daily.get("2025-01-06").unwrap();
        assert_eq!(day.top_products.len(), 2);
    }

    #[test]
    fn test_weekday_weekend_comparison() {
        let records = vec![
            record((2025, 1, 6), (8, 0, 0), 10.0, None),  // 周一
            record((2025, 1, 7), (8, 0, 0), 10.0, None),  // 周二
            record((2025, 1, 11), (8, 0, 0), 15.0, None), // 周六
        ];

        let stats = aggregator().aggregate(&records);
        let cmp = &stats.weekday_weekend_comparison;

        assert_eq!(cmp.weekday_count, 2);
        assert_eq!(cmp.weekend_count, 1);
        assert_eq!(cmp.weekday_mean, Some(10.0));
        assert_eq!(cmp.weekend_mean, Some(15.0));
        assert!((cmp.count_diff_pct.unwrap() + 50.0).abs() < 1e-12);
        assert!((cmp.mean_diff_pct.unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_comparison_undefined_without_weekday_baseline() {
        // 仅有周末数据: 基线为 0,对比置 None 而非 ±∞
        let records = vec![record((2025, 1, 11), (8, 0, 0), 5.0, None)];
        let stats = aggregator().aggregate(&records);
        let cmp = &stats.weekday_weekend_comparison;

        assert_eq!(cmp.weekday_count, 0);
        assert_eq!(cmp.count_diff_pct, None);
        assert_eq!(cmp.mean_diff_pct, None);
        assert_eq!(cmp.weekend_mean, Some(5.0));
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregator().aggregate(&[]);
        assert!(stats.daily.is_empty());
        assert!(stats.weekly.is_empty());
        assert!(stats.monthly.is_empty());
        assert!(stats.weekly_weekday_weekend.is_empty());
        assert_eq!(stats.weekday_weekend_comparison.weekday_count, 0);
    }
}
