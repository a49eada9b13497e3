// ==========================================
// 电子秤称重数据分析系统 - 分析配置
// ==========================================
// 职责: 列识别关键字 / 检测阈值 / Top-N 配置
// 存储: 可选 JSON 配置文件,缺省使用内置默认值
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// AnalysisConfig - 分析配置
// ==========================================
// 所有字段均有默认值,配置文件可只覆盖其中一部分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // ===== 列识别关键字（子串匹配,表头顺序首个匹配生效）=====
    /// AD 值列关键字（匹配零点关键字的表头不会被选为 AD 列）
    #[serde(default = "default_ad_hint")]
    pub ad_column_hint: String,

    /// 零点 AD 值列关键字
    #[serde(default = "default_zero_ad_hint")]
    pub zero_ad_column_hint: String,

    /// 重量列关键字
    #[serde(default = "default_weight_hint")]
    pub weight_column_hint: String,

    /// 时间列关键字（未识别到时仅跳过时间分布统计）
    #[serde(default = "default_time_hint")]
    pub time_column_hint: String,

    /// 商品名列关键字集合（任一命中即可）
    #[serde(default = "default_product_hints")]
    pub product_column_hints: Vec<String>,

    // ===== 检测阈值 =====
    /// Z-Score 轻度异常阈值（2 < |z| <= 严重阈值 → 轻度）
    #[serde(default = "default_z_mild")]
    pub z_mild_threshold: f64,

    /// Z-Score 严重异常阈值（|z| > 阈值 → 严重）
    #[serde(default = "default_z_severe")]
    pub z_severe_threshold: f64,

    /// IQR 下界系数（下界 = Q1 - k*IQR）
    #[serde(default = "default_iqr_k")]
    pub iqr_lower_k: f64,

    /// IQR 上界系数（上界 = Q3 + k*IQR）
    #[serde(default = "default_iqr_k")]
    pub iqr_upper_k: f64,

    // ===== 聚合配置 =====
    /// 每个时间桶保留的商品排行数量
    #[serde(default = "default_top_n")]
    pub top_n_products: usize,
}

fn default_ad_hint() -> String {
    "AD".to_string()
}

fn default_zero_ad_hint() -> String {
    "零点".to_string()
}

fn default_weight_hint() -> String {
    "重量".to_string()
}

fn default_time_hint() -> String {
    "时间".to_string()
}

fn default_product_hints() -> Vec<String> {
    vec![
        "商品".to_string(),
        "品名".to_string(),
        "产品".to_string(),
        "菜品".to_string(),
    ]
}

fn default_z_mild() -> f64 {
    2.0
}

fn default_z_severe() -> f64 {
    3.0
}

fn default_iqr_k() -> f64 {
    1.5
}

fn default_top_n() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ad_column_hint: default_ad_hint(),
            zero_ad_column_hint: default_zero_ad_hint(),
            weight_column_hint: default_weight_hint(),
            time_column_hint: default_time_hint(),
            product_column_hints: default_product_hints(),
            z_mild_threshold: default_z_mild(),
            z_severe_threshold: default_z_severe(),
            iqr_lower_k: default_iqr_k(),
            iqr_upper_k: default_iqr_k(),
            top_n_products: default_top_n(),
        }
    }
}

impl AnalysisConfig {
    /// 从 JSON 配置文件加载（文件内未出现的字段取默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&raw)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        Ok(config)
    }
}
