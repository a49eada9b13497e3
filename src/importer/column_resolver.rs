// ==========================================
// 电子秤称重数据分析系统 - 列识别器
// ==========================================
// 职责: 按关键字子串匹配定位 AD / 零点AD / 重量 / 时间 / 商品名 列
// 红线: 匹配必须确定性（表头顺序首个匹配生效）,多列命中须告警而非静默取舍
// ==========================================

use crate::config::AnalysisConfig;
use crate::importer::error::{ImportError, ImportResult};
use tracing::warn;

// ==========================================
// ColumnLayout - 列识别结果
// ==========================================
// ad/zero_ad/weight 为必需列,缺失即导入失败
// time/product 为可选列,缺失仅影响时间分布统计与商品排行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub ad_column: String,
    pub zero_ad_column: String,
    pub weight_column: String,
    pub time_column: Option<String>,
    pub product_column: Option<String>,
}

// ==========================================
// ColumnResolver - 列识别器
// ==========================================
pub struct ColumnResolver<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// 对一组表头执行列识别
    ///
    /// 必需列缺失返回 `ImportError::MissingColumn`（错误信息列出全部可用表头,
    /// 便于使用者核对导出文件格式）。
    pub fn resolve(&self, headers: &[String]) -> ImportResult<ColumnLayout> {
        let zero_hint = self.config.zero_ad_column_hint.as_str();

        // 零点列先识别；AD 列排除命中零点关键字的表头（"零点AD值"同时含 "AD"）
        let zero_ad_column = self.require(headers, zero_hint, |h| h.contains(zero_hint))?;
        let ad_hint = self.config.ad_column_hint.as_str();
        let ad_column = self.require(headers, ad_hint, |h| {
            h.contains(ad_hint) && !h.contains(zero_hint)
        })?;

        let weight_hint = self.config.weight_column_hint.as_str();
        let weight_column = self.require(headers, weight_hint, |h| h.contains(weight_hint))?;

        let time_hint = self.config.time_column_hint.as_str();
        let time_column = self.optional(headers, time_hint, |h| h.contains(time_hint));
        if time_column.is_none() {
            warn!(hint = %time_hint, "未识别到时间列，时间分布统计将跳过");
        }

        let product_column = self.optional(headers, "商品名关键字", |h| {
            self.config
                .product_column_hints
                .iter()
                .any(|hint| h.contains(hint.as_str()))
        });

        Ok(ColumnLayout {
            ad_column,
            zero_ad_column,
            weight_column,
            time_column,
            product_column,
        })
    }

    // 必需列：无匹配 → 错误
    fn require<F>(&self, headers: &[String], hint: &str, pred: F) -> ImportResult<String>
    where
        F: Fn(&str) -> bool,
    {
        self.first_match(headers, hint, pred)
            .ok_or_else(|| ImportError::MissingColumn {
                hint: hint.to_string(),
                available: headers.join(", "),
            })
    }

    // 可选列：无匹配 → None
    fn optional<F>(&self, headers: &[String], hint: &str, pred: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        self.first_match(headers, hint, pred)
    }

    // 表头顺序首个匹配生效,其余命中逐一告警
    fn first_match<F>(&self, headers: &[String], hint: &str, pred: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut matches = headers.iter().filter(|h| pred(h));
        let chosen = matches.next()?;

        for extra in matches {
            warn!(
                hint = %hint,
                chosen = %chosen,
                ignored = %extra,
                "多列命中同一关键字，取表头顺序首个匹配"
            );
        }

        Some(chosen.clone())
    }
}
