// SEO垃圾分类器
// 二分类 + 概率校准，输出按字段参数化的布尔与概率列

use std::sync::Arc;

use crate::annotate::{seo_spam_column, seo_spam_prob_column};
use crate::data::record::Record;
use crate::data::value::FieldValue;
use crate::error::{Error, Result};
use crate::model::TextClassifier;
use crate::text::{coerce_text, fold_newlines};

/// 判定为垃圾内容的预测标签
const DISCARD_LABEL: &str = "discard";

/// 垃圾内容分类器。
/// 预处理：小写并折叠换行。概率列恒为“垃圾概率”：
/// 预测为discard时直接取返回概率，否则取 1 - 返回概率。
pub struct SpamClassifier {
    /// 二分类器
    classifier: Arc<dyn TextClassifier>,
    /// 目标字段
    field: String,
}

impl SpamClassifier {
    /// 创建新的垃圾内容分类器
    pub fn new(classifier: Arc<dyn TextClassifier>, field: impl Into<String>) -> Self {
        Self {
            classifier,
            field: field.into(),
        }
    }

    /// 分类单行并产出两列
    pub fn classify(&self, record: &Record) -> Result<Vec<(String, FieldValue)>> {
        let value = record.get(&self.field).cloned().unwrap_or(FieldValue::Null);
        let text = fold_newlines(&coerce_text(&value)).to_lowercase();
        let predictions = self.classifier.predict(&text)?;
        let top = predictions.into_iter().next().ok_or_else(|| {
            Error::internal(format!(
                "spam model '{}' returned no prediction",
                self.classifier.name()
            ))
        })?;

        let (is_spam, spam_prob) = if top.label == DISCARD_LABEL {
            (true, top.confidence)
        } else {
            // 返回的是“保留”概率，转换为“垃圾”概率
            (false, 1.0 - top.confidence)
        };

        Ok(vec![
            (seo_spam_column(&self.field), FieldValue::Boolean(is_spam)),
            (
                seo_spam_prob_column(&self.field),
                FieldValue::Float(spam_prob),
            ),
        ])
    }
}
