// 语言识别器
// 单字段语言分类，取排名最高的语言码写入 __language 列

use std::sync::Arc;

use crate::data::record::Record;
use crate::data::value::FieldValue;
use crate::error::{Error, Result};
use crate::model::TextClassifier;
use crate::text::{coerce_text, fold_newlines};

/// 语言标注器。
/// 字段存在性在操作入口处校验；这里假定字段已在数据集模式中。
pub struct LanguageTagger {
    /// 语言识别分类器
    classifier: Arc<dyn TextClassifier>,
    /// 目标字段
    field: String,
}

impl LanguageTagger {
    /// 创建新的语言标注器
    pub fn new(classifier: Arc<dyn TextClassifier>, field: impl Into<String>) -> Self {
        Self {
            classifier,
            field: field.into(),
        }
    }

    /// 检测单行语言：强制转换为文本、折叠换行，
    /// 只保留排名最高的语言码，丢弃置信度
    pub fn detect(&self, record: &Record) -> Result<String> {
        let value = record.get(&self.field).cloned().unwrap_or(FieldValue::Null);
        let text = fold_newlines(&coerce_text(&value));
        let predictions = self.classifier.predict(&text)?;
        predictions
            .into_iter()
            .next()
            .map(|p| p.label)
            .ok_or_else(|| {
                Error::internal(format!(
                    "language model '{}' returned no prediction",
                    self.classifier.name()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Prediction;

    /// 记录收到文本并返回固定排名的打桩分类器
    struct RankedClassifier;

    impl TextClassifier for RankedClassifier {
        fn predict(&self, text: &str) -> Result<Vec<Prediction>> {
            // 换行必须已被折叠
            assert!(!text.contains('\n'));
            Ok(vec![
                Prediction::new("en", 0.9),
                Prediction::new("de", 0.1),
            ])
        }

        fn name(&self) -> &str {
            "ranked"
        }
    }

    struct EmptyClassifier;

    impl TextClassifier for EmptyClassifier {
        fn predict(&self, _text: &str) -> Result<Vec<Prediction>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    #[test]
    fn test_detect_keeps_top_code_only() {
        let tagger = LanguageTagger::new(Arc::new(RankedClassifier), "text");
        let mut record = Record::new();
        record.insert("text", FieldValue::String("line one\nline two".into()));
        assert_eq!(tagger.detect(&record).unwrap(), "en");
    }

    #[test]
    fn test_empty_prediction_is_internal_error() {
        let tagger = LanguageTagger::new(Arc::new(EmptyClassifier), "text");
        let mut record = Record::new();
        record.insert("text", FieldValue::String("x".into()));
        assert!(matches!(tagger.detect(&record), Err(Error::Internal(_))));
    }
}
