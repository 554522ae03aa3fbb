// 精确/正则匹配器
// 字面值或正则模式的子串打标，产出 __tag__<name> 布尔列

use regex::Regex;

use crate::annotate::tag_column;
use crate::data::record::Record;
use crate::error::Result;
use crate::text::coerce_text;

/// 标签匹配器。
/// 每次打标操作构建一个模式：字面值列表转义后以 | 连接，
/// 或者用户正则原样编译。
pub struct TagMatcher {
    /// 编译后的模式
    pattern: Regex,
    /// 按给定顺序评估的字段
    fields: Vec<String>,
    /// 输出列名
    column: String,
}

impl TagMatcher {
    /// 由字面值列表构建。
    /// 字面值全部转义，元字符按字面处理；匹配为大小写敏感的子串包含。
    pub fn from_literals(fields: &[&str], values: &[&str], tag: &str) -> Result<Self> {
        let joined = values
            .iter()
            .map(|value| regex::escape(value))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&joined)?;
        Ok(Self {
            pattern,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            column: tag_column(tag),
        })
    }

    /// 由用户正则构建，模式按原样使用，大小写敏感性由模式自身决定
    pub fn from_pattern(fields: &[&str], pattern: &str, tag: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        Ok(Self {
            pattern,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            column: tag_column(tag),
        })
    }

    /// 输出列名
    pub fn column(&self) -> &str {
        &self.column
    }

    /// 评估单行：按字段顺序检查，行内缺失的字段跳过，
    /// 首个命中的字段即短路返回真
    pub fn matches(&self, record: &Record) -> bool {
        for field in &self.fields {
            if !record.has_field(field) {
                continue;
            }
            let value = match record.get(field) {
                Some(value) => value,
                None => continue,
            };
            if self.pattern.is_match(&coerce_text(value)) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value::FieldValue;

    fn record_with(field: &str, value: FieldValue) -> Record {
        let mut record = Record::new();
        record.insert(field, value);
        record
    }

    #[test]
    fn test_literal_match_case_sensitive() {
        let matcher = TagMatcher::from_literals(&["text"], &["scam"], "junk").unwrap();
        assert!(matcher.matches(&record_with("text", "This is a scam".into())));
        assert!(!matcher.matches(&record_with("text", "This is a SCAM".into())));
    }

    #[test]
    fn test_literal_metacharacters_escaped() {
        let matcher = TagMatcher::from_literals(&["text"], &["a.b"], "dotted").unwrap();
        assert!(matcher.matches(&record_with("text", "contains a.b here".into())));
        // 未转义时 . 会匹配任意字符
        assert!(!matcher.matches(&record_with("text", "contains aXb here".into())));
    }

    #[test]
    fn test_regex_match() {
        let matcher =
            TagMatcher::from_pattern(&["contact"], r"\d{3}-\d{3}-\d{4}", "phone").unwrap();
        assert!(matcher.matches(&record_with("contact", "call 555-123-4567".into())));
        assert!(!matcher.matches(&record_with("contact", "call 555-1234".into())));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        assert!(TagMatcher::from_pattern(&["text"], "(unclosed", "bad").is_err());
    }

    #[test]
    fn test_missing_field_skipped() {
        let matcher = TagMatcher::from_literals(&["absent", "text"], &["hit"], "t").unwrap();
        assert!(matcher.matches(&record_with("text", "a hit here".into())));
        assert!(!matcher.matches(&record_with("text", "nothing".into())));
    }

    #[test]
    fn test_non_string_field_uses_printed_form() {
        let matcher = TagMatcher::from_literals(&["items"], &["scam"], "t").unwrap();
        let value = FieldValue::Array(vec![
            FieldValue::String("ok".into()),
            FieldValue::String("scam".into()),
        ]);
        assert!(matcher.matches(&record_with("items", value)));
    }

    #[test]
    fn test_field_order_short_circuit() {
        // 首个字段命中即可，后续字段无须存在
        let matcher = TagMatcher::from_literals(&["a", "b"], &["x"], "t").unwrap();
        let mut record = Record::new();
        record.insert("a", FieldValue::String("x marks".into()));
        assert!(matcher.matches(&record));
    }
}
