// 行文本工具模块
// 所有分析器共用的字符串强制转换与字节长度工具

use std::borrow::Cow;

use crate::data::value::FieldValue;

/// 将字段值强制转换为文本。
/// 字符串值直接借用，其它类型使用其打印形式；
/// 结构化值（如数组）因此按打印形式参与分析，而不是逐元素。
pub fn coerce_text(value: &FieldValue) -> Cow<'_, str> {
    match value {
        FieldValue::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// 文本的UTF-8编码字节长度
pub fn byte_len(text: &str) -> usize {
    text.len()
}

/// 将换行替换为空格
pub fn fold_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_is_bytes_not_chars() {
        // "héllo"为5个字符、6个编码字节
        assert_eq!(byte_len("héllo"), 6);
        assert_eq!("héllo".chars().count(), 5);
    }

    #[test]
    fn test_coerce_text_borrows_string() {
        let value = FieldValue::String("plain".into());
        assert!(matches!(coerce_text(&value), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_coerce_text_prints_structures() {
        let value = FieldValue::Array(vec![FieldValue::Integer(1), FieldValue::Integer(2)]);
        assert_eq!(coerce_text(&value), "[1, 2]");
    }

    #[test]
    fn test_fold_newlines() {
        assert_eq!(fold_newlines("a\nb\nc"), "a b c");
    }
}
