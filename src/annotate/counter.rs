// 词元/字节计数器
// 按字节长度或子词分词统计字段长度，每个输入字段产出一列

use std::sync::Arc;

use crate::annotate::{BYTE_COUNT_PREFIX, TOKEN_COUNT_PREFIX};
use crate::data::record::Record;
use crate::data::value::FieldValue;
use crate::error::Result;
use crate::model::SubwordTokenizer;
use crate::text::{byte_len, coerce_text};

/// 计数方式
pub enum CountMode {
    /// 强制转换后文本的UTF-8字节数
    Bytes,
    /// 子词词元数
    Subword(Arc<dyn SubwordTokenizer>),
}

/// 长度计数器
pub struct TokenCounter {
    /// 计数方式
    mode: CountMode,
    /// 目标字段
    fields: Vec<String>,
}

impl TokenCounter {
    /// 创建新的计数器
    pub fn new(mode: CountMode, fields: &[&str]) -> Self {
        Self {
            mode,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// 输出列名前缀，由计数方式决定
    pub fn prefix(&self) -> &'static str {
        match self.mode {
            CountMode::Bytes => BYTE_COUNT_PREFIX,
            CountMode::Subword(_) => TOKEN_COUNT_PREFIX,
        }
    }

    /// 统计单行，每个字段产出 <前缀><字段名> 一列
    pub fn count(&self, record: &Record) -> Result<Vec<(String, FieldValue)>> {
        let mut columns = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = record.get(field).cloned().unwrap_or(FieldValue::Null);
            let text = coerce_text(&value);
            let count = match &self.mode {
                CountMode::Bytes => byte_len(&text),
                CountMode::Subword(tokenizer) => tokenizer.tokenize(&text)?.len(),
            };
            columns.push((
                format!("{}{}", self.prefix(), field),
                FieldValue::Integer(count as i64),
            ));
        }
        Ok(columns)
    }
}
