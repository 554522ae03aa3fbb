// 数据记录模块
// 单行数据的字段到值映射视图

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::value::FieldValue;

/// 数据记录，表示数据集中的一行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// 字段值映射
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// 创建新的记录
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// 添加字段
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> &mut Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// 获取字段值
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// 检查字段在该行是否存在。
    /// 列缺失或存储值为空值时视为不存在（稀疏行语义）。
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.get(name).map(|v| !v.is_null()).unwrap_or(false)
    }

    /// 获取所有字段名
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_str()).collect()
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();
        write!(f, "Record{{")?;
        let mut first = true;
        for key in keys {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, self.fields[key])?;
            first = false;
        }
        write!(f, "}}")
    }
}
