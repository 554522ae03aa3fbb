// 数据模式模块 - 列类型声明与推断

use serde::{Deserialize, Serialize};

use crate::data::value::FieldValue;

/// 字段类型
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldType {
    /// 布尔类型
    Boolean,
    /// 整数类型
    Integer,
    /// 浮点类型
    Float,
    /// 文本类型
    Text,
    /// 数组类型
    Array,
    /// 对象类型
    Object,
    /// 全空列
    Null,
}

impl FieldType {
    /// 由单个值推断类型
    pub fn of(value: &FieldValue) -> FieldType {
        match value {
            FieldValue::Null => FieldType::Null,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::String(_) => FieldType::Text,
            FieldValue::Array(_) => FieldType::Array,
            FieldValue::Object(_) => FieldType::Object,
        }
    }

    /// 由列值推断类型：首个非空值决定，全空列为Null
    pub fn infer(values: &[FieldValue]) -> FieldType {
        values
            .iter()
            .find(|v| !v.is_null())
            .map(FieldType::of)
            .unwrap_or(FieldType::Null)
    }

    /// 获取类型名称
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Text => "text",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Null => "null",
        }
    }
}

/// 列元信息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// 列名
    pub name: String,
    /// 列类型
    pub field_type: FieldType,
}

/// 数据模式，按列顺序排列
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// 列元信息列表
    pub columns: Vec<ColumnMeta>,
}

impl DataSchema {
    /// 创建新的数据模式
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self { columns }
    }

    /// 检查字段是否存在
    pub fn has_field(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// 获取字段类型
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.field_type)
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
