// 数据值模块
// 字段值的动态类型表示，以及与JSON值的互转

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 字段值类型，支持多种数据格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// 空值
    Null,
    /// 布尔值
    Boolean(bool),
    /// 整数值
    Integer(i64),
    /// 浮点数值
    Float(f64),
    /// 字符串值
    String(String),
    /// 数组值
    Array(Vec<FieldValue>),
    /// 对象值
    Object(HashMap<String, FieldValue>),
}

impl FieldValue {
    /// 检查值是否为空
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// 尝试获取布尔值
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// 尝试获取整数值
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// 尝试获取浮点数值
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// 尝试获取字符串值
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 获取类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Array(_) => "array",
            FieldValue::Object(_) => "object",
        }
    }

    /// 从JSON值创建字段值
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => FieldValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                FieldValue::Array(items.iter().map(FieldValue::from_json).collect())
            }
            serde_json::Value::Object(map) => FieldValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// 转换为JSON值
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Float(f) => serde_json::Value::from(*f),
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json).collect())
            }
            FieldValue::Object(map) => {
                let mut out = serde_json::Map::new();
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                for key in keys {
                    out.insert(key.clone(), map[key].to_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

/// 打印形式即分析边界使用的字符串强制转换形式：
/// 字符串原样输出，数组/对象输出其打印形式，空值输出null。
/// 对象键按字典序输出，保证打印形式稳定。
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Array(items) => {
                write!(f, "[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                    first = false;
                }
                write!(f, "]")
            }
            FieldValue::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                let mut first = true;
                for key in keys {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, map[key])?;
                    first = false;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_is_raw() {
        let value = FieldValue::String("hello world".to_string());
        assert_eq!(value.to_string(), "hello world");
    }

    #[test]
    fn test_display_array_printed_form() {
        // 列表字段按打印形式参与分析，而不是逐元素
        let value = FieldValue::Array(vec![
            FieldValue::Integer(1),
            FieldValue::String("scam".to_string()),
        ]);
        assert_eq!(value.to_string(), "[1, scam]");
    }

    #[test]
    fn test_display_null() {
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::json!({"a": 1, "b": [true, "x"], "c": null});
        let value = FieldValue::from_json(&json);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_as_accessors() {
        assert_eq!(FieldValue::Integer(7).as_float(), Some(7.0));
        assert_eq!(FieldValue::String("x".into()).as_str(), Some("x"));
        assert_eq!(FieldValue::Boolean(true).as_integer(), None);
    }
}
