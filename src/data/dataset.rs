// 数据集模块
// 内存列式数据集：有序命名列 + 按位置寻址的行，提供按行映射能力

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::record::Record;
use crate::data::schema::{ColumnMeta, DataSchema, FieldType};
use crate::data::value::FieldValue;
use crate::error::{Error, Result};

/// 数据集：固定行数上的有序命名列集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// 数据集ID
    id: String,
    /// 列名，保持插入顺序
    names: Vec<String>,
    /// 列数据，列名到值向量
    columns: HashMap<String, Vec<FieldValue>>,
    /// 行数
    num_rows: usize,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 更新时间
    updated_at: DateTime<Utc>,
}

impl Dataset {
    /// 创建空数据集
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            names: Vec::new(),
            columns: HashMap::new(),
            num_rows: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 由命名列构建数据集，列长度必须一致
    pub fn from_columns(columns: Vec<(String, Vec<FieldValue>)>) -> Result<Self> {
        let mut dataset = Dataset::new();
        for (name, values) in columns {
            dataset.set_column(&name, values)?;
        }
        Ok(dataset)
    }

    /// 由JSON记录数组构建数据集。
    /// 列集合为所有记录键的并集，记录中缺失的键填充空值。
    pub fn from_json_records(records: &[serde_json::Value]) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut rows: Vec<HashMap<String, FieldValue>> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                Error::invalid_input(format!("record {} is not a JSON object", index))
            })?;
            let mut row = HashMap::with_capacity(object.len());
            for (key, value) in object {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
                row.insert(key.clone(), FieldValue::from_json(value));
            }
            rows.push(row);
        }

        let mut dataset = Dataset::new();
        for name in names {
            let values: Vec<FieldValue> = rows
                .iter_mut()
                .map(|row| row.remove(&name).unwrap_or(FieldValue::Null))
                .collect();
            dataset.set_column(&name, values)?;
        }
        // 全部记录为空对象时仍保留行数
        if dataset.names.is_empty() {
            dataset.num_rows = records.len();
        }
        Ok(dataset)
    }

    /// 导出为JSON记录数组
    pub fn to_json_records(&self) -> Vec<serde_json::Value> {
        (0..self.num_rows)
            .map(|i| {
                let mut object = serde_json::Map::new();
                for name in &self.names {
                    object.insert(name.clone(), self.columns[name][i].to_json());
                }
                serde_json::Value::Object(object)
            })
            .collect()
    }

    /// 数据集ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 创建时间
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 更新时间
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 行数
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// 列数
    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// 所有列名，按插入顺序
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// 检查列是否存在
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 获取列数据
    pub fn column(&self, name: &str) -> Option<&[FieldValue]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// 获取列类型，首个非空值决定
    pub fn column_type(&self, name: &str) -> Option<FieldType> {
        self.columns.get(name).map(|values| FieldType::infer(values))
    }

    /// 导出数据模式
    pub fn schema(&self) -> DataSchema {
        DataSchema::new(
            self.names
                .iter()
                .map(|name| ColumnMeta {
                    name: name.clone(),
                    field_type: FieldType::infer(&self.columns[name]),
                })
                .collect(),
        )
    }

    /// 获取指定位置的行视图
    pub fn row(&self, index: usize) -> Record {
        let mut record = Record::new();
        for name in &self.names {
            record.insert(name.clone(), self.columns[name][index].clone());
        }
        record
    }

    /// 写入一列。同名列的所有值被整体替换，绝不部分更新；
    /// 长度与现有行数不一致时报错，数据集保持原状。
    pub fn set_column(&mut self, name: &str, values: Vec<FieldValue>) -> Result<&mut Self> {
        if !self.names.is_empty() && values.len() != self.num_rows {
            return Err(Error::invalid_input(format!(
                "column '{}' has {} values, dataset has {} rows",
                name,
                values.len(),
                self.num_rows
            )));
        }
        if self.names.is_empty() {
            self.num_rows = values.len();
        }
        if !self.columns.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.columns.insert(name.to_string(), values);
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// 对每一行应用纯函数，返回合并了输出列的新数据集。
    ///
    /// 行求值并行执行，但输出列中的行顺序与输入一致；
    /// 任意一行失败则整个调用失败，不产生任何可见的部分列状态。
    /// 每一行必须产出相同的输出列名集合。
    pub fn map_rows<F>(&self, f: F) -> Result<Dataset>
    where
        F: Fn(&Record) -> Result<Vec<(String, FieldValue)>> + Send + Sync,
    {
        if self.num_rows == 0 {
            debug!("数据集为空，按行映射未产生新列");
            let mut merged = self.clone();
            merged.updated_at = Utc::now();
            return Ok(merged);
        }

        let outputs: Vec<Vec<(String, FieldValue)>> = (0..self.num_rows)
            .into_par_iter()
            .map(|index| f(&self.row(index)))
            .collect::<Result<Vec<_>>>()?;

        // 输出列名以首行为准，其余行必须一致
        let expected: Vec<&String> = outputs[0].iter().map(|(name, _)| name).collect();
        for (index, output) in outputs.iter().enumerate() {
            let names: Vec<&String> = output.iter().map(|(name, _)| name).collect();
            if names != expected {
                return Err(Error::mapping(format!(
                    "row {} produced columns {:?}, expected {:?}",
                    index, names, expected
                )));
            }
        }

        let mut merged = self.clone();
        for (position, name) in expected.iter().enumerate() {
            let values: Vec<FieldValue> = outputs
                .iter()
                .map(|output| output[position].1.clone())
                .collect();
            merged.set_column(name.as_str(), values)?;
        }
        debug!(
            "按行映射完成，行数: {}, 合并列: {:?}",
            self.num_rows, expected
        );
        Ok(merged)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dataset() -> Dataset {
        Dataset::from_json_records(&[
            json!({"text": "hello", "score": 1}),
            json!({"text": "world", "score": 2}),
            json!({"text": "again"}),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_json_records_union_and_null_fill() {
        let dataset = sample_dataset();
        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(dataset.column_names(), &["score", "text"]);
        // 第三行缺失score，填充空值
        assert_eq!(dataset.column("score").unwrap()[2], FieldValue::Null);
    }

    #[test]
    fn test_column_type_inference() {
        let dataset = sample_dataset();
        assert_eq!(dataset.column_type("text"), Some(FieldType::Text));
        assert_eq!(dataset.column_type("score"), Some(FieldType::Integer));
    }

    #[test]
    fn test_set_column_replaces_wholesale() {
        let mut dataset = sample_dataset();
        let replaced = vec![
            FieldValue::Integer(9),
            FieldValue::Integer(8),
            FieldValue::Integer(7),
        ];
        dataset.set_column("score", replaced.clone()).unwrap();
        assert_eq!(dataset.column("score").unwrap(), replaced.as_slice());
        // 列名不重复
        assert_eq!(dataset.num_columns(), 2);
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut dataset = sample_dataset();
        let result = dataset.set_column("bad", vec![FieldValue::Null]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!dataset.has_column("bad"));
    }

    #[test]
    fn test_map_rows_preserves_order() {
        let dataset = sample_dataset();
        let mapped = dataset
            .map_rows(|record| {
                let score = record
                    .get("score")
                    .and_then(|v| v.as_integer())
                    .unwrap_or(0);
                Ok(vec![(
                    "scaled".to_string(),
                    FieldValue::Integer(score * 10),
                )])
            })
            .unwrap();
        let scaled: Vec<i64> = mapped
            .column("scaled")
            .unwrap()
            .iter()
            .map(|v| v.as_integer().unwrap())
            .collect();
        // 输出行序与输入一致
        assert_eq!(scaled, vec![10, 20, 0]);
        // 原数据集不受影响
        assert!(!dataset.has_column("scaled"));
    }

    #[test]
    fn test_map_rows_failure_aborts_wholesale() {
        let dataset = sample_dataset();
        let result = dataset.map_rows(|record| {
            if record.get("text").and_then(|v| v.as_str()) == Some("world") {
                Err(Error::internal("boom"))
            } else {
                Ok(vec![("ok".to_string(), FieldValue::Boolean(true))])
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_map_rows_inconsistent_columns_rejected() {
        let dataset = sample_dataset();
        let result = dataset.map_rows(|record| {
            if record.has_field("score") {
                Ok(vec![("a".to_string(), FieldValue::Boolean(true))])
            } else {
                Ok(vec![("b".to_string(), FieldValue::Boolean(true))])
            }
        });
        assert!(matches!(result, Err(Error::Mapping(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let records = vec![
            json!({"a": 1, "b": "x"}),
            json!({"a": 2, "b": "y"}),
        ];
        let dataset = Dataset::from_json_records(&records).unwrap();
        assert_eq!(dataset.to_json_records(), records);
    }
}
