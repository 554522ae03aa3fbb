// 数据引擎模块 - 数据集、记录与模式
// 提供内存列式数据集以及按行映射能力

pub mod dataset;
pub mod record;
pub mod schema;
pub mod value;

pub use dataset::Dataset;
pub use record::Record;
pub use schema::{ColumnMeta, DataSchema, FieldType};
pub use value::FieldValue;
