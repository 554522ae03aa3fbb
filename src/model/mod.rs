// 模型能力模块
// 定义核心消费的外部能力接口：分类器、n-gram模型、神经评分器、
// 子词分词器、实体扫描器，以及按标识解析它们的模型解析器

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod registry;

pub use registry::ModelRegistry;

/// 语言识别模型标识
pub const LANGUAGE_ID_MODEL: &str = "lid-176";
/// SEO垃圾内容分类模型标识
pub const SEO_SPAM_MODEL: &str = "seo-spam";
/// 神经困惑度评分模型标识
pub const NEURAL_SCORER_MODEL: &str = "pythia-70m";
/// 神经评分使用的子词分词器标识
pub const NEURAL_TOKENIZER: &str = "pythia-70m";

/// 分类预测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// 预测标签
    pub label: String,
    /// 该标签的置信度
    pub confidence: f64,
}

impl Prediction {
    /// 创建新的预测结果
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// 实体扫描发现
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// 类别标签
    pub category: String,
    /// 命中的文本片段
    pub text: String,
}

impl Finding {
    /// 创建新的发现
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// 文本分类能力。
/// 返回按置信度降序排列的预测列表。
pub trait TextClassifier: Send + Sync {
    /// 对文本分类
    fn predict(&self, text: &str) -> Result<Vec<Prediction>>;

    /// 分类器名称
    fn name(&self) -> &str;
}

/// n-gram语言模型能力。
/// 返回的困惑度已按文本字节长度归一化。
pub trait NgramModel: Send + Sync {
    /// 计算文本困惑度
    fn perplexity(&self, text: &str) -> Result<f64>;
}

/// 神经评分能力，单次评分返回逐词元对数概率
pub trait NeuralScorer: Send + Sync {
    /// 对词元序列评分
    fn score_tokens(&self, tokens: &[String]) -> Result<Vec<f64>>;
}

/// 子词分词能力
pub trait SubwordTokenizer: Send + Sync {
    /// 将文本切分为子词词元
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// 实体扫描能力，返回带类别标签的发现列表
pub trait EntityScanner: Send + Sync {
    /// 扫描文本
    fn scan(&self, text: &str) -> Vec<Finding>;

    /// 扫描器名称
    fn name(&self) -> &str;
}

/// 模型解析器。
/// 按标识返回可直接使用的模型对象；标识未知时立即失败，不重试。
/// 解析在每次操作调用内即时发生，核心不做跨调用缓存。
pub trait ModelResolver: Send + Sync {
    /// 解析文本分类器（语言识别、垃圾分类等）
    fn text_classifier(&self, id: &str) -> Result<Arc<dyn TextClassifier>>;

    /// 解析按(语言, 语料域)键控的n-gram语言模型
    fn ngram_model(&self, language: &str, domain: &str) -> Result<Arc<dyn NgramModel>>;

    /// 解析神经评分器
    fn neural_scorer(&self, id: &str) -> Result<Arc<dyn NeuralScorer>>;

    /// 解析子词分词器
    fn tokenizer(&self, id: &str) -> Result<Arc<dyn SubwordTokenizer>>;
}
