// 模型注册表
// 内存实现的模型解析器，按标识注册与查找各类模型对象

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::model::{ModelResolver, NeuralScorer, NgramModel, SubwordTokenizer, TextClassifier};

/// 内存模型注册表
#[derive(Default)]
pub struct ModelRegistry {
    /// 文本分类器
    classifiers: HashMap<String, Arc<dyn TextClassifier>>,
    /// n-gram模型，按(语言, 语料域)键控
    ngram_models: HashMap<(String, String), Arc<dyn NgramModel>>,
    /// 神经评分器
    scorers: HashMap<String, Arc<dyn NeuralScorer>>,
    /// 子词分词器
    tokenizers: HashMap<String, Arc<dyn SubwordTokenizer>>,
}

impl ModelRegistry {
    /// 创建新的模型注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册文本分类器
    pub fn register_text_classifier(
        &mut self,
        id: impl Into<String>,
        classifier: Arc<dyn TextClassifier>,
    ) -> &mut Self {
        let id = id.into();
        debug!("注册文本分类器: {}", id);
        self.classifiers.insert(id, classifier);
        self
    }

    /// 注册n-gram模型
    pub fn register_ngram_model(
        &mut self,
        language: impl Into<String>,
        domain: impl Into<String>,
        model: Arc<dyn NgramModel>,
    ) -> &mut Self {
        let key = (language.into(), domain.into());
        debug!("注册n-gram模型: ({}, {})", key.0, key.1);
        self.ngram_models.insert(key, model);
        self
    }

    /// 注册神经评分器
    pub fn register_neural_scorer(
        &mut self,
        id: impl Into<String>,
        scorer: Arc<dyn NeuralScorer>,
    ) -> &mut Self {
        let id = id.into();
        debug!("注册神经评分器: {}", id);
        self.scorers.insert(id, scorer);
        self
    }

    /// 注册子词分词器
    pub fn register_tokenizer(
        &mut self,
        id: impl Into<String>,
        tokenizer: Arc<dyn SubwordTokenizer>,
    ) -> &mut Self {
        let id = id.into();
        debug!("注册子词分词器: {}", id);
        self.tokenizers.insert(id, tokenizer);
        self
    }

    /// 链式注册文本分类器
    pub fn with_text_classifier(
        mut self,
        id: impl Into<String>,
        classifier: Arc<dyn TextClassifier>,
    ) -> Self {
        self.register_text_classifier(id, classifier);
        self
    }

    /// 链式注册n-gram模型
    pub fn with_ngram_model(
        mut self,
        language: impl Into<String>,
        domain: impl Into<String>,
        model: Arc<dyn NgramModel>,
    ) -> Self {
        self.register_ngram_model(language, domain, model);
        self
    }

    /// 链式注册神经评分器
    pub fn with_neural_scorer(
        mut self,
        id: impl Into<String>,
        scorer: Arc<dyn NeuralScorer>,
    ) -> Self {
        self.register_neural_scorer(id, scorer);
        self
    }

    /// 链式注册子词分词器
    pub fn with_tokenizer(
        mut self,
        id: impl Into<String>,
        tokenizer: Arc<dyn SubwordTokenizer>,
    ) -> Self {
        self.register_tokenizer(id, tokenizer);
        self
    }
}

impl ModelResolver for ModelRegistry {
    fn text_classifier(&self, id: &str) -> Result<Arc<dyn TextClassifier>> {
        self.classifiers
            .get(id)
            .cloned()
            .ok_or_else(|| Error::model(format!("text classifier '{}' is not registered", id)))
    }

    fn ngram_model(&self, language: &str, domain: &str) -> Result<Arc<dyn NgramModel>> {
        self.ngram_models
            .get(&(language.to_string(), domain.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::model(format!(
                    "ngram model for language '{}' and domain '{}' is not registered",
                    language, domain
                ))
            })
    }

    fn neural_scorer(&self, id: &str) -> Result<Arc<dyn NeuralScorer>> {
        self.scorers
            .get(id)
            .cloned()
            .ok_or_else(|| Error::model(format!("neural scorer '{}' is not registered", id)))
    }

    fn tokenizer(&self, id: &str) -> Result<Arc<dyn SubwordTokenizer>> {
        self.tokenizers
            .get(id)
            .cloned()
            .ok_or_else(|| Error::model(format!("tokenizer '{}' is not registered", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Prediction;

    struct FixedClassifier;

    impl TextClassifier for FixedClassifier {
        fn predict(&self, _text: &str) -> Result<Vec<Prediction>> {
            Ok(vec![Prediction::new("en", 0.99)])
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let registry =
            ModelRegistry::new().with_text_classifier("lid-176", Arc::new(FixedClassifier));
        let classifier = registry.text_classifier("lid-176").unwrap();
        assert_eq!(classifier.name(), "fixed");
    }

    #[test]
    fn test_unknown_id_fails_fatally() {
        let registry = ModelRegistry::new();
        assert!(matches!(
            registry.text_classifier("missing"),
            Err(Error::Model(_))
        ));
        assert!(matches!(
            registry.ngram_model("en", "wikipedia"),
            Err(Error::Model(_))
        ));
        assert!(matches!(registry.tokenizer("missing"), Err(Error::Model(_))));
    }
}
