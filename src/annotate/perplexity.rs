// 困惑度评分器
// 双后端文档评分：统计n-gram或神经检查点，共享 __perplexity 列

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{
    ModelResolver, NeuralScorer, SubwordTokenizer, NEURAL_SCORER_MODEL, NEURAL_TOKENIZER,
};
use crate::model::NgramModel;
use crate::text::byte_len;

/// 困惑度后端配置。
/// 每个变体只携带自己的参数，在构建处穷尽匹配，
/// 不存在的后端名无法表达。
#[derive(Debug, Clone)]
pub enum PerplexityBackend {
    /// 统计n-gram后端。
    /// 语言与语料域必须同时给定，只给其一是配置错误。
    Statistical {
        /// 语言码，如 "en"
        language: Option<String>,
        /// 参考语料域，如 "wikipedia"
        domain: Option<String>,
    },
    /// 神经后端，使用固定预训练检查点。
    /// 变体不携带语言/语料域参数，给定与否由构造决定，评分时一概忽略。
    Neural,
}

impl PerplexityBackend {
    /// 语言与语料域齐备的统计后端
    pub fn statistical(language: impl Into<String>, domain: impl Into<String>) -> Self {
        PerplexityBackend::Statistical {
            language: Some(language.into()),
            domain: Some(domain.into()),
        }
    }

    /// 神经后端
    pub fn neural() -> Self {
        PerplexityBackend::Neural
    }
}

/// 构建好的困惑度评分器，每次操作调用新建，不跨调用缓存
pub enum PerplexityScorer {
    /// 统计后端，委托给外部n-gram模型
    Statistical(Arc<dyn NgramModel>),
    /// 神经后端，分词 + 单次评分
    Neural {
        scorer: Arc<dyn NeuralScorer>,
        tokenizer: Arc<dyn SubwordTokenizer>,
    },
}

impl PerplexityScorer {
    /// 按后端配置解析所需模型
    pub fn build(backend: &PerplexityBackend, resolver: &dyn ModelResolver) -> Result<Self> {
        match backend {
            PerplexityBackend::Statistical { language, domain } => match (language, domain) {
                (Some(language), Some(domain)) => Ok(PerplexityScorer::Statistical(
                    resolver.ngram_model(language, domain)?,
                )),
                _ => Err(Error::config(
                    "statistical perplexity backend requires both language and domain",
                )),
            },
            PerplexityBackend::Neural => Ok(PerplexityScorer::Neural {
                scorer: resolver.neural_scorer(NEURAL_SCORER_MODEL)?,
                tokenizer: resolver.tokenizer(NEURAL_TOKENIZER)?,
            }),
        }
    }

    /// 对单条文本评分。
    /// 统计后端的返回值已按字节长度归一化；
    /// 神经后端计算 exp(-sum(log_probs) / byte_len(原始文本))，
    /// 分母是原始未分词文本的字节长度，不是词元数。
    pub fn score(&self, text: &str) -> Result<f64> {
        match self {
            PerplexityScorer::Statistical(model) => model.perplexity(text),
            PerplexityScorer::Neural { scorer, tokenizer } => {
                let tokens = tokenizer.tokenize(text)?;
                let log_probs = scorer.score_tokens(&tokens)?;
                let total: f64 = log_probs.iter().sum();
                Ok((-total / byte_len(text) as f64).exp())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRegistry;

    struct ByteLenNgram;

    impl NgramModel for ByteLenNgram {
        fn perplexity(&self, text: &str) -> Result<f64> {
            Ok(byte_len(text) as f64)
        }
    }

    struct WhitespaceTokenizer;

    impl SubwordTokenizer for WhitespaceTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            Ok(text.split_whitespace().map(|t| t.to_string()).collect())
        }
    }

    struct UnitScorer;

    impl NeuralScorer for UnitScorer {
        fn score_tokens(&self, tokens: &[String]) -> Result<Vec<f64>> {
            Ok(vec![-1.0; tokens.len()])
        }
    }

    fn registry() -> ModelRegistry {
        ModelRegistry::new()
            .with_ngram_model("en", "wikipedia", Arc::new(ByteLenNgram))
            .with_neural_scorer(NEURAL_SCORER_MODEL, Arc::new(UnitScorer))
            .with_tokenizer(NEURAL_TOKENIZER, Arc::new(WhitespaceTokenizer))
    }

    #[test]
    fn test_statistical_requires_both_parameters() {
        let backend = PerplexityBackend::Statistical {
            language: Some("en".to_string()),
            domain: None,
        };
        let result = PerplexityScorer::build(&backend, &registry());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_statistical_delegates_to_ngram_model() {
        let backend = PerplexityBackend::statistical("en", "wikipedia");
        let scorer = PerplexityScorer::build(&backend, &registry()).unwrap();
        assert_eq!(scorer.score("héllo").unwrap(), 6.0);
    }

    #[test]
    fn test_unknown_ngram_key_fails() {
        let backend = PerplexityBackend::statistical("fr", "oscar");
        assert!(matches!(
            PerplexityScorer::build(&backend, &registry()),
            Err(Error::Model(_))
        ));
    }

    #[test]
    fn test_neural_normalizes_by_byte_length() {
        let scorer = PerplexityScorer::build(&PerplexityBackend::neural(), &registry()).unwrap();
        // "ab cd": 2个词元，每个对数概率-1，字节长度5
        let expected = (2.0_f64 / 5.0).exp();
        let actual = scorer.score("ab cd").unwrap();
        assert!((actual - expected).abs() < 1e-12);
    }
}
