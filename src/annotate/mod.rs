// 标注模块 - 分析器与流水线控制器
// 保留输出命名空间（固定列名前缀）在此集中定义，
// 这些列由核心产出并持有，不属于用户数据

pub mod counter;
pub mod language;
pub mod matcher;
pub mod perplexity;
pub mod pii;
pub mod pipeline;
pub mod spam;


pub use counter::{CountMode, TokenCounter};
pub use language::LanguageTagger;
pub use matcher::TagMatcher;
pub use perplexity::{PerplexityBackend, PerplexityScorer};
pub use pii::{PiiDetector, RuleEntityScanner};
pub use pipeline::Annotator;
pub use spam::SpamClassifier;

/// 标签列前缀
pub const TAG_PREFIX: &str = "__tag__";
/// 语言列
pub const LANGUAGE_COLUMN: &str = "__language";
/// 困惑度列，两种后端共享
pub const PERPLEXITY_COLUMN: &str = "__perplexity";
/// PII类别列前缀
pub const PII_PREFIX: &str = "__pii__";
/// PII聚合列，任意类别命中即为真
pub const PII_ANY_COLUMN: &str = "__pii__any";
/// 拥有专属列的PII类别；其余类别只参与聚合列
pub const TRACKED_PII_CATEGORIES: [&str; 3] = ["email", "phone", "credential"];
/// SEO垃圾布尔列前缀
pub const SEO_SPAM_PREFIX: &str = "__seo_spam__";
/// SEO垃圾概率列前缀
pub const SEO_SPAM_PROB_PREFIX: &str = "__seo_spam_prob__";
/// 字节计数列前缀
pub const BYTE_COUNT_PREFIX: &str = "__byte_count__";
/// 词元计数列前缀
pub const TOKEN_COUNT_PREFIX: &str = "__token_count__";

/// 标签列名
pub fn tag_column(tag: &str) -> String {
    format!("{}{}", TAG_PREFIX, tag)
}

/// PII类别列名
pub fn pii_column(category: &str) -> String {
    format!("{}{}", PII_PREFIX, category)
}

/// SEO垃圾布尔列名
pub fn seo_spam_column(field: &str) -> String {
    format!("{}{}", SEO_SPAM_PREFIX, field)
}

/// SEO垃圾概率列名
pub fn seo_spam_prob_column(field: &str) -> String {
    format!("{}{}", SEO_SPAM_PROB_PREFIX, field)
}

#[cfg(test)]
mod name_tests {
    use super::*;

    #[test]
    fn test_reserved_column_names() {
        assert_eq!(tag_column("junk"), "__tag__junk");
        assert_eq!(pii_column("email"), "__pii__email");
        assert_eq!(seo_spam_column("body"), "__seo_spam__body");
        assert_eq!(seo_spam_prob_column("body"), "__seo_spam_prob__body");
        assert_eq!(PII_ANY_COLUMN, "__pii__any");
    }
}
