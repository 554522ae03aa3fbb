// 流水线控制器
// 持有当前数据集，调度各分析器，执行列命名与覆盖策略，
// 每个操作返回控制器自身以支持链式调用

use std::sync::Arc;

use log::{info, warn};

use crate::annotate::counter::{CountMode, TokenCounter};
use crate::annotate::language::LanguageTagger;
use crate::annotate::matcher::TagMatcher;
use crate::annotate::perplexity::{PerplexityBackend, PerplexityScorer};
use crate::annotate::pii::{PiiDetector, RuleEntityScanner};
use crate::annotate::spam::SpamClassifier;
use crate::annotate::{LANGUAGE_COLUMN, PERPLEXITY_COLUMN};
use crate::data::dataset::Dataset;
use crate::data::schema::FieldType;
use crate::data::value::FieldValue;
use crate::error::{Error, Result};
use crate::model::{ModelResolver, LANGUAGE_ID_MODEL, SEO_SPAM_MODEL};

/// 标注流水线控制器。
///
/// 每个操作：(a) 按自身规则校验字段/类型，(b) 即时构建所需分析器，
/// (c) 通过按行映射派生结果，(d) 用合并结果整体替换数据集引用，
/// (e) 返回控制器自身以支持 `ann.op1(..)?.op2(..)?` 链式调用。
/// 校验失败在任何行映射之前返回；行映射失败使整个操作失败，
/// 数据集保持先前状态。
pub struct Annotator {
    /// 当前数据集
    dataset: Dataset,
    /// 模型解析器。分析器对象每次操作即时解析，不在控制器上缓存
    resolver: Arc<dyn ModelResolver>,
}

impl Annotator {
    /// 创建新的标注流水线
    pub fn new(dataset: Dataset, resolver: Arc<dyn ModelResolver>) -> Self {
        Self { dataset, resolver }
    }

    /// 当前数据集
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// 取出数据集，消耗控制器
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// 字段必须存在于数据集模式中
    fn require_field(&self, field: &str) -> Result<()> {
        if !self.dataset.has_column(field) {
            return Err(Error::field_not_found(format!(
                "field '{}' not found in dataset",
                field
            )));
        }
        Ok(())
    }

    /// 字段必须存在且为文本类型
    fn require_text_field(&self, field: &str) -> Result<()> {
        self.require_field(field)?;
        match self.dataset.column_type(field) {
            Some(FieldType::Text) => Ok(()),
            Some(other) => Err(Error::type_mismatch(format!(
                "field '{}' has type {}, expected text",
                field,
                other.name()
            ))),
            None => Err(Error::internal(format!(
                "field '{}' passed existence check but has no column",
                field
            ))),
        }
    }

    /// 标签列已存在时发出非致命覆盖警告
    fn warn_if_tag_overwrite(&self, column: &str) {
        if self.dataset.has_column(column) {
            warn!("标签列 {} 已存在，本次操作将覆盖原值", column);
        }
    }

    /// 精确字符串打标。
    /// 字面值转义后联合成单个模式，大小写敏感的子串匹配；
    /// 行内缺失的字段跳过，不是错误。
    pub fn tag_string(
        &mut self,
        fields: &[&str],
        values: &[&str],
        tag: &str,
    ) -> Result<&mut Self> {
        let matcher = TagMatcher::from_literals(fields, values, tag)?;
        self.warn_if_tag_overwrite(matcher.column());
        let mapped = self.dataset.map_rows(|record| {
            Ok(vec![(
                matcher.column().to_string(),
                FieldValue::Boolean(matcher.matches(record)),
            )])
        })?;
        self.dataset = mapped;
        info!(
            "Tagged dataset in-place with exact string matching on fields {:?}, wrote column {}",
            fields,
            matcher.column()
        );
        Ok(self)
    }

    /// 正则打标，模式按原样使用
    pub fn tag_regex(&mut self, fields: &[&str], regex: &str, tag: &str) -> Result<&mut Self> {
        let matcher = TagMatcher::from_pattern(fields, regex, tag)?;
        self.warn_if_tag_overwrite(matcher.column());
        let mapped = self.dataset.map_rows(|record| {
            Ok(vec![(
                matcher.column().to_string(),
                FieldValue::Boolean(matcher.matches(record)),
            )])
        })?;
        self.dataset = mapped;
        info!(
            "Tagged dataset in-place with regex matching on fields {:?}, wrote column {}",
            fields,
            matcher.column()
        );
        Ok(self)
    }

    /// 语言识别。
    /// 字段缺失是硬校验错误，在任何行处理之前抛出
    /// （与匹配器的按行跳过策略不同，有意保留的不对称）。
    pub fn detect_language(&mut self, field: &str) -> Result<&mut Self> {
        self.require_field(field)?;
        let classifier = self.resolver.text_classifier(LANGUAGE_ID_MODEL)?;
        let tagger = LanguageTagger::new(classifier, field);
        let mapped = self.dataset.map_rows(|record| {
            Ok(vec![(
                LANGUAGE_COLUMN.to_string(),
                FieldValue::String(tagger.detect(record)?),
            )])
        })?;
        self.dataset = mapped;
        info!(
            "Detected language in field {}, wrote column {}",
            field, LANGUAGE_COLUMN
        );
        Ok(self)
    }

    /// 困惑度计算。
    /// 字段必须存在且为文本类型；后端配置在此穷尽匹配。
    /// 两种后端写同一列，换后端重写不发警告（与标签覆盖策略相反）。
    pub fn calc_perplexity(
        &mut self,
        field: &str,
        backend: PerplexityBackend,
    ) -> Result<&mut Self> {
        self.require_text_field(field)?;
        let scorer = PerplexityScorer::build(&backend, self.resolver.as_ref())?;
        let target = field.to_string();
        let mapped = self.dataset.map_rows(|record| {
            let value = record.get(&target).cloned().unwrap_or(FieldValue::Null);
            let text = crate::text::coerce_text(&value);
            Ok(vec![(
                PERPLEXITY_COLUMN.to_string(),
                FieldValue::Float(scorer.score(&text)?),
            )])
        })?;
        self.dataset = mapped;
        info!(
            "Calculated perplexity-per-byte in field {}, wrote column {}",
            field, PERPLEXITY_COLUMN
        );
        Ok(self)
    }

    /// PII检测。
    /// 字段不做存在性预检；行内缺失字段不参与该行扫描。
    /// 操作始终原地变更，无非破坏性变体。
    pub fn detect_pii(&mut self, fields: &[&str]) -> Result<&mut Self> {
        let detector = PiiDetector::new(Box::new(RuleEntityScanner::new()), fields);
        let mapped = self.dataset.map_rows(|record| Ok(detector.detect(record)))?;
        self.dataset = mapped;
        info!(
            "Detected PII in fields {:?}; wrote __pii__email, __pii__phone, __pii__credential and __pii__any",
            fields
        );
        Ok(self)
    }

    /// SEO垃圾检测。
    /// 字段必须存在且为文本类型；输出列按字段名参数化，
    /// 多个字段可独立评分互不冲突。
    pub fn detect_seo_spam(&mut self, field: &str) -> Result<&mut Self> {
        self.require_text_field(field)?;
        let classifier =
            SpamClassifier::new(self.resolver.text_classifier(SEO_SPAM_MODEL)?, field);
        let mapped = self
            .dataset
            .map_rows(|record| classifier.classify(record))?;
        self.dataset = mapped;
        info!(
            "Detected SEO spam in field {}; wrote __seo_spam__{} and __seo_spam_prob__{}",
            field, field, field
        );
        Ok(self)
    }

    /// 词元/字节计数。
    /// 每个声明字段必须存在于模式中；无分词器时计字节数，
    /// 给定分词器名时解析子词分词器并计词元数。
    pub fn count_tokens(&mut self, fields: &[&str], tokenizer: Option<&str>) -> Result<&mut Self> {
        for field in fields {
            self.require_field(field)?;
        }
        let mode = match tokenizer {
            None => CountMode::Bytes,
            Some(id) => CountMode::Subword(self.resolver.tokenizer(id)?),
        };
        let counter = TokenCounter::new(mode, fields);
        let prefix = counter.prefix();
        let mapped = self.dataset.map_rows(|record| counter.count(record))?;
        self.dataset = mapped;
        info!(
            "Counted tokens in fields {:?}, wrote columns with prefix {}",
            fields, prefix
        );
        Ok(self)
    }
}
