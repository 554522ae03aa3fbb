// PII检测器
// 基于规则的实体扫描与固定类别列产出

use lazy_static::lazy_static;
use regex::Regex;

use crate::annotate::{pii_column, PII_ANY_COLUMN, TRACKED_PII_CATEGORIES};
use crate::data::record::Record;
use crate::data::value::FieldValue;
use crate::model::{EntityScanner, Finding};
use crate::text::coerce_text;

lazy_static! {
    /// 邮箱地址
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    /// 电话号码（可选国家码 + 分隔的三段数字）
    static ref PHONE_REGEX: Regex =
        Regex::new(r"(?:\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]\d{3}[-. ]\d{4}\b").unwrap();
    /// 凭据：常见秘密关键词后跟取值
    static ref CREDENTIAL_REGEX: Regex =
        Regex::new(r#"(?i)\b(?:password|passwd|pwd|api[_-]?key|secret|token)\b\s*[:=]\s*\S+"#)
            .unwrap();
    /// URL，未跟踪类别，只参与聚合列
    static ref URL_REGEX: Regex = Regex::new(r"https?://[^\s<>]+").unwrap();
    /// IPv4地址，未跟踪类别
    static ref IPV4_REGEX: Regex =
        Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap();
}

/// 基于规则的实体扫描器。
/// 每条规则产出一个类别；email/phone/credential为跟踪类别，
/// url/ipv4等只影响聚合标志。
#[derive(Debug, Clone, Default)]
pub struct RuleEntityScanner;

impl RuleEntityScanner {
    /// 创建新的规则扫描器
    pub fn new() -> Self {
        Self
    }
}

impl EntityScanner for RuleEntityScanner {
    fn scan(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for m in EMAIL_REGEX.find_iter(text) {
            findings.push(Finding::new("email", m.as_str()));
        }
        for m in PHONE_REGEX.find_iter(text) {
            findings.push(Finding::new("phone", m.as_str()));
        }
        for m in CREDENTIAL_REGEX.find_iter(text) {
            findings.push(Finding::new("credential", m.as_str()));
        }
        for m in URL_REGEX.find_iter(text) {
            findings.push(Finding::new("url", m.as_str()));
        }
        for m in IPV4_REGEX.find_iter(text) {
            findings.push(Finding::new("ipv4", m.as_str()));
        }
        findings
    }

    fn name(&self) -> &str {
        "rule"
    }
}

/// PII检测器：跨字段收集发现并按固定类别集聚合。
/// 字段不做存在性预检，行内缺失的字段直接排除在扫描之外。
pub struct PiiDetector {
    /// 实体扫描器
    scanner: Box<dyn EntityScanner>,
    /// 待扫描字段
    fields: Vec<String>,
}

impl PiiDetector {
    /// 创建新的PII检测器
    pub fn new(scanner: Box<dyn EntityScanner>, fields: &[&str]) -> Self {
        Self {
            scanner,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// 扫描单行。
    /// 每个跟踪类别产出一个布尔列；聚合列对任意类别的发现
    /// （包括未跟踪类别）为真。
    pub fn detect(&self, record: &Record) -> Vec<(String, FieldValue)> {
        let mut findings: Vec<Finding> = Vec::new();
        for field in &self.fields {
            if !record.has_field(field) {
                continue;
            }
            if let Some(value) = record.get(field) {
                findings.extend(self.scanner.scan(&coerce_text(value)));
            }
        }

        let mut columns = Vec::with_capacity(TRACKED_PII_CATEGORIES.len() + 1);
        for category in TRACKED_PII_CATEGORIES {
            let hit = findings.iter().any(|f| f.category == category);
            columns.push((pii_column(category), FieldValue::Boolean(hit)));
        }
        columns.push((
            PII_ANY_COLUMN.to_string(),
            FieldValue::Boolean(!findings.is_empty()),
        ));
        columns
    }
}
