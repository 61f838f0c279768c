//! FAQ corpus loading and the read-only record index.
//!
//! Loading runs an ordered list of strategies: the primary UTF-8 read, a
//! lossy re-decode of the same bytes, and finally the built-in sample. The
//! first strategy that yields records wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{FaqRecord, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStrategy {
    Primary(PathBuf),
    LossyDecode(PathBuf),
    BuiltinSample,
}

impl LoadStrategy {
    /// File strategies for `path`, in the order they are tried.
    pub fn for_path(path: &Path) -> Vec<LoadStrategy> {
        vec![LoadStrategy::Primary(path.to_path_buf()), LoadStrategy::LossyDecode(path.to_path_buf())]
    }

    pub fn attempt(&self) -> Result<Vec<FaqRecord>> {
        match self {
            LoadStrategy::Primary(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| Error::Data(format!("cannot read {}: {}", path.display(), e)))?;
                parse_document(&text)
            }
            LoadStrategy::LossyDecode(path) => {
                let bytes = fs::read(path).map_err(|e| Error::Data(format!("cannot read {}: {}", path.display(), e)))?;
                let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(&bytes[..]);
                parse_document(&String::from_utf8_lossy(bytes))
            }
            LoadStrategy::BuiltinSample => Ok(sample_records()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            LoadStrategy::Primary(path) => format!("file:{}", path.display()),
            LoadStrategy::LossyDecode(path) => format!("file-lossy:{}", path.display()),
            LoadStrategy::BuiltinSample => "builtin-sample".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct FaqDocument {
    faqs: Option<Vec<FaqRecord>>,
}

/// Parse a `{"faqs": [...]}` document.
pub fn parse_document(text: &str) -> Result<Vec<FaqRecord>> {
    let doc: FaqDocument = serde_json::from_str(text).map_err(|e| Error::Data(format!("invalid JSON: {}", e)))?;
    let records = doc.faqs.ok_or_else(|| Error::Data("missing 'faqs' collection".to_string()))?;
    if records.is_empty() {
        return Err(Error::Data("'faqs' collection is empty".to_string()));
    }
    Ok(records)
}

/// Whether a flattened question is the canonical one or a paraphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Original,
    Possible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatQuestion<'a> {
    pub record: RecordId,
    pub text: &'a str,
    pub kind: VariantKind,
}

/// Immutable, index-addressed FAQ records with a category grouping.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<FaqRecord>,
    category_order: Vec<String>,
    by_category: HashMap<String, Vec<RecordId>>,
    source: LoadStrategy,
}

impl Corpus {
    pub fn from_records(records: Vec<FaqRecord>, source: LoadStrategy) -> Self {
        let mut category_order = Vec::new();
        let mut by_category: HashMap<String, Vec<RecordId>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            let entry = by_category.entry(record.category.clone()).or_default();
            if entry.is_empty() { category_order.push(record.category.clone()); }
            entry.push(idx);
        }
        Self { records, category_order, by_category, source }
    }

    /// Load from a JSON file, trying each file strategy in turn.
    pub fn load(path: &Path) -> Result<Self> {
        let mut last_err = Error::Data(format!("no loader accepted {}", path.display()));
        for strategy in LoadStrategy::for_path(path) {
            match strategy.attempt() {
                Ok(records) => {
                    info!(source = %strategy.label(), records = records.len(), "loaded FAQ corpus");
                    return Ok(Self::from_records(records, strategy));
                }
                Err(e) => {
                    warn!(source = %strategy.label(), error = %e, "corpus loader failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    /// Like [`Corpus::load`], but never fails: falls back to the built-in sample.
    pub fn load_or_sample(path: &Path) -> Self {
        match Self::load(path) {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(error = %e, "falling back to built-in sample corpus");
                Self::sample()
            }
        }
    }

    pub fn sample() -> Self { Self::from_records(sample_records(), LoadStrategy::BuiltinSample) }

    pub fn source(&self) -> &LoadStrategy { &self.source }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, id: RecordId) -> Option<&FaqRecord> { self.records.get(id) }

    pub fn for_each_record(&self) -> impl Iterator<Item = (RecordId, &FaqRecord)> + '_ {
        self.records.iter().enumerate()
    }

    /// `[canonical_question] + question_variants`.
    pub fn question_variants_of(&self, id: RecordId) -> Vec<&str> {
        self.records
            .get(id)
            .map(|r| std::iter::once(r.canonical_question.as_str()).chain(r.question_variants.iter().map(String::as_str)).collect())
            .unwrap_or_default()
    }

    /// All variants of a record joined by single spaces.
    pub fn combined_question_text(&self, id: RecordId) -> String { self.question_variants_of(id).join(" ") }

    /// Every question variant in corpus order.
    pub fn questions(&self) -> impl Iterator<Item = FlatQuestion<'_>> + '_ {
        self.records.iter().enumerate().flat_map(|(record, r)| {
            std::iter::once(FlatQuestion { record, text: r.canonical_question.as_str(), kind: VariantKind::Original })
                .chain(r.question_variants.iter().map(move |q| FlatQuestion { record, text: q.as_str(), kind: VariantKind::Possible }))
        })
    }

    pub fn total_questions(&self) -> usize { self.records.iter().map(|r| 1 + r.question_variants.len()).sum() }

    pub fn by_category(&self, category: &str) -> &[RecordId] {
        self.by_category.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct categories with record counts, in order of first appearance.
    pub fn categories(&self) -> Vec<(String, usize)> {
        self.category_order
            .iter()
            .map(|c| (c.clone(), self.by_category.get(c).map_or(0, Vec::len)))
            .collect()
    }
}

fn sample_records() -> Vec<FaqRecord> {
    vec![
        FaqRecord::new(
            "General",
            "Hi",
            "Hello, How may I help you?",
            &[
                "Hello, are you there?",
                "Hey there, can you help me?",
                "Hi, I need some assistance.",
                "Greetings, how can you help me?",
            ],
        ),
        FaqRecord::new(
            "Admissions",
            "What are the admission requirements for undergraduate programs at UMT?",
            "Admission requirements at UMT for undergraduate programs include:\n\
             - Minimum 50% marks in FSc, ICS, or Intermediate with Physics\n\
             - Minimum 50% marks in UMT entrance test\n\
             - No third division in matriculation\n\
             - Application fee: Rs. 25,000\n\
             - Required documents: Unofficial transcript, Hope Certificate, Two photographs, CNIC copies",
            &[
                "What are the criteria for undergraduate admission at UMT?",
                "What qualifications do I need to apply for an undergraduate program?",
                "Can you outline the admission requirements for UMT undergrad programs?",
                "How can I get admission in UMT for software engineering?",
                "What do I need to apply for an undergraduate program at UMT?",
            ],
        ),
        FaqRecord::new(
            "Academic",
            "What is GPA and how is it computed?",
            "GPA represents a participant's performance in a semester. It is calculated by converting letter grades \
             to grade points, multiplying these by the credit hours for each course, and dividing the total grade \
             points by the total credit hours. GPA ranges from 0 to 4.00.",
            &[
                "Can you explain what GPA means and how to calculate it?",
                "How do I compute my GPA?",
                "what is GPA",
                "What does GPA stand for and how is it determined?",
            ],
        ),
    ]
}
