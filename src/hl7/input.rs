//! Raw VarSeq report JSON as written by the report script.
//!
//! Nothing here is validated; conversion into typed records happens in
//! `context` and `variant`.

use indexmap::IndexMap;

/// Top-level report record.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Sample, patient and order information.
    pub sample_state: SampleState,
    /// Confirmed variants and signatures.
    #[serde(default)]
    pub biomarkers: Vec<Biomarker>,
    /// Germline variants, part of the uncertain pool.
    #[serde(default)]
    pub germline_variants: Vec<Variant>,
    /// Variants of uncertain significance.
    #[serde(default)]
    pub uncertain_variants: Vec<Variant>,
    /// Free-form fields configured in the VarSeq project.
    #[serde(default)]
    pub custom_fields: IndexMap<String, serde_json::Value>,
    /// Tumor type label.
    #[serde(default)]
    pub tumor_type: String,
    /// Tumor type abbreviation.
    #[serde(default)]
    pub tumor_type_abbrev: String,
    /// Coverage summary computed by the pipeline.
    #[serde(default)]
    pub coverage_summary: Option<CoverageSummary>,
}

impl Report {
    /// Return the custom field `name` as text; empty and `null` values count as absent.
    pub fn custom_field(&self, name: &str) -> Option<String> {
        match self.custom_fields.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleState {
    pub sample_name: String,
    pub mrn: String,
    pub patient_name: String,
    pub dob: String,
    #[serde(default)]
    pub sex: String,
    pub date_ordered: String,
    pub date_received: String,
    #[serde(default)]
    pub date_collected: Option<String>,
    #[serde(default)]
    pub ordering_physician: String,
    /// Name of the sequencing panel.
    #[serde(default)]
    pub panel: String,
}

/// Entry of the `biomarkers` list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Biomarker {
    #[serde(rename = "VARIANT")]
    Variant(Variant),
    #[serde(rename = "SIGNATURE")]
    Signature(Signature),
    #[serde(other)]
    Other,
}

/// Genomic signature such as MSI or TMB.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub gene_name: String,
    #[serde(default)]
    pub quantitative_value: Option<QuantitativeValue>,
}

/// Signature value; the report script writes either a number or a label.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum QuantitativeValue {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for QuantitativeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantitativeValue::Number(number) => write!(f, "{}", number),
            QuantitativeValue::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Chromosomal location of a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Mutation {
    pub chr: String,
}

/// Curated interpretation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BiomarkerSummary {
    #[serde(default)]
    pub interpretation: Option<String>,
}

/// Tag attached to a variant in VarSeq, e.g., `SM` or `GL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub initials: Option<String>,
}

/// Normal-sample allele fraction as written by the report script.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NormalAlleleFraction {
    Number(f64),
    Text(String),
}

/// One variant record, simple or structural.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    pub gene_name: String,
    pub p_dot_three_letter: Option<String>,
    pub c_dot: Option<String>,
    pub g_dot: Option<String>,
    pub hgvs_with_gene: Option<String>,
    pub ref_alt: Option<String>,
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub mutation: Option<Mutation>,
    pub transcript_name: Option<String>,
    pub protein_id: Option<String>,
    pub sequence_ontology: Option<String>,
    pub vaf: Option<f64>,
    pub alt_read_count: Option<u32>,
    pub read_depth: Option<u32>,
    /// Allele fraction of a structural call; its presence marks the variant structural.
    pub sv_vaf: Option<f64>,
    pub sv_read_count: Option<u32>,
    pub sv_length: Option<i64>,
    pub zygosity: Option<String>,
    pub biomarker_summary: Option<BiomarkerSummary>,
    pub tags: Vec<Tag>,
    pub assembly: Option<String>,
    pub exon: Option<String>,
    /// `None` if the key is absent, `Some(None)` for JSON `null`.
    #[serde(with = "::serde_with::rust::double_option")]
    pub naf: Option<Option<NormalAlleleFraction>>,
}

/// Coverage metrics of the tumor sample.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub pct20x: Option<f64>,
    pub pct200x: Option<f64>,
    pub pct500x: Option<f64>,
    pub mean_depth: Option<f64>,
}
