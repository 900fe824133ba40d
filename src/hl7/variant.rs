//! Typed variant records, resolved once from the raw report entries.

use crate::err::{EncodeError, Subject};

use super::input;

/// Input collection a variant was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pool {
    /// Clinically significant `biomarkers` variants.
    Confirmed,
    /// `germlineVariants` and `uncertainVariants`.
    Uncertain,
}

impl Pool {
    /// The tier label reported for variants of this pool.
    pub fn tier(self) -> &'static str {
        match self {
            Pool::Confirmed => "Tier 1: Strong significance",
            Pool::Uncertain => "Tier 3: Unknown clinical significance",
        }
    }
}

/// Genomic source class derived from the variant's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Origin {
    Somatic,
    Germline,
    Unknown,
}

impl Origin {
    /// Exactly one recognized tag decides; anything else is `Unknown`.
    pub fn from_tags(tags: &[input::Tag]) -> Self {
        match tags {
            [tag] => match tag.initials.as_deref() {
                Some("SM") => Origin::Somatic,
                Some("GL") => Origin::Germline,
                _ => Origin::Unknown,
            },
            _ => Origin::Unknown,
        }
    }
}

/// Allele fraction observed in the matched normal sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalAlleleFraction {
    /// Not measured or rounds to zero.
    BelowDetection,
    /// Measured value, not yet rounded.
    Value(f64),
}

/// Kind-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantKind {
    /// SNVs and small indels.
    Simple { alt_read_count: Option<u32> },
    /// Structural variants.
    Structural {
        supporting_reads: Option<u32>,
        length: Option<i64>,
    },
}

/// A variant ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub gene: String,
    /// Three-letter protein change, `None` if unknown.
    pub protein_change: Option<String>,
    pub coding_change: String,
    pub genomic_change: String,
    pub hgvs_with_gene: String,
    /// Reference allele as given, gaps included.
    pub reference: String,
    /// Alternate allele as given, gaps included.
    pub alternate: String,
    /// Start in the input's 0-based convention.
    pub start: i64,
    /// Stop in the input's 0-based convention.
    pub stop: i64,
    pub chromosome: String,
    pub transcript: String,
    pub protein_accession: String,
    /// Sequence Ontology term.
    pub consequence_term: String,
    /// Allele fraction, or the alt/total read ratio if not reported.
    pub allele_fraction: f64,
    pub kind: VariantKind,
    pub zygosity: Option<String>,
    pub interpretation: Option<String>,
    pub origin: Origin,
    pub pool: Pool,
    pub assembly: String,
    /// Exon or region text.
    pub region: Option<String>,
    /// `None` if the report carries no normal allele fraction for this variant.
    pub normal_allele_fraction: Option<NormalAlleleFraction>,
}

/// Drop `None` and blank strings.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl VariantRecord {
    /// Convert a raw report entry.
    pub fn from_input(
        subject: &Subject,
        raw: &input::Variant,
        pool: Pool,
    ) -> Result<Self, EncodeError> {
        let label = format!(
            "{} {}",
            raw.gene_name,
            raw.c_dot.as_deref().unwrap_or_default()
        );

        let ref_alt = raw
            .ref_alt
            .as_deref()
            .ok_or_else(|| subject.malformed(format!("variant {} has no refAlt", label)))?;
        let (reference, alternate) = ref_alt.split_once('/').ok_or_else(|| {
            subject.malformed(format!("invalid refAlt {:?} of variant {}", ref_alt, label))
        })?;
        let (start, stop) = match (raw.start, raw.stop) {
            (Some(start), Some(stop)) => (start, stop),
            _ => {
                return Err(subject.malformed(format!("variant {} lacks start/stop", label)));
            }
        };

        let (allele_fraction, kind) = match raw.sv_vaf {
            Some(sv_vaf) => (
                sv_vaf,
                VariantKind::Structural {
                    supporting_reads: raw.sv_read_count,
                    length: raw.sv_length,
                },
            ),
            None => {
                let allele_fraction = match (raw.vaf, raw.alt_read_count, raw.read_depth) {
                    (Some(vaf), _, _) => vaf,
                    (None, Some(alt), Some(depth)) if depth > 0 => alt as f64 / depth as f64,
                    _ => return Err(EncodeError::MissingAlleleFraction { variant: label }),
                };
                (
                    allele_fraction,
                    VariantKind::Simple {
                        alt_read_count: raw.alt_read_count,
                    },
                )
            }
        };

        let normal_allele_fraction = match &raw.naf {
            None => None,
            Some(None) => Some(NormalAlleleFraction::BelowDetection),
            Some(Some(input::NormalAlleleFraction::Number(value))) => {
                Some(NormalAlleleFraction::Value(*value))
            }
            Some(Some(input::NormalAlleleFraction::Text(text))) => match text.trim() {
                "null" | "" => Some(NormalAlleleFraction::BelowDetection),
                text => Some(NormalAlleleFraction::Value(text.parse().map_err(|_| {
                    subject.malformed(format!("invalid naf {:?} of variant {}", text, label))
                })?)),
            },
        };

        Ok(Self {
            gene: raw.gene_name.clone(),
            protein_change: non_blank(&raw.p_dot_three_letter).filter(|p| p != "p.?"),
            coding_change: raw.c_dot.clone().unwrap_or_default(),
            genomic_change: raw.g_dot.clone().unwrap_or_default(),
            hgvs_with_gene: raw.hgvs_with_gene.clone().unwrap_or_default(),
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            start,
            stop,
            chromosome: raw
                .mutation
                .as_ref()
                .map(|mutation| mutation.chr.clone())
                .unwrap_or_default(),
            transcript: raw.transcript_name.clone().unwrap_or_default(),
            protein_accession: raw.protein_id.clone().unwrap_or_default(),
            consequence_term: raw.sequence_ontology.clone().unwrap_or_default(),
            allele_fraction,
            kind,
            zygosity: non_blank(&raw.zygosity),
            interpretation: raw
                .biomarker_summary
                .as_ref()
                .and_then(|summary| non_blank(&summary.interpretation)),
            origin: Origin::from_tags(&raw.tags),
            pool,
            assembly: non_blank(&raw.assembly).unwrap_or_else(|| "GRCh38".to_string()),
            region: non_blank(&raw.exon),
            normal_allele_fraction,
        })
    }

    /// Short human readable label for messages.
    pub fn label(&self) -> String {
        format!("{} {}", self.gene, self.coding_change)
    }

    /// Whether the variant is a structural variant.
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, VariantKind::Structural { .. })
    }

    /// Whether ref and alt have the same length once gaps are removed.
    pub fn is_substitution(&self) -> bool {
        let trimmed_len = |allele: &str| allele.chars().filter(|c| *c != '-').count();
        trimmed_len(&self.reference) == trimmed_len(&self.alternate)
    }

    /// 1-based, fully closed start and stop.
    ///
    /// Zero-length insertions keep their start and extend the stop instead.
    pub fn one_based_range(&self) -> (i64, i64) {
        if self.start == self.stop {
            (self.start, self.stop + 1)
        } else {
            (self.start + 1, self.stop)
        }
    }
}
