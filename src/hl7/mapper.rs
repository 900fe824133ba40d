//! Mapping of one variant to its ordered result segments.

use itertools::Itertools;

use crate::err::EncodeError;

use super::context::{format_decimal, round2};
use super::segment::SegmentBuilder;
use super::tables::{self, codes};
use super::variant::{NormalAlleleFraction, VariantKind, VariantRecord};

/// Placeholder for an unknown protein change.
pub const UNKNOWN_PROTEIN_CHANGE: &str = "p.?";
/// Rendered for normal allele fractions below the limit of detection.
pub const BELOW_DETECTION: &str = "<LoD";
/// Value of the variant assessment segment.
pub const DETECTED: &str = "Detected";
/// Column at which interpretation text is wrapped.
pub const WRAP_WIDTH: usize = 110;
/// HL7 formatted-text line break.
pub const LINE_BREAK: &str = "\\.br\\";

/// HTML fragments replaced in interpretation text, in order.
const HTML_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("<p>", ""),
    ("</p>", ""),
    ("<br>", " "),
    ("<br/>", " "),
    ("<b>", ""),
    ("</b>", ""),
    ("<i>", ""),
    ("</i>", ""),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Display consequence of `variant`; unmapped terms are an error.
fn consequence(variant: &VariantRecord) -> Result<&'static str, EncodeError> {
    tables::consequence(&variant.consequence_term).ok_or_else(|| {
        EncodeError::UnmappedConsequence {
            term: variant.consequence_term.clone(),
            variant: variant.label(),
        }
    })
}

/// Variant display name: protein change, coding change and consequence.
pub fn display_name(variant: &VariantRecord, consequence: &str) -> String {
    let consequence = match consequence {
        "Regulatory Region Variant" => "Promoter/Regulatory Region Variant",
        other => other,
    };
    variant
        .protein_change
        .as_deref()
        .into_iter()
        .chain([variant.coding_change.as_str(), consequence])
        .filter(|part| !part.is_empty())
        .join(" ")
}

/// Remove HTML markup and wrap at `WRAP_WIDTH`, joining lines with `LINE_BREAK`.
pub fn format_interpretation(text: &str) -> String {
    let cleaned = HTML_SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to));
    wrap(&cleaned, WRAP_WIDTH).join(LINE_BREAK)
}

/// Greedy word wrap; words longer than `width` fill up the current line first
/// and are then split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while !word.is_empty() {
            let used = line.chars().count();
            let sep = usize::from(used > 0);
            let len = word.chars().count();
            if used + sep + len <= width {
                if sep > 0 {
                    line.push(' ');
                }
                line.push_str(word);
                break;
            }
            if len > width {
                let room = width.saturating_sub(used + sep);
                if room > 0 {
                    let split = word
                        .char_indices()
                        .nth(room)
                        .map(|(idx, _)| idx)
                        .unwrap_or(word.len());
                    if sep > 0 {
                        line.push(' ');
                    }
                    line.push_str(&word[..split]);
                    word = &word[split..];
                }
            }
            lines.push(std::mem::take(&mut line));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render the normal allele fraction.
pub fn format_normal_allele_fraction(value: NormalAlleleFraction) -> String {
    match value {
        NormalAlleleFraction::BelowDetection => BELOW_DETECTION.to_string(),
        NormalAlleleFraction::Value(value) => {
            let rounded = round2(value);
            if rounded == 0.0 {
                BELOW_DETECTION.to_string()
            } else {
                format_decimal(rounded)
            }
        }
    }
}

fn optional_count(value: Option<u32>) -> String {
    value.map(|count| count.to_string()).unwrap_or_default()
}

/// Emit the tumor message segments of `variant`.
pub fn emit_tumor_segments(
    segments: &mut SegmentBuilder<'_>,
    variant: &VariantRecord,
) -> Result<(), EncodeError> {
    let consequence = consequence(variant)?;
    let category = if variant.is_structural() {
        "Structural"
    } else {
        "Simple"
    };
    let read_depth = match &variant.kind {
        VariantKind::Simple { alt_read_count } => optional_count(*alt_read_count),
        VariantKind::Structural {
            supporting_reads, ..
        } => optional_count(*supporting_reads),
    };
    let dna_change_type = if variant.is_substitution() {
        "Substitution"
    } else {
        "Insertion/Deletion"
    };
    let (start, stop) = variant.one_based_range();

    segments.emit(codes::GENE_STUDIED, format!("^{}^", variant.gene))?;
    segments.emit(codes::DISPLAY_NAME, display_name(variant, consequence))?;
    segments.emit(
        codes::DISCRETE_VARIANT,
        format!("v1^{}^ClinVar-V", variant.hgvs_with_gene),
    )?;
    segments.emit(codes::SOURCE_CLASS, format!("^{}", variant.origin))?;
    segments.emit(codes::VARIANT_CATEGORY, category)?;
    segments.emit(
        codes::CLINICAL_SIGNIFICANCE,
        format!("^{}", variant.pool.tier()),
    )?;
    segments.emit(
        codes::ALLELE_FREQUENCY,
        format_decimal(round2(variant.allele_fraction)),
    )?;
    segments.emit(codes::ALLELE_READ_DEPTH, read_depth)?;
    segments.emit(
        codes::AMINO_ACID_CHANGE,
        variant
            .protein_change
            .as_deref()
            .unwrap_or(UNKNOWN_PROTEIN_CHANGE),
    )?;
    segments.emit(codes::DNA_CHANGE_TYPE, format!("^{}", dna_change_type))?;
    segments.emit(codes::DNA_CHANGE, format!("^{}", variant.coding_change))?;
    segments.emit(codes::GENOMIC_CHANGE, &variant.genomic_change)?;
    segments.emit(codes::PROTEIN_REFERENCE, &variant.protein_accession)?;
    segments.emit(
        codes::TRANSCRIPT,
        format!("{}^{}^RefSeq-T", variant.transcript, variant.transcript),
    )?;
    segments.emit(codes::CHROMOSOME, &variant.chromosome)?;
    segments.emit(codes::MOLECULAR_CONSEQUENCE, format!("^{}", consequence))?;
    segments.emit(codes::REFERENCE_ALLELE, &variant.reference)?;
    segments.emit(codes::ALTERNATE_ALLELE, &variant.alternate)?;
    segments.emit(codes::ALLELE_START_END, format!("{}^{}", start, stop))?;
    if let Some(region) = &variant.region {
        segments.emit(codes::DNA_REGION, region)?;
    }
    segments.emit(codes::ASSEMBLY, format!("^{}", variant.assembly))?;
    segments.emit(codes::VARIANT_ASSESSMENT, DETECTED)?;
    if let Some(interpretation) = &variant.interpretation {
        let text = format_interpretation(interpretation);
        if !text.is_empty() {
            segments.emit(codes::DIAGNOSTIC_SIGNIFICANCE, text)?;
        }
    }
    if let Some(zygosity) = &variant.zygosity {
        segments.emit(codes::ALLELIC_STATE, zygosity)?;
    }
    if let VariantKind::Structural {
        length: Some(length),
        ..
    } = &variant.kind
    {
        segments.emit(codes::STRUCTURAL_VARIANT_LENGTH, length)?;
    }

    Ok(())
}

/// Emit the normal message segments of `variant`.
///
/// Returns `Ok(false)` without emitting anything if the variant carries no
/// normal allele fraction.
pub fn emit_normal_segments(
    segments: &mut SegmentBuilder<'_>,
    variant: &VariantRecord,
) -> Result<bool, EncodeError> {
    let Some(normal_allele_fraction) = variant.normal_allele_fraction else {
        return Ok(false);
    };
    let consequence = consequence(variant)?;

    segments.emit(codes::GENE_STUDIED, format!("^{}^", variant.gene))?;
    segments.emit(codes::DISPLAY_NAME, display_name(variant, consequence))?;
    segments.emit(
        codes::DISCRETE_VARIANT,
        format!("v1^{}^ClinVar-V", variant.hgvs_with_gene),
    )?;
    segments.emit(codes::SOURCE_CLASS, format!("^{}", variant.origin))?;
    segments.emit(
        codes::CLINICAL_SIGNIFICANCE,
        format!("^{}", variant.pool.tier()),
    )?;
    segments.emit(
        codes::ALLELE_FREQUENCY,
        format_normal_allele_fraction(normal_allele_fraction),
    )?;
    segments.emit(
        codes::AMINO_ACID_CHANGE,
        variant
            .protein_change
            .as_deref()
            .unwrap_or(UNKNOWN_PROTEIN_CHANGE),
    )?;
    segments.emit(codes::DNA_CHANGE, format!("^{}", variant.coding_change))?;
    segments.emit(codes::CHROMOSOME, &variant.chromosome)?;
    segments.emit(codes::MOLECULAR_CONSEQUENCE, format!("^{}", consequence))?;
    segments.emit(codes::ASSEMBLY, format!("^{}", variant.assembly))?;
    segments.emit(codes::VARIANT_CATEGORY, "Simple")?;
    segments.emit(codes::VARIANT_ASSESSMENT, DETECTED)?;
    if let Some(zygosity) = &variant.zygosity {
        segments.emit(codes::ALLELIC_STATE, zygosity)?;
    }

    Ok(true)
}
