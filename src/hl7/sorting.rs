//! Selection and ranking of the variants to report.

use crate::err::{EncodeError, Subject};

use super::input::{Biomarker, Report};
use super::tables::SortKey;
use super::variant::{Origin, Pool, VariantRecord};

/// Helper wrapper that allows to sort `VariantRecord` by allele fraction, descending.
#[derive(Debug)]
pub struct ByAlleleFraction(pub VariantRecord);

impl PartialEq for ByAlleleFraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for ByAlleleFraction {}

impl PartialOrd for ByAlleleFraction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByAlleleFraction {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.allele_fraction.total_cmp(&self.0.allele_fraction)
    }
}

/// Helper wrapper that allows to sort `VariantRecord` by gene name.
#[derive(Debug)]
pub struct ByGeneName(pub VariantRecord);

impl PartialEq for ByGeneName {
    fn eq(&self, other: &Self) -> bool {
        self.0.gene == other.0.gene
    }
}

impl Eq for ByGeneName {}

impl PartialOrd for ByGeneName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByGeneName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.gene.cmp(&other.0.gene)
    }
}

/// Stable sort of one pool by `sort_key`.
fn sort_pool(variants: Vec<VariantRecord>, sort_key: SortKey) -> Vec<VariantRecord> {
    match sort_key {
        SortKey::AlleleFraction => {
            let mut wrapped = variants.into_iter().map(ByAlleleFraction).collect::<Vec<_>>();
            wrapped.sort();
            wrapped.into_iter().map(|ByAlleleFraction(v)| v).collect()
        }
        SortKey::GeneName => {
            let mut wrapped = variants.into_iter().map(ByGeneName).collect::<Vec<_>>();
            wrapped.sort();
            wrapped.into_iter().map(|ByGeneName(v)| v).collect()
        }
    }
}

/// Build the ranked variant list: all confirmed variants, then all uncertain ones,
/// each pool sorted by `sort_key`.
pub fn rank_variants(
    confirmed: Vec<VariantRecord>,
    uncertain: Vec<VariantRecord>,
    sort_key: SortKey,
) -> Vec<VariantRecord> {
    let mut result = sort_pool(confirmed, sort_key);
    result.extend(sort_pool(uncertain, sort_key));
    result
}

/// Convert the report's variant collections and rank them.
pub fn select_variants(
    subject: &Subject,
    report: &Report,
    sort_key: SortKey,
) -> Result<Vec<VariantRecord>, EncodeError> {
    let confirmed = report
        .biomarkers
        .iter()
        .filter_map(|biomarker| match biomarker {
            Biomarker::Variant(variant) => Some(variant),
            _ => None,
        })
        .map(|raw| VariantRecord::from_input(subject, raw, Pool::Confirmed))
        .collect::<Result<Vec<_>, _>>()?;
    let uncertain = report
        .germline_variants
        .iter()
        .chain(report.uncertain_variants.iter())
        .map(|raw| VariantRecord::from_input(subject, raw, Pool::Uncertain))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        "selected {} confirmed and {} uncertain variants",
        confirmed.len(),
        uncertain.len()
    );

    Ok(rank_variants(confirmed, uncertain, sort_key))
}

/// The germline subset of `ranked`, in ranked order.
pub fn germline_variants(ranked: &[VariantRecord]) -> Vec<&VariantRecord> {
    ranked
        .iter()
        .filter(|variant| variant.origin == Origin::Germline)
        .collect()
}
