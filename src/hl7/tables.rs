//! Static reference tables: code dictionary, consequence vocabulary and panels.
//!
//! These are immutable data, initialized lazily once per process.

use std::collections::HashMap;

use enum_map::{enum_map, EnumMap};

use crate::err::EncodeError;

/// The coding system tag written after each code.
pub const CODING_SYSTEM: &str = "LOINC";

/// Value type of an observation, HL7 table 0125.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ValueType {
    /// Coded with exceptions.
    #[strum(serialize = "CWE")]
    Cwe,
    /// String data.
    #[strum(serialize = "ST")]
    St,
    /// Numeric.
    #[strum(serialize = "NM")]
    Nm,
    /// Text data.
    #[strum(serialize = "TX")]
    Tx,
    /// Numeric range.
    #[strum(serialize = "NR")]
    Nr,
}

/// Dictionary entry for one result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeInfo {
    /// Human readable name of the code.
    pub name: &'static str,
    /// Value type of results reported with this code.
    pub value_type: ValueType,
}

/// Result codes used by the encoder.
pub mod codes {
    pub const GENE_STUDIED: &str = "48018-6";
    pub const DISCRETE_VARIANT: &str = "81252-9";
    pub const AMINO_ACID_CHANGE: &str = "48005-3";
    pub const DNA_CHANGE: &str = "48004-6";
    pub const MOLECULAR_CONSEQUENCE: &str = "48006-1";
    pub const ASSEMBLY: &str = "62374-4";
    pub const CLINICAL_SIGNIFICANCE: &str = "53037-8";
    pub const CHROMOSOME: &str = "48000-4";
    pub const ALLELE_FREQUENCY: &str = "81258-6";
    pub const ALLELE_READ_DEPTH: &str = "82121-5";
    pub const TUMOR_MUTATIONAL_BURDEN: &str = "94076-7";
    pub const DISPLAY_NAME: &str = "47998-0";
    pub const DNA_REGION: &str = "47999-8";
    pub const VARIANT_CATEGORY: &str = "83005-9";
    pub const MICROSATELLITE_INSTABILITY: &str = "81695-9";
    pub const VARIANT_ASSESSMENT: &str = "69548-6";
    pub const DIAGNOSTIC_SIGNIFICANCE: &str = "93364-8";
    pub const SOURCE_CLASS: &str = "48002-0";
    pub const DNA_CHANGE_TYPE: &str = "48019-4";
    pub const TRANSCRIPT: &str = "51958-7";
    pub const GENOMIC_CHANGE: &str = "81290-9";
    pub const ALLELE_START_END: &str = "81254-5";
    pub const ALLELIC_STATE: &str = "53034-5";
    pub const REFERENCE_ALLELE: &str = "69547-8";
    pub const ALTERNATE_ALLELE: &str = "69551-0";
    pub const STRUCTURAL_VARIANT_LENGTH: &str = "81300-6";
    pub const PROTEIN_REFERENCE: &str = "7400052";
    pub const TUMOR_TYPE: &str = "7102415";
    pub const DEPTH_20X: &str = "7102423";
    pub const DEPTH_200X: &str = "7102424";
    pub const DEPTH_500X: &str = "7102425";
    pub const MEAN_DEPTH: &str = "7102426";
}

lazy_static::lazy_static! {
    static ref CODE_DICTIONARY: HashMap<&'static str, CodeInfo> = {
        use ValueType::*;
        let entries: &[(&'static str, &'static str, ValueType)] = &[
            (codes::GENE_STUDIED, "Gene Studied Name", Cwe),
            (codes::DISCRETE_VARIANT, "Discrete Genetic Variant", Cwe),
            (codes::AMINO_ACID_CHANGE, "Amino Acid Change p.HGVS", St),
            (codes::DNA_CHANGE, "DNA Change c.HGVS", Cwe),
            (codes::MOLECULAR_CONSEQUENCE, "Molecular Consequence", Cwe),
            (codes::ASSEMBLY, "Human Reference Sequence Assembly Version", Cwe),
            (codes::CLINICAL_SIGNIFICANCE, "Genetic Sequence Variation Clinical Significance", Cwe),
            (codes::CHROMOSOME, "Chromosome", St),
            (codes::ALLELE_FREQUENCY, "Allelic Frequency", Nm),
            ("51969-4", "Genetic Analysis Report", St),
            (codes::ALLELE_READ_DEPTH, "Allelic Read Depth", Nm),
            (codes::TUMOR_MUTATIONAL_BURDEN, "Tumor Mutational Burden", Nm),
            (codes::DISPLAY_NAME, "Variant Display Name", St),
            (codes::DNA_REGION, "DNA Region", St),
            (codes::VARIANT_CATEGORY, "Variant Category", St),
            (codes::MICROSATELLITE_INSTABILITY, "Microsatellite Instability", Cwe),
            (codes::VARIANT_ASSESSMENT, "Genetic Variant Assessment", St),
            (codes::DIAGNOSTIC_SIGNIFICANCE, "Genetic Variant Diagnostic Significance", Tx),
            (codes::SOURCE_CLASS, "Genomic Source Class", Cwe),
            (codes::DNA_CHANGE_TYPE, "DNA Change [Type]", Cwe),
            (codes::TRANSCRIPT, "Transcript Reference Sequence", Cwe),
            (codes::GENOMIC_CHANGE, "Genomic DNA Change g.HGVS", St),
            (codes::ALLELE_START_END, "Genomic Allele Start-End", Nr),
            (codes::ALLELIC_STATE, "Allelic State", Cwe),
            (codes::REFERENCE_ALLELE, "Genomic Reference Allele", St),
            (codes::ALTERNATE_ALLELE, "Genomic Alternate Allele", St),
            (codes::STRUCTURAL_VARIANT_LENGTH, "Structural Variant Length", Nm),
            (codes::PROTEIN_REFERENCE, "Protein Reference Sequence", St),
            (codes::TUMOR_TYPE, "Tumor Type", Cwe),
            (codes::DEPTH_20X, "20x Depth Percentage", St),
            (codes::DEPTH_200X, "200x Depth Percentage", St),
            (codes::DEPTH_500X, "500x Depth Percentage", St),
            (codes::MEAN_DEPTH, "Mean Depth", St),
        ];
        entries
            .iter()
            .map(|(code, name, value_type)| {
                (
                    *code,
                    CodeInfo {
                        name: *name,
                        value_type: *value_type,
                    },
                )
            })
            .collect()
    };

    /// Sequence Ontology term to the display consequence expected downstream.
    static ref CONSEQUENCES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("transcript_ablation", "Transcript Ablation");
        m.insert("splice_acceptor_variant", "Splice Acceptor Variant");
        m.insert("splice_donor_variant", "Splice Donor Variant");
        m.insert("stop_gained", "Nonsense");
        m.insert("frameshift_variant", "Frameshift Variant");
        m.insert("stop_lost", "Stop Lost");
        m.insert("start_lost", "Start Lost");
        m.insert("transcript_amplification", "Transcript Amplification");
        m.insert("feature_elongation", "Feature Elongation");
        m.insert("feature_truncation", "Feature Truncation");
        m.insert("inframe_insertion", "Inframe Insertion");
        m.insert("disruptive_inframe_insertion", "Inframe Insertion");
        m.insert("inframe_deletion", "Inframe Deletion");
        m.insert("disruptive_inframe_deletion", "Inframe Deletion");
        m.insert("missense_variant", "Missense Variant");
        m.insert("protein_altering_variant", "Protein Altering Variant");
        m.insert("splice_donor_5th_base_variant", "Splice Donor Variant");
        m.insert("splice_region_variant", "Splice Region Variant");
        m.insert("splice_donor_region_variant", "Splice Region Variant");
        m.insert("splice_polypyrimidine_tract_variant", "Splice Region Variant");
        m.insert("incomplete_terminal_codon_variant", "Incomplete Terminal Codon Variant");
        m.insert("start_retained_variant", "Start Retained Variant");
        m.insert("stop_retained_variant", "Stop Retained Variant");
        m.insert("synonymous_variant", "Synonymous Variant");
        m.insert("coding_sequence_variant", "Coding Sequence Variant");
        m.insert("initiator_codon_variant", "Coding Sequence Variant");
        m.insert("mature_miRNA_variant", "Mature miRNA Variant");
        m.insert("5_prime_UTR_variant", "5 Prime UTR Variant");
        m.insert("3_prime_UTR_variant", "3 Prime UTR Variant");
        m.insert("non_coding_transcript_exon_variant", "Non Coding Transcript Exon Variant");
        m.insert("intron_variant", "Intron Variant");
        m.insert("NMD_transcript_variant", "NMD Transcript Variant");
        m.insert("non_coding_transcript_variant", "Non Coding Transcript Variant");
        m.insert("coding_transcript_variant", "Coding Sequence Variant");
        // Reportable upstream/downstream hits sit in promoters (TERT).
        m.insert("upstream_gene_variant", "Regulatory Region Variant");
        m.insert("downstream_gene_variant", "Regulatory Region Variant");
        m.insert("TFBS_ablation", "TFBS Ablation");
        m.insert("TFBS_amplification", "TFBS Amplification");
        m.insert("TF_binding_site_variant", "TF Binding Site Variant");
        m.insert("regulatory_region_ablation", "Regulatory Region Ablation");
        m.insert("regulatory_region_amplification", "Regulatory Region Amplification");
        m.insert("regulatory_region_variant", "Regulatory Region Variant");
        m.insert("intergenic_variant", "Intergenic Variant");
        m.insert("sequence_variant", "Coding Sequence Variant");
        m
    };

    static ref PANELS: EnumMap<Panel, PanelInfo> = enum_map! {
        Panel::HemeV2 => PanelInfo {
            order_code: "LAB9121R^Hematologic Malignancy Sequencing Panel^BKREAP^^^^^^HEMATOLOGIC MALIGNANCY SEQUENCING PANEL",
            comparator_order_code: None,
            sort_key: SortKey::GeneName,
            reports_signatures: false,
        },
        Panel::PanCancerAllV1 => PanelInfo {
            order_code: "LAB9055^Pan-cancer Solid Tumor Panel^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL",
            comparator_order_code: Some(
                "LAB9056^Pan-cancer Panel, Comparator^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL",
            ),
            sort_key: SortKey::AlleleFraction,
            reports_signatures: true,
        },
    };
}

/// Look up `code` in the code dictionary.
pub fn code_info(code: &str) -> Result<CodeInfo, EncodeError> {
    CODE_DICTIONARY
        .get(code)
        .copied()
        .ok_or_else(|| EncodeError::UnmappedCode(code.to_string()))
}

/// Look up the display consequence for a Sequence Ontology term.
pub fn consequence(term: &str) -> Option<&'static str> {
    CONSEQUENCES.get(term).copied()
}

/// How variants are ordered within each pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Allele fraction, descending.
    AlleleFraction,
    /// Gene name, ascending.
    GeneName,
}

/// Sequencing panels known to the downstream system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, enum_map::Enum, strum::Display, strum::EnumString,
)]
pub enum Panel {
    /// Hematologic malignancy panel.
    #[strum(serialize = "UCLA Heme v2")]
    HemeV2,
    /// Pan-cancer solid tumor panel with matched normal.
    #[strum(serialize = "UCLA Pan-Cancer All v1")]
    PanCancerAllV1,
}

/// Panel-dependent encoding behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInfo {
    /// Order code literal written into the tumor `OBR`.
    pub order_code: &'static str,
    /// Order code of the comparator order; `Some` iff the matched-normal workflow applies.
    pub comparator_order_code: Option<&'static str>,
    /// Ordering of variants within a pool.
    pub sort_key: SortKey,
    /// Whether MSI and TMB are reported in the tumor header.
    pub reports_signatures: bool,
}

impl Panel {
    /// Return the static information for this panel.
    pub fn info(self) -> &'static PanelInfo {
        &PANELS[self]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[rstest::rstest]
    #[case(codes::GENE_STUDIED, "Gene Studied Name", ValueType::Cwe)]
    #[case(codes::ALLELE_FREQUENCY, "Allelic Frequency", ValueType::Nm)]
    #[case(codes::DIAGNOSTIC_SIGNIFICANCE, "Genetic Variant Diagnostic Significance", ValueType::Tx)]
    #[case(codes::ALLELE_START_END, "Genomic Allele Start-End", ValueType::Nr)]
    fn code_info_known(#[case] code: &str, #[case] name: &str, #[case] value_type: ValueType) {
        let info = code_info(code).unwrap();
        assert_eq!(info.name, name);
        assert_eq!(info.value_type, value_type);
    }

    #[test]
    fn code_info_unknown() {
        let err = code_info("0000-0").unwrap_err();
        assert!(matches!(err, EncodeError::UnmappedCode(code) if code == "0000-0"));
    }

    #[rstest::rstest]
    #[case("stop_gained", Some("Nonsense"))]
    #[case("upstream_gene_variant", Some("Regulatory Region Variant"))]
    #[case("disruptive_inframe_deletion", Some("Inframe Deletion"))]
    #[case("no_such_term", None)]
    fn consequence_lookup(#[case] term: &str, #[case] expected: Option<&str>) {
        assert_eq!(consequence(term), expected);
    }

    #[rstest::rstest]
    #[case("UCLA Heme v2", Panel::HemeV2, SortKey::GeneName, false)]
    #[case("UCLA Pan-Cancer All v1", Panel::PanCancerAllV1, SortKey::AlleleFraction, true)]
    fn panel_from_name(
        #[case] name: &str,
        #[case] panel: Panel,
        #[case] sort_key: SortKey,
        #[case] matched_normal: bool,
    ) -> Result<(), anyhow::Error> {
        let parsed: Panel = name.parse()?;
        assert_eq!(parsed, panel);
        assert_eq!(parsed.info().sort_key, sort_key);
        assert_eq!(parsed.info().comparator_order_code.is_some(), matched_normal);
        assert_eq!(parsed.to_string(), name);

        Ok(())
    }

    #[test]
    fn value_type_display() {
        assert_eq!(ValueType::Cwe.to_string(), "CWE");
        assert_eq!(ValueType::Nr.to_string(), "NR");
    }
}
