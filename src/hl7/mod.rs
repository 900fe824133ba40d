//! Encoding of VarSeq reports into HL7v2.3 ORU^R01 messages.

pub mod context;
pub mod input;
pub mod mapper;
pub mod segment;
pub mod sorting;
pub mod tables;
pub mod variant;
pub mod variant_id;

use chrono::NaiveDate;

use crate::err::{EncodeError, Subject};

use self::context::{format_decimal, SampleContext};
use self::input::Report;
use self::segment::{Message, MessageBuilder};
use self::tables::codes;
use self::variant::VariantRecord;

/// Sending application, facility and receiving application literals.
const MSH_PREFIX: &str = "MSH|^~\\&|RRH||Beaker|";

/// The two message bodies produced for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedMessages {
    /// Tumor sample message, always present.
    pub tumor: String,
    /// Matched normal message, empty if not applicable.
    pub normal: String,
}

/// Encoder for exactly one report.
///
/// Context and ranked variants are derived once on construction; each message
/// is assembled with its own segment cursor.
#[derive(Debug, Clone)]
pub struct Encoder {
    context: SampleContext,
    variants: Vec<VariantRecord>,
    send_date: String,
}

impl Encoder {
    /// Construct for `report`, using today as the send date.
    pub fn new(report: &Report) -> Result<Self, EncodeError> {
        Self::with_send_date(report, chrono::Local::now().date_naive())
    }

    /// Construct for `report` with an explicit send date.
    pub fn with_send_date(report: &Report, send_date: NaiveDate) -> Result<Self, EncodeError> {
        let subject = Subject {
            sample_id: report.sample_state.sample_name.clone(),
            patient_name: report.sample_state.patient_name.clone(),
        };
        let context = SampleContext::from_report(report)?;
        let variants = sorting::select_variants(&subject, report, context.panel.info().sort_key)?;
        tracing::debug!(
            "encoder for sample {} with {} ranked variants",
            &context.sample_id,
            variants.len()
        );

        Ok(Self {
            context,
            variants,
            send_date: send_date.format("%Y%m%d").to_string(),
        })
    }

    /// The normalized sample context.
    pub fn context(&self) -> &SampleContext {
        &self.context
    }

    /// The ranked variants.
    pub fn variants(&self) -> &[VariantRecord] {
        &self.variants
    }

    /// Encode both messages as wire text.
    pub fn encode(&self) -> Result<EncodedMessages, EncodeError> {
        let tumor = self.tumor_message()?.to_wire();
        let normal = self
            .normal_message()?
            .map(|message| message.to_wire())
            .unwrap_or_default();
        Ok(EncodedMessages { tumor, normal })
    }

    fn header(
        &self,
        order_number: &str,
        sample_id: &str,
        order_code: &str,
        date_ordered: &str,
        date_received: &str,
    ) -> Vec<String> {
        let ctx = &self.context;
        vec![
            format!("{}|{}||ORU^R01|1|P|2.3||||||", MSH_PREFIX, self.send_date),
            format!(
                "PID|1||{}^^^MRN^MRN||{}^{}^||{}|{}",
                ctx.mrn, ctx.patient_last_name, ctx.patient_first_name, ctx.birth_date, ctx.sex
            ),
            "ORC|RE".to_string(),
            format!(
                "OBR|1|{}|{}^Beaker|{}|||{}|||||||||{}^{}^{}^^^^^^EPIC^^^^PROVID||||||{}|||F",
                order_number,
                sample_id,
                order_code,
                date_ordered,
                ctx.provider_id,
                ctx.provider_last_name,
                ctx.provider_first_name,
                date_received
            ),
        ]
    }

    /// Assemble the tumor message.
    pub fn tumor_message(&self) -> Result<Message, EncodeError> {
        let ctx = &self.context;
        let panel = ctx.panel.info();
        let mut builder = MessageBuilder::new(self.header(
            &ctx.order_number,
            &ctx.sample_id,
            panel.order_code,
            &ctx.date_ordered,
            &ctx.date_received,
        ));

        {
            let mut summary = builder.segments_for(variant_id::SUMMARY_ID);
            summary.emit(codes::TUMOR_TYPE, format!("^{}", ctx.tumor_type))?;
            if panel.reports_signatures {
                summary.emit(codes::MICROSATELLITE_INSTABILITY, format!("^{}", ctx.msi))?;
                summary.emit(codes::TUMOR_MUTATIONAL_BURDEN, &ctx.tmb)?;
            }
            summary.emit(codes::DEPTH_20X, format_decimal(ctx.coverage.pct_20x))?;
            summary.emit(codes::DEPTH_200X, format_decimal(ctx.coverage.pct_200x))?;
            summary.emit(codes::DEPTH_500X, format_decimal(ctx.coverage.pct_500x))?;
            summary.emit(codes::MEAN_DEPTH, format_decimal(ctx.coverage.mean_depth))?;
        }

        for (idx, variant) in self.variants.iter().enumerate() {
            let id = variant_id::variant_id(idx);
            tracing::debug!("tumor message: {} -> {}", variant.label(), &id);
            mapper::emit_tumor_segments(&mut builder.segments_for(&id), variant)?;
        }

        Ok(builder.build())
    }

    /// Assemble the matched normal message.
    ///
    /// Returns `None` if the panel has no comparator order or no germline
    /// variant can be reported.
    pub fn normal_message(&self) -> Result<Option<Message>, EncodeError> {
        let ctx = &self.context;
        let Some(order_code) = ctx.panel.info().comparator_order_code else {
            return Ok(None);
        };
        let germline = sorting::germline_variants(&self.variants);
        if germline.is_empty() {
            return Ok(None);
        }
        let Some(normal_order) = ctx.normal_order.as_ref() else {
            tracing::warn!(
                "{} germline variants but no matched normal order, skipping normal message",
                germline.len()
            );
            return Ok(None);
        };

        let mut builder = MessageBuilder::new(self.header(
            &normal_order.order_number,
            &normal_order.sample_id,
            order_code,
            &normal_order.date_ordered,
            &normal_order.date_received,
        ));
        let mut emitted = 0;
        for variant in germline {
            let id = variant_id::variant_id(emitted);
            if mapper::emit_normal_segments(&mut builder.segments_for(&id), variant)? {
                tracing::debug!("normal message: {} -> {}", variant.label(), &id);
                emitted += 1;
            } else {
                tracing::warn!(
                    "germline variant {} has no normal allele fraction, not sent with normal message",
                    variant.label()
                );
            }
        }

        if emitted == 0 {
            Ok(None)
        } else {
            Ok(Some(builder.build()))
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::hl7::context::test::report_json;
    use crate::hl7::variant::test::braf_json;

    fn send_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    /// Report with one confirmed somatic and one germline variant.
    fn two_variant_report() -> serde_json::Value {
        let mut json = report_json();
        let mut confirmed = braf_json();
        confirmed["type"] = serde_json::json!("VARIANT");
        confirmed["vaf"] = serde_json::json!(0.15);
        json["biomarkers"].as_array_mut().unwrap().push(confirmed);

        let mut germline = braf_json();
        germline["geneName"] = serde_json::json!("BRCA2");
        germline["pDotThreeLetter"] = serde_json::json!("p.Asn372His");
        germline["cDot"] = serde_json::json!("c.1114A>C");
        germline["sequenceOntology"] = serde_json::json!("missense_variant");
        germline["vaf"] = serde_json::json!(0.51);
        germline["naf"] = serde_json::json!(0.49);
        germline["zygosity"] = serde_json::json!("Heterozygous");
        germline["tags"] = serde_json::json!([{"initials": "GL"}]);
        json["germlineVariants"] = serde_json::json!([germline]);
        json
    }

    fn encoder(json: serde_json::Value) -> Encoder {
        let report: Report = serde_json::from_value(json).unwrap();
        Encoder::with_send_date(&report, send_date()).unwrap()
    }

    /// OBX indices of `text` in order.
    fn obx_indices(text: &str) -> Vec<usize> {
        text.split("\r\n")
            .filter(|line| line.starts_with("OBX|"))
            .map(|line| line.split('|').nth(1).unwrap().parse().unwrap())
            .collect()
    }

    /// Correlation ids of the `OBX` lines of `text`, deduplicated in order.
    fn correlation_ids(text: &str) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for line in text.split("\r\n").filter(|line| line.starts_with("OBX|")) {
            let id = line.split('|').nth(4).unwrap().to_string();
            if result.last() != Some(&id) {
                result.push(id);
            }
        }
        result
    }

    #[test]
    fn end_to_end() -> Result<(), anyhow::Error> {
        let messages = encoder(two_variant_report()).encode()?;

        assert_eq!(correlation_ids(&messages.tumor), vec!["1", "2a", "2b"]);
        assert_eq!(correlation_ids(&messages.normal), vec!["2a"]);
        for text in [&messages.tumor, &messages.normal] {
            let indices = obx_indices(text);
            assert_eq!(indices, (1..=indices.len()).collect::<Vec<_>>());
            assert!(text.ends_with("\r\n"));
            assert!(!text.replace("\r\n", "").contains('\n'));
            assert!(!text.replace("\r\n", "").contains('\r'));
        }

        Ok(())
    }

    #[test]
    fn tumor_header() -> Result<(), anyhow::Error> {
        let messages = encoder(two_variant_report()).encode()?;
        let lines = messages.tumor.split("\r\n").collect::<Vec<_>>();

        assert_eq!(
            &lines[..11],
            &[
                "MSH|^~\\&|RRH||Beaker||20240201||ORU^R01|1|P|2.3||||||",
                "PID|1||0012345^^^MRN^MRN||Doe^Jane^||19700304|F",
                "ORC|RE",
                "OBR|1|ORD-77|S24-0815^Beaker|LAB9055^Pan-cancer Solid Tumor Panel^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL|||20240115|||||||||004711^House^Gregory^^^^^^EPIC^^^^PROVID||||||20240116|||F",
                "OBX|1|CWE|7102415^Tumor Type^LOINC|1|^Lung adenocarcinoma (LUAD)",
                "OBX|2|CWE|81695-9^Microsatellite Instability^LOINC|1|^3.2%",
                "OBX|3|NM|94076-7^Tumor Mutational Burden^LOINC|1|12.5",
                "OBX|4|ST|7102423^20x Depth Percentage^LOINC|1|99.88",
                "OBX|5|ST|7102424^200x Depth Percentage^LOINC|1|97.12",
                "OBX|6|ST|7102425^500x Depth Percentage^LOINC|1|80.01",
                "OBX|7|ST|7102426^Mean Depth^LOINC|1|813.0",
            ]
        );
        assert_eq!(lines[11], "OBX|8|CWE|48018-6^Gene Studied Name^LOINC|2a|^BRAF^");

        Ok(())
    }

    #[test]
    fn normal_header() -> Result<(), anyhow::Error> {
        let messages = encoder(two_variant_report()).encode()?;
        let lines = messages.normal.split("\r\n").collect::<Vec<_>>();

        assert_eq!(
            lines[3],
            "OBR|1|ORD-78|S24-0815^Beaker|LAB9056^Pan-cancer Panel, Comparator^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL|||20240115|||||||||004711^House^Gregory^^^^^^EPIC^^^^PROVID||||||20240117|||F"
        );
        assert_eq!(lines[4], "OBX|1|CWE|48018-6^Gene Studied Name^LOINC|2a|^BRCA2^");
        assert!(messages
            .normal
            .contains("OBX|6|NM|81258-6^Allelic Frequency^LOINC|2a|0.49\r\n"));

        Ok(())
    }

    #[test]
    fn no_germline_no_normal_message() -> Result<(), anyhow::Error> {
        let mut json = two_variant_report();
        json["germlineVariants"][0]["tags"] = serde_json::json!([{"initials": "SM"}]);

        let messages = encoder(json).encode()?;

        assert_eq!(messages.normal, "");
        assert_eq!(correlation_ids(&messages.tumor), vec!["1", "2a", "2b"]);

        Ok(())
    }

    #[test]
    fn germline_without_naf_no_normal_message() -> Result<(), anyhow::Error> {
        let mut json = two_variant_report();
        json["germlineVariants"][0]
            .as_object_mut()
            .unwrap()
            .remove("naf");

        let messages = encoder(json).encode()?;

        assert_eq!(messages.normal, "");
        assert!(!messages.tumor.is_empty());

        Ok(())
    }

    #[test]
    fn without_normal_order_no_normal_message() -> Result<(), anyhow::Error> {
        let mut json = two_variant_report();
        json["customFields"]
            .as_object_mut()
            .unwrap()
            .retain(|key, _| !key.starts_with("N_"));

        let messages = encoder(json).encode()?;

        assert_eq!(messages.normal, "");
        assert_eq!(correlation_ids(&messages.tumor), vec!["1", "2a", "2b"]);

        Ok(())
    }

    #[test]
    fn heme_panel()-> Result<(), anyhow::Error> {
        let mut json = two_variant_report();
        json["sampleState"]["panel"] = serde_json::json!("UCLA Heme v2");

        let messages = encoder(json).encode()?;

        assert_eq!(messages.normal, "");
        assert!(messages.tumor.contains("|LAB9121R^Hematologic Malignancy"));
        assert!(!messages.tumor.contains("Microsatellite Instability"));
        assert!(!messages.tumor.contains("Tumor Mutational Burden"));
        assert!(messages
            .tumor
            .contains("OBX|5|ST|7102426^Mean Depth^LOINC|1|813.0\r\n"));

        Ok(())
    }

    #[test]
    fn normal_ids_are_reindexed() -> Result<(), anyhow::Error> {
        let mut json = two_variant_report();
        let mut second = json["germlineVariants"][0].clone();
        second["geneName"] = serde_json::json!("ATM");
        second["vaf"] = serde_json::json!(0.45);
        json["uncertainVariants"] = serde_json::json!([second]);

        let encoder = encoder(json);
        let messages = encoder.encode()?;

        assert_eq!(
            encoder
                .variants()
                .iter()
                .map(|v| v.gene.as_str())
                .collect::<Vec<_>>(),
            vec!["BRAF", "BRCA2", "ATM"]
        );
        assert_eq!(correlation_ids(&messages.tumor), vec!["1", "2a", "2b", "2c"]);
        assert_eq!(correlation_ids(&messages.normal), vec!["2a", "2b"]);

        Ok(())
    }

    #[test]
    fn unmapped_consequence_aborts() {
        let mut json = two_variant_report();
        json["germlineVariants"][0]["sequenceOntology"] = serde_json::json!("made_up_variant");
        let report: Report = serde_json::from_value(json).unwrap();

        let err = Encoder::with_send_date(&report, send_date())
            .unwrap()
            .encode()
            .unwrap_err();

        assert_eq!(
            err,
            EncodeError::UnmappedConsequence {
                term: "made_up_variant".into(),
                variant: "BRCA2 c.1114A>C".into(),
            }
        );
    }

    #[test]
    fn malformed_date_aborts() {
        let mut json = two_variant_report();
        json["sampleState"]["dob"] = serde_json::json!("1970-03-04");
        let report: Report = serde_json::from_value(json).unwrap();

        let err = Encoder::with_send_date(&report, send_date()).unwrap_err();

        assert!(
            matches!(&err, EncodeError::MalformedInput { sample_id, .. } if sample_id == "S24-0815T"),
            "{:?}",
            err
        );
    }

    fn fixture_messages() -> Result<EncodedMessages, anyhow::Error> {
        let report: Report = serde_json::from_reader(std::fs::File::open("tests/hl7/report.json")?)?;
        Ok(Encoder::with_send_date(&report, send_date())?.encode()?)
    }

    /// Segments of a wire body, one per line; every segment must end with CRLF.
    fn wire_lines(body: &str) -> String {
        assert!(body.ends_with("\r\n"), "{:?}", body);
        let lines = body.trim_end_matches("\r\n").split("\r\n").collect::<Vec<_>>();
        assert!(
            lines.iter().all(|line| !line.contains(|c: char| c == '\r' || c == '\n')),
            "{:?}",
            body
        );
        lines.join("\n")
    }

    #[test]
    fn fixture_report() -> Result<(), anyhow::Error> {
        let messages = fixture_messages()?;

        assert!(messages.tumor.starts_with("MSH|"));
        assert_eq!(
            correlation_ids(&messages.tumor),
            vec!["1", "2a", "2b", "2c", "2d"]
        );
        assert!(messages
            .tumor
            .contains("OBX|4|ST|7102423^20x Depth Percentage^LOINC|1|99.91\r\n"));
        assert!(messages.tumor.contains(
            "|2a|c.-124C>T Promoter/Regulatory Region Variant\r\n"
        ));
        assert!(messages.tumor.contains("|2d|^Tier 3: Unknown clinical significance\r\n"));
        assert_eq!(correlation_ids(&messages.normal), vec!["2a"]);
        assert!(messages.normal.contains("|2a|^BRCA2^\r\n"));
        assert!(messages.normal.contains("|2a|0.5\r\n"));

        Ok(())
    }

    #[test]
    fn fixture_report_tumor_wire() -> Result<(), anyhow::Error> {
        let messages = fixture_messages()?;

        insta::assert_snapshot!(wire_lines(&messages.tumor), @r#"
        MSH|^~\&|RRH||Beaker||20240201||ORU^R01|1|P|2.3||||||
        PID|1||0012345^^^MRN^MRN||Doe^Jane^||19700304|F
        ORC|RE
        OBR|1|ORD-77|S24-0815^Beaker|LAB9055^Pan-cancer Solid Tumor Panel^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL|||20240115|||||||||004711^House^Gregory^^^^^^EPIC^^^^PROVID||||||20240116|||F
        OBX|1|CWE|7102415^Tumor Type^LOINC|1|^Lung adenocarcinoma (LUAD)
        OBX|2|CWE|81695-9^Microsatellite Instability^LOINC|1|^Stable
        OBX|3|NM|94076-7^Tumor Mutational Burden^LOINC|1|8.4
        OBX|4|ST|7102423^20x Depth Percentage^LOINC|1|99.91
        OBX|5|ST|7102424^200x Depth Percentage^LOINC|1|97.12
        OBX|6|ST|7102425^500x Depth Percentage^LOINC|1|80.01
        OBX|7|ST|7102426^Mean Depth^LOINC|1|813.0
        OBX|8|CWE|48018-6^Gene Studied Name^LOINC|2a|^TERT^
        OBX|9|ST|47998-0^Variant Display Name^LOINC|2a|c.-124C>T Promoter/Regulatory Region Variant
        OBX|10|CWE|81252-9^Discrete Genetic Variant^LOINC|2a|v1^NM_198253.3(TERT):c.-124C>T^ClinVar-V
        OBX|11|CWE|48002-0^Genomic Source Class^LOINC|2a|^Somatic
        OBX|12|ST|83005-9^Variant Category^LOINC|2a|Simple
        OBX|13|CWE|53037-8^Genetic Sequence Variation Clinical Significance^LOINC|2a|^Tier 1: Strong significance
        OBX|14|NM|81258-6^Allelic Frequency^LOINC|2a|0.38
        OBX|15|NM|82121-5^Allelic Read Depth^LOINC|2a|201
        OBX|16|ST|48005-3^Amino Acid Change p.HGVS^LOINC|2a|p.?
        OBX|17|CWE|48019-4^DNA Change [Type]^LOINC|2a|^Substitution
        OBX|18|CWE|48004-6^DNA Change c.HGVS^LOINC|2a|^c.-124C>T
        OBX|19|ST|81290-9^Genomic DNA Change g.HGVS^LOINC|2a|NC_000005.10:g.1295113G>A
        OBX|20|ST|7400052^Protein Reference Sequence^LOINC|2a|NP_937983.2
        OBX|21|CWE|51958-7^Transcript Reference Sequence^LOINC|2a|NM_198253.3^NM_198253.3^RefSeq-T
        OBX|22|ST|48000-4^Chromosome^LOINC|2a|5
        OBX|23|CWE|48006-1^Molecular Consequence^LOINC|2a|^Regulatory Region Variant
        OBX|24|ST|69547-8^Genomic Reference Allele^LOINC|2a|G
        OBX|25|ST|69551-0^Genomic Alternate Allele^LOINC|2a|A
        OBX|26|NR|81254-5^Genomic Allele Start-End^LOINC|2a|1295113^1295113
        OBX|27|CWE|62374-4^Human Reference Sequence Assembly Version^LOINC|2a|^GRCh38
        OBX|28|ST|69548-6^Genetic Variant Assessment^LOINC|2a|Detected
        OBX|29|CWE|48018-6^Gene Studied Name^LOINC|2b|^BRAF^
        OBX|30|ST|47998-0^Variant Display Name^LOINC|2b|p.Val600Glu c.1799T>A Missense Variant
        OBX|31|CWE|81252-9^Discrete Genetic Variant^LOINC|2b|v1^NM_004333.6(BRAF):c.1799T>A^ClinVar-V
        OBX|32|CWE|48002-0^Genomic Source Class^LOINC|2b|^Somatic
        OBX|33|ST|83005-9^Variant Category^LOINC|2b|Simple
        OBX|34|CWE|53037-8^Genetic Sequence Variation Clinical Significance^LOINC|2b|^Tier 1: Strong significance
        OBX|35|NM|81258-6^Allelic Frequency^LOINC|2b|0.15
        OBX|36|NM|82121-5^Allelic Read Depth^LOINC|2b|152
        OBX|37|ST|48005-3^Amino Acid Change p.HGVS^LOINC|2b|p.Val600Glu
        OBX|38|CWE|48019-4^DNA Change [Type]^LOINC|2b|^Substitution
        OBX|39|CWE|48004-6^DNA Change c.HGVS^LOINC|2b|^c.1799T>A
        OBX|40|ST|81290-9^Genomic DNA Change g.HGVS^LOINC|2b|NC_000007.14:g.140753336A>T
        OBX|41|ST|7400052^Protein Reference Sequence^LOINC|2b|NP_004324.2
        OBX|42|CWE|51958-7^Transcript Reference Sequence^LOINC|2b|NM_004333.6^NM_004333.6^RefSeq-T
        OBX|43|ST|48000-4^Chromosome^LOINC|2b|7
        OBX|44|CWE|48006-1^Molecular Consequence^LOINC|2b|^Missense Variant
        OBX|45|ST|69547-8^Genomic Reference Allele^LOINC|2b|A
        OBX|46|ST|69551-0^Genomic Alternate Allele^LOINC|2b|T
        OBX|47|NR|81254-5^Genomic Allele Start-End^LOINC|2b|140753336^140753336
        OBX|48|ST|47999-8^DNA Region^LOINC|2b|Exon 15
        OBX|49|CWE|62374-4^Human Reference Sequence Assembly Version^LOINC|2b|^GRCh38
        OBX|50|ST|69548-6^Genetic Variant Assessment^LOINC|2b|Detected
        OBX|51|TX|93364-8^Genetic Variant Diagnostic Significance^LOINC|2b|BRAF V600E is an activating mutation in the kinase domain.Sensitivity to BRAF and MEK inhibitors has been\.br\reported in multiple tumor types including melanoma and NSCLC.
        OBX|52|CWE|53034-5^Allelic State^LOINC|2b|Heterozygous
        OBX|53|CWE|48018-6^Gene Studied Name^LOINC|2c|^BRCA2^
        OBX|54|ST|47998-0^Variant Display Name^LOINC|2c|p.Asn372His c.1114A>C Missense Variant
        OBX|55|CWE|81252-9^Discrete Genetic Variant^LOINC|2c|v1^NM_000059.4(BRCA2):c.1114A>C^ClinVar-V
        OBX|56|CWE|48002-0^Genomic Source Class^LOINC|2c|^Germline
        OBX|57|ST|83005-9^Variant Category^LOINC|2c|Simple
        OBX|58|CWE|53037-8^Genetic Sequence Variation Clinical Significance^LOINC|2c|^Tier 3: Unknown clinical significance
        OBX|59|NM|81258-6^Allelic Frequency^LOINC|2c|0.51
        OBX|60|NM|82121-5^Allelic Read Depth^LOINC|2c|402
        OBX|61|ST|48005-3^Amino Acid Change p.HGVS^LOINC|2c|p.Asn372His
        OBX|62|CWE|48019-4^DNA Change [Type]^LOINC|2c|^Substitution
        OBX|63|CWE|48004-6^DNA Change c.HGVS^LOINC|2c|^c.1114A>C
        OBX|64|ST|81290-9^Genomic DNA Change g.HGVS^LOINC|2c|NC_000013.11:g.32332592A>C
        OBX|65|ST|7400052^Protein Reference Sequence^LOINC|2c|NP_000050.3
        OBX|66|CWE|51958-7^Transcript Reference Sequence^LOINC|2c|NM_000059.4^NM_000059.4^RefSeq-T
        OBX|67|ST|48000-4^Chromosome^LOINC|2c|13
        OBX|68|CWE|48006-1^Molecular Consequence^LOINC|2c|^Missense Variant
        OBX|69|ST|69547-8^Genomic Reference Allele^LOINC|2c|A
        OBX|70|ST|69551-0^Genomic Alternate Allele^LOINC|2c|C
        OBX|71|NR|81254-5^Genomic Allele Start-End^LOINC|2c|32332592^32332592
        OBX|72|ST|47999-8^DNA Region^LOINC|2c|Exon 10
        OBX|73|CWE|62374-4^Human Reference Sequence Assembly Version^LOINC|2c|^GRCh38
        OBX|74|ST|69548-6^Genetic Variant Assessment^LOINC|2c|Detected
        OBX|75|CWE|53034-5^Allelic State^LOINC|2c|Heterozygous
        OBX|76|CWE|48018-6^Gene Studied Name^LOINC|2d|^NF1^
        OBX|77|ST|47998-0^Variant Display Name^LOINC|2d|c.5206-2_5206-1del Splice Acceptor Variant
        OBX|78|CWE|81252-9^Discrete Genetic Variant^LOINC|2d|v1^NM_001042492.3(NF1):c.5206-2_5206-1del^ClinVar-V
        OBX|79|CWE|48002-0^Genomic Source Class^LOINC|2d|^Somatic
        OBX|80|ST|83005-9^Variant Category^LOINC|2d|Simple
        OBX|81|CWE|53037-8^Genetic Sequence Variation Clinical Significance^LOINC|2d|^Tier 3: Unknown clinical significance
        OBX|82|NM|81258-6^Allelic Frequency^LOINC|2d|0.07
        OBX|83|NM|82121-5^Allelic Read Depth^LOINC|2d|45
        OBX|84|ST|48005-3^Amino Acid Change p.HGVS^LOINC|2d|p.?
        OBX|85|CWE|48019-4^DNA Change [Type]^LOINC|2d|^Insertion/Deletion
        OBX|86|CWE|48004-6^DNA Change c.HGVS^LOINC|2d|^c.5206-2_5206-1del
        OBX|87|ST|81290-9^Genomic DNA Change g.HGVS^LOINC|2d|NC_000017.11:g.31252937_31252938del
        OBX|88|ST|7400052^Protein Reference Sequence^LOINC|2d|NP_001035957.1
        OBX|89|CWE|51958-7^Transcript Reference Sequence^LOINC|2d|NM_001042492.3^NM_001042492.3^RefSeq-T
        OBX|90|ST|48000-4^Chromosome^LOINC|2d|17
        OBX|91|CWE|48006-1^Molecular Consequence^LOINC|2d|^Splice Acceptor Variant
        OBX|92|ST|69547-8^Genomic Reference Allele^LOINC|2d|AG
        OBX|93|ST|69551-0^Genomic Alternate Allele^LOINC|2d|-
        OBX|94|NR|81254-5^Genomic Allele Start-End^LOINC|2d|31252937^31252938
        OBX|95|CWE|62374-4^Human Reference Sequence Assembly Version^LOINC|2d|^GRCh38
        OBX|96|ST|69548-6^Genetic Variant Assessment^LOINC|2d|Detected
        "#);

        Ok(())
    }

    #[test]
    fn fixture_report_normal_wire() -> Result<(), anyhow::Error> {
        let messages = fixture_messages()?;

        insta::assert_snapshot!(wire_lines(&messages.normal), @r#"
        MSH|^~\&|RRH||Beaker||20240201||ORU^R01|1|P|2.3||||||
        PID|1||0012345^^^MRN^MRN||Doe^Jane^||19700304|F
        ORC|RE
        OBR|1|ORD-78|S24-0815^Beaker|LAB9056^Pan-cancer Panel, Comparator^BKREAP^^^^^^SOLID TUMOR PAN-CANCER PANEL|||20240115|||||||||004711^House^Gregory^^^^^^EPIC^^^^PROVID||||||20240117|||F
        OBX|1|CWE|48018-6^Gene Studied Name^LOINC|2a|^BRCA2^
        OBX|2|ST|47998-0^Variant Display Name^LOINC|2a|p.Asn372His c.1114A>C Missense Variant
        OBX|3|CWE|81252-9^Discrete Genetic Variant^LOINC|2a|v1^NM_000059.4(BRCA2):c.1114A>C^ClinVar-V
        OBX|4|CWE|48002-0^Genomic Source Class^LOINC|2a|^Germline
        OBX|5|CWE|53037-8^Genetic Sequence Variation Clinical Significance^LOINC|2a|^Tier 3: Unknown clinical significance
        OBX|6|NM|81258-6^Allelic Frequency^LOINC|2a|0.5
        OBX|7|ST|48005-3^Amino Acid Change p.HGVS^LOINC|2a|p.Asn372His
        OBX|8|CWE|48004-6^DNA Change c.HGVS^LOINC|2a|^c.1114A>C
        OBX|9|ST|48000-4^Chromosome^LOINC|2a|13
        OBX|10|CWE|48006-1^Molecular Consequence^LOINC|2a|^Missense Variant
        OBX|11|CWE|62374-4^Human Reference Sequence Assembly Version^LOINC|2a|^GRCh38
        OBX|12|ST|83005-9^Variant Category^LOINC|2a|Simple
        OBX|13|ST|69548-6^Genetic Variant Assessment^LOINC|2a|Detected
        OBX|14|CWE|53034-5^Allelic State^LOINC|2a|Heterozygous
        "#);

        Ok(())
    }
}
