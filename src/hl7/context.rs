//! Normalization of patient, provider, order and coverage fields.

use chrono::NaiveDate;

use crate::err::{EncodeError, Subject};

use super::input::{Biomarker, Report};
use super::tables::Panel;

lazy_static::lazy_static! {
    /// Trailing sample type, e.g., `T`, `N` or `N1`.
    static ref SAMPLE_TYPE_SUFFIX: regex::Regex = regex::Regex::new("[A-Za-z][0-9]?$").unwrap();
}

/// Coverage metrics for the tumor header, already rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coverage {
    pub pct_20x: f64,
    pub pct_200x: f64,
    pub pct_500x: f64,
    pub mean_depth: f64,
}

/// Identifiers of the matched normal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalOrder {
    pub sample_id: String,
    pub order_number: String,
    pub date_ordered: String,
    pub date_received: String,
}

/// Normalized sample information, derived once per report.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleContext {
    /// Sample id with the sample type suffix stripped.
    pub sample_id: String,
    pub mrn: String,
    pub patient_last_name: String,
    pub patient_first_name: String,
    pub birth_date: String,
    /// One of `F`, `M` or `O`.
    pub sex: char,
    pub provider_id: String,
    pub provider_last_name: String,
    pub provider_first_name: String,
    pub order_number: String,
    pub date_ordered: String,
    pub date_received: String,
    pub panel: Panel,
    /// `"<tumor type> (<abbreviation>)"`
    pub tumor_type: String,
    pub coverage: Coverage,
    /// MSI score as reported, empty if absent.
    pub msi: String,
    /// TMB score as reported, empty if absent.
    pub tmb: String,
    /// `None` if the report carries no matched-normal order.
    pub normal_order: Option<NormalOrder>,
}

impl SampleContext {
    /// Extract the context from `report`.
    pub fn from_report(report: &Report) -> Result<Self, EncodeError> {
        let state = &report.sample_state;
        let subject = Subject {
            sample_id: state.sample_name.clone(),
            patient_name: state.patient_name.clone(),
        };

        let panel = state
            .panel
            .trim()
            .parse::<Panel>()
            .map_err(|_| EncodeError::UnknownPanel(state.panel.clone()))?;
        let (patient_last_name, patient_first_name) = split_name(&state.patient_name);
        let (provider_last_name, provider_first_name) = split_name(&state.ordering_physician);

        let normal_order = match report.custom_field("N_SID") {
            Some(normal_sample_id) => Some(NormalOrder {
                sample_id: strip_sample_type(&normal_sample_id),
                order_number: report.custom_field("N_OrderID").unwrap_or_default(),
                date_ordered: format_date(
                    &subject,
                    &report.custom_field("N_DateOrdered").unwrap_or_default(),
                )?,
                date_received: format_date(
                    &subject,
                    &report.custom_field("N_DateReceived").unwrap_or_default(),
                )?,
            }),
            None => None,
        };

        Ok(Self {
            sample_id: strip_sample_type(&state.sample_name),
            mrn: zero_pad(&state.mrn, 7),
            patient_last_name,
            patient_first_name,
            birth_date: format_date(&subject, &state.dob)?,
            sex: sex_code(&state.sex),
            provider_id: zero_pad(&report.custom_field("ProviderID").unwrap_or_default(), 6),
            provider_last_name,
            provider_first_name,
            order_number: report.custom_field("OrderID").unwrap_or_default(),
            date_ordered: format_date(&subject, &state.date_ordered)?,
            date_received: format_date(&subject, &state.date_received)?,
            panel,
            tumor_type: format!("{} ({})", report.tumor_type, report.tumor_type_abbrev),
            coverage: coverage(&subject, report)?,
            msi: signature(report, "MSI"),
            tmb: signature(report, "TMB"),
            normal_order,
        })
    }
}

/// Convert `M/D/YYYY`, optionally followed by a time, into `YYYYMMDD`.
pub fn format_date(subject: &Subject, value: &str) -> Result<String, EncodeError> {
    let malformed = || subject.malformed(format!("invalid date {:?}", value));

    let date = value.split_whitespace().next().ok_or_else(malformed)?;
    let parts = date.split('/').collect::<Vec<_>>();
    let [month, day, year] = *parts.as_slice() else {
        return Err(malformed());
    };
    if year.len() != 4 || month.is_empty() || month.len() > 2 || day.is_empty() || day.len() > 2 {
        return Err(malformed());
    }
    let parse = |s: &str| s.parse::<u32>().map_err(|_| malformed());
    let date = NaiveDate::from_ymd_opt(parse(year)? as i32, parse(month)?, parse(day)?)
        .ok_or_else(malformed)?;

    Ok(date.format("%Y%m%d").to_string())
}

/// Split `"Last, First"` or `"Last, First (MRN)"` into trimmed parts.
pub fn split_name(value: &str) -> (String, String) {
    let name = value.split('(').next().unwrap_or_default();
    let mut parts = name.splitn(2, ',');
    let last = parts.next().unwrap_or_default().trim().to_string();
    let first = parts.next().unwrap_or_default().trim().to_string();
    (last, first)
}

/// Strip the trailing sample type so tumor and normal ids match.
pub fn strip_sample_type(sample_id: &str) -> String {
    let sample_id = sample_id.trim();
    SAMPLE_TYPE_SUFFIX.replace(sample_id, "").into_owned()
}

fn zero_pad(value: &str, width: usize) -> String {
    format!("{:0>width$}", value.trim(), width = width)
}

fn sex_code(value: &str) -> char {
    match value {
        "Female" => 'F',
        "Male" => 'M',
        _ => 'O',
    }
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a decimal for an OBX value; integral values keep one decimal (`1.0`, `813.0`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn coverage(subject: &Subject, report: &Report) -> Result<Coverage, EncodeError> {
    let summary = report.coverage_summary.clone().unwrap_or_default();
    let metric = |field: &str, fallback: Option<f64>| -> Result<f64, EncodeError> {
        match report.custom_field(field) {
            Some(value) => value.trim_end_matches('%').parse::<f64>().map_err(|_| {
                subject.malformed(format!("invalid coverage field {}: {:?}", field, value))
            }),
            None => fallback.ok_or_else(|| subject.malformed(format!("missing coverage {}", field))),
        }
    };

    Ok(Coverage {
        pct_20x: round2(metric("Pct20x", summary.pct20x)?),
        pct_200x: round2(metric("Pct200x", summary.pct200x)?),
        pct_500x: round2(metric("Pct500x", summary.pct500x)?),
        mean_depth: round2(metric("MeanDepth", summary.mean_depth)?.round()),
    })
}

fn signature(report: &Report, name: &str) -> String {
    report
        .biomarkers
        .iter()
        .find_map(|biomarker| match biomarker {
            Biomarker::Signature(signature) if signature.gene_name == name => {
                Some(
                    signature
                        .quantitative_value
                        .as_ref()
                        .map(|value| value.to_string())
                        .unwrap_or_default(),
                )
            }
            _ => None,
        })
        .unwrap_or_default()
}
