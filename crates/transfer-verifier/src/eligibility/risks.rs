use crate::reference::MajorRequirementSet;

use super::domain::{
    IgetcStatus, MajorRequirementStatus, RiskItem, RiskKind, Severity, ASSIST_IGETC_URL,
    ASSIST_URL,
};
use super::grades::round2;

/// A GPA above the minimum but within this margin is flagged as uncompetitive.
pub const COMPETITIVE_GPA_MARGIN: f64 = 0.3;

/// GPA values keep at least one decimal place in messages ("3.0", "3.25").
pub(crate) fn format_gpa(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Risks in fixed category order: GPA, units, major prep, IGETC.
///
/// Categories that do not trigger are omitted and nothing is re-sorted by
/// severity.
pub fn identify_risks(
    requirements: &MajorRequirementSet,
    gpa: f64,
    total_units: f64,
    major_status: &MajorRequirementStatus,
    igetc_status: &IgetcStatus,
) -> Vec<RiskItem> {
    let mut risks = Vec::new();

    if let Some(risk) = gpa_risk(requirements, gpa) {
        risks.push(risk);
    }
    if let Some(risk) = unit_risk(requirements, total_units) {
        risks.push(risk);
    }

    let missing_count = major_status.missing.len();
    if missing_count > 0 {
        risks.push(RiskItem {
            kind: RiskKind::MajorPrep,
            severity: Severity::High,
            message: format!("Missing {missing_count} required major prep course(s)"),
            source: ASSIST_URL.to_string(),
        });
    }

    let missing_areas: Vec<&str> = igetc_status
        .iter()
        .filter(|(_, area)| area.required && !area.completed)
        .map(|(code, _)| code.as_str())
        .collect();
    if !missing_areas.is_empty() {
        risks.push(RiskItem {
            kind: RiskKind::Igetc,
            severity: Severity::Medium,
            message: format!("IGETC areas incomplete: {}", missing_areas.join(", ")),
            source: ASSIST_IGETC_URL.to_string(),
        });
    }

    risks
}

fn gpa_risk(requirements: &MajorRequirementSet, gpa: f64) -> Option<RiskItem> {
    let min_gpa = requirements.min_gpa;
    let (severity, message) = if gpa < min_gpa {
        (
            Severity::High,
            format!(
                "GPA ({}) is below minimum requirement ({})",
                format_gpa(gpa),
                format_gpa(min_gpa)
            ),
        )
    } else if gpa < min_gpa + COMPETITIVE_GPA_MARGIN {
        (
            Severity::Medium,
            format!(
                "GPA ({}) meets minimum but may not be competitive",
                format_gpa(gpa)
            ),
        )
    } else {
        return None;
    };

    Some(RiskItem {
        kind: RiskKind::Gpa,
        severity,
        message,
        source: requirements.source_url.clone(),
    })
}

fn unit_risk(requirements: &MajorRequirementSet, total_units: f64) -> Option<RiskItem> {
    let (severity, message) = if total_units < requirements.min_units {
        (
            Severity::High,
            format!(
                "Need {} units minimum, have {}",
                requirements.min_units,
                round2(total_units)
            ),
        )
    } else if total_units > requirements.max_units {
        (
            Severity::Medium,
            format!(
                "Unit count ({}) exceeds {} cap",
                round2(total_units),
                requirements.max_units
            ),
        )
    } else {
        return None;
    };

    Some(RiskItem {
        kind: RiskKind::Units,
        severity,
        message,
        source: requirements.source_url.clone(),
    })
}
