//! Plain-language rendering of a [`VerificationResult`].

use serde::{Deserialize, Serialize};

use crate::eligibility::{
    format_gpa, EligibilityStatus, MissingRequirement, RiskItem, RiskKind, Severity,
    VerificationResult,
};

/// Missing-course explanations list at most this many acceptable codes.
const LISTED_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: u8,
    pub action: String,
    pub details: Vec<String>,
    pub source: String,
}

/// Every explanation for one result, bundled for API and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub status: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub missing_courses: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

pub struct ResultExplainer;

impl ResultExplainer {
    pub fn explain(result: &VerificationResult) -> Explanation {
        Explanation {
            status: Self::explain_status(result),
            summary: Self::summary_paragraph(result),
            risks: result.risks.iter().map(Self::explain_risk).collect(),
            missing_courses: result
                .major_requirements
                .missing
                .iter()
                .map(Self::explain_missing_course)
                .collect(),
            action_items: Self::action_items(result),
        }
    }

    pub fn explain_status(result: &VerificationResult) -> String {
        let summary = &result.summary;
        match result.eligibility_status {
            EligibilityStatus::LikelyEligible => format!(
                "Great news! Based on official requirements, you appear to meet the basic \
                 eligibility criteria to transfer to {} for {}. Your GPA of {} meets the {} \
                 minimum, and your {} units are within the acceptable range. However, always \
                 verify this assessment with an academic counselor before submitting your \
                 application.",
                summary.target_uc,
                summary.major,
                format_gpa(summary.gpa),
                format_gpa(summary.min_gpa_required),
                summary.total_units
            ),
            EligibilityStatus::Conditional => format!(
                "You're making progress! Your GPA ({}) and unit count ({}) meet the \
                 requirements, but you have some missing coursework. You'll need to complete \
                 the missing courses listed below before or while applying. Consider meeting \
                 with a counselor to create a plan to complete these requirements.",
                format_gpa(summary.gpa),
                summary.total_units
            ),
            EligibilityStatus::NotYetEligible => "Based on the official requirements, you \
                don't yet meet all the criteria to transfer. This is common and fixable! \
                Review the specific issues below and work with a counselor to create a plan. \
                Many students need an extra semester or two to become eligible."
                .to_string(),
            EligibilityStatus::Unknown => "We couldn't determine your eligibility status. \
                This might be because the requirements for your major aren't in our reference \
                data. Please check assist.org directly or speak with a counselor."
                .to_string(),
        }
    }

    pub fn explain_risk(risk: &RiskItem) -> String {
        let prefix = match risk.severity {
            Severity::High => "Important: ",
            Severity::Medium => "Note: ",
            Severity::Low => "FYI: ",
        };
        let context = match risk.kind {
            RiskKind::Gpa => {
                " Your GPA is calculated from the grades on your transcript. \
                 If you have in-progress courses, your final GPA may change."
            }
            RiskKind::Units => {
                " Units are semester/quarter hours. Make sure to count all \
                 transferable courses, including in-progress ones."
            }
            RiskKind::MajorPrep => {
                " Major prep courses must be completed to be competitive. \
                 Check assist.org for your specific college's equivalencies."
            }
            RiskKind::Igetc => {
                " IGETC is the general education pattern for UC transfers. \
                 Some majors have partial IGETC exemptions."
            }
        };

        format!("{prefix}{}{context}", risk.message)
    }

    pub fn explain_missing_course(missing: &MissingRequirement) -> String {
        let codes = &missing.acceptable_courses;
        let mut listed = codes
            .iter()
            .take(LISTED_ALTERNATIVES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if codes.len() > LISTED_ALTERNATIVES {
            listed.push_str(&format!(
                " (and {} others)",
                codes.len() - LISTED_ALTERNATIVES
            ));
        }

        format!(
            "**{}**: This requirement can be fulfilled by taking one of these courses at your \
             community college: {listed}. Check assist.org to confirm the current articulation.",
            missing.requirement
        )
    }

    /// Action items ordered by priority, ties kept in insertion order. A
    /// counselor meeting is always the last item.
    pub fn action_items(result: &VerificationResult) -> Vec<ActionItem> {
        let mut actions = Vec::new();

        let missing = &result.major_requirements.missing;
        if !missing.is_empty() {
            actions.push(ActionItem {
                priority: 1,
                action: "Complete missing major prep courses".to_string(),
                details: missing
                    .iter()
                    .take(LISTED_ALTERNATIVES)
                    .map(|m| format!("• {}", m.requirement))
                    .collect(),
                source: "assist.org".to_string(),
            });
        }

        if let Some(risk) = result.risks.iter().find(|r| r.kind == RiskKind::Gpa) {
            actions.push(ActionItem {
                priority: 2,
                action: "Improve your GPA".to_string(),
                details: strings(&[
                    "Focus on getting A's and B's in remaining courses",
                    "Consider retaking courses where you got C's or lower",
                    "The higher your GPA, the more competitive you'll be",
                ]),
                source: risk.source.clone(),
            });
        }

        if let Some(risk) = result.risks.iter().find(|r| r.kind == RiskKind::Units) {
            let item = if risk.severity == Severity::High {
                ActionItem {
                    priority: 1,
                    action: "Earn more transferable units".to_string(),
                    details: vec![
                        format!(
                            "Your major expects {} semester units at transfer",
                            result.summary.units_range
                        ),
                        "Make sure all courses are UC-transferable".to_string(),
                        "Check with a counselor about your current total".to_string(),
                    ],
                    source: String::new(),
                }
            } else {
                ActionItem {
                    priority: 3,
                    action: "Watch your unit count".to_string(),
                    details: strings(&[
                        "You're approaching or over the unit cap",
                        "Extra units may not transfer",
                        "Plan your remaining courses carefully",
                    ]),
                    source: String::new(),
                }
            };
            actions.push(item);
        }

        actions.push(ActionItem {
            priority: 4,
            action: "Meet with an academic counselor".to_string(),
            details: strings(&[
                "Review this verification with a counselor",
                "Create a personalized education plan",
                "Get official guidance for your situation",
            ]),
            source: String::new(),
        });

        actions.sort_by_key(|item| item.priority);
        actions
    }

    pub fn summary_paragraph(result: &VerificationResult) -> String {
        let summary = &result.summary;
        let target = &summary.target_uc;
        let major = &summary.major;
        let mut parts = Vec::new();

        parts.push(match result.eligibility_status {
            EligibilityStatus::LikelyEligible => format!(
                "Based on the official requirements from assist.org and {target}, you appear \
                 to be on track for transferring to {target} for {major}."
            ),
            EligibilityStatus::Conditional => format!(
                "You're making good progress toward transferring to {target} for {major}, \
                 but there are some items you'll need to address."
            ),
            EligibilityStatus::NotYetEligible | EligibilityStatus::Unknown => format!(
                "You're working toward transferring to {target} for {major}, and there are \
                 several items that need attention."
            ),
        });

        parts.push(format!(
            "Currently, you have {} transferable units and a {} GPA.",
            summary.total_units,
            format_gpa(summary.gpa)
        ));

        let missing = result.major_requirements.missing.len();
        if missing > 0 {
            parts.push(format!(
                "You still need to complete {missing} major preparation course{}.",
                plural(missing)
            ));
        }

        let high = result
            .risks
            .iter()
            .filter(|risk| risk.severity == Severity::High)
            .count();
        if high > 0 {
            let verb = if high > 1 { "are" } else { "is" };
            parts.push(format!(
                "There {verb} {high} important issue{} to address before applying.",
                plural(high)
            ));
        }

        parts.push(
            "Remember to verify all information with an academic counselor, as requirements \
             can change and individual situations vary."
                .to_string(),
        );

        parts.join(" ")
    }
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
