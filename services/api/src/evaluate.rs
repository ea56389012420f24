use crate::infra::load_reference_catalog;
use chrono::Utc;
use clap::{Args, Subcommand};
use serde_json::json;
use std::fmt::{self, Write};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use transfer_verifier::config::AppConfig;
use transfer_verifier::eligibility::{EligibilityEngine, VerificationResult};
use transfer_verifier::error::AppError;
use transfer_verifier::explainer::{Explanation, ResultExplainer};
use transfer_verifier::reference::{ReferenceCatalog, ReferenceDataProvider};
use transfer_verifier::transcript::TranscriptImporter;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Transcript CSV with columns course_code,course_name,units,grade,semester
    #[arg(long)]
    pub(crate) transcript: PathBuf,
    /// Community college the courses were taken at
    #[arg(long)]
    pub(crate) college: String,
    /// Intended major at the target campus
    #[arg(long)]
    pub(crate) major: String,
    /// Target campus (defaults to APP_DEFAULT_TARGET_UC)
    #[arg(long)]
    pub(crate) target_uc: Option<String>,
    /// Print the result and explanation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ReferenceCommand {
    /// List majors with requirements on file
    Majors,
    /// List colleges with equivalency tables on file
    Colleges,
    /// Show the requirements for one major
    Major {
        /// Major name exactly as listed by `reference majors`
        name: String,
    },
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        transcript,
        college,
        major,
        target_uc,
        json,
    } = args;

    let config = AppConfig::load()?;
    let courses = TranscriptImporter::from_path(&transcript)?;
    let catalog = load_reference_catalog(&config.reference)?;
    let engine = EligibilityEngine::new(Arc::new(catalog));

    let target = target_uc.unwrap_or(config.reference.default_target);
    let result = engine.evaluate(&courses, &college, &major, &target)?;
    let explanation = ResultExplainer::explain(&result);

    if json {
        let payload = json!({
            "generated_at": Utc::now(),
            "college": college,
            "result": result,
            "explanation": explanation,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("JSON output unavailable: {}", err),
        }
    } else {
        let mut out = String::new();
        render_result(&mut out, &result, &explanation, &college).map_err(render_error)?;
        print!("{}", out);
    }

    Ok(())
}

pub(crate) fn run_reference(command: ReferenceCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_reference_catalog(&config.reference)?;
    let mut out = String::new();
    render_reference(&mut out, &catalog, &command).map_err(render_error)?;
    print!("{}", out);
    Ok(())
}

fn render_error(err: fmt::Error) -> AppError {
    AppError::Io(io::Error::other(err))
}

pub(crate) fn render_result<W: Write>(
    out: &mut W,
    result: &VerificationResult,
    explanation: &Explanation,
    college: &str,
) -> fmt::Result {
    let summary = &result.summary;

    writeln!(
        out,
        "Transfer verification: {} at {} (from {})",
        summary.major, summary.target_uc, college
    )?;
    writeln!(
        out,
        "Status: {} | {}",
        result.eligibility_status.label(),
        result.eligibility_message
    )?;
    writeln!(
        out,
        "- GPA {} (minimum {}) | {} units (window {})",
        summary.gpa, summary.min_gpa_required, summary.total_units, summary.units_range
    )?;

    let requirements = &result.major_requirements;
    let total = requirements.completed.len() + requirements.missing.len();
    if total > 0 {
        writeln!(
            out,
            "\nMajor preparation ({} of {} complete)",
            requirements.completed.len(),
            total
        )?;
        for completed in &requirements.completed {
            writeln!(
                out,
                "  [x] {} via {}",
                completed.requirement, completed.matched_course
            )?;
        }
        for missing in &requirements.missing {
            writeln!(
                out,
                "  [ ] {} (any of: {})",
                missing.requirement,
                missing.acceptable_courses.join(", ")
            )?;
        }
    }

    if !result.igetc_status.is_empty() {
        writeln!(out, "\nIGETC areas")?;
        for (code, area) in &result.igetc_status {
            let state = match (area.completed, area.required) {
                (true, _) => "complete",
                (false, true) => "missing",
                (false, false) => "optional",
            };
            writeln!(out, "  {:<3} {:<36} {}", code, area.name, state)?;
        }
    }

    if !result.risks.is_empty() {
        writeln!(out, "\nRisks")?;
        for risk in &result.risks {
            writeln!(
                out,
                "  - [{}] {}: {}",
                risk.severity.label(),
                risk.kind.label(),
                risk.message
            )?;
        }
    }

    writeln!(out, "\nNext steps")?;
    for item in &explanation.action_items {
        writeln!(out, "  {}. {}", item.priority, item.action)?;
        for detail in &item.details {
            writeln!(out, "     {}", detail)?;
        }
    }

    if !result.notes.is_empty() {
        writeln!(out, "\nNotes")?;
        for note in &result.notes {
            writeln!(out, "  - {}", note)?;
        }
    }

    writeln!(out, "\n{}", explanation.summary)?;
    writeln!(out, "\n{}", result.disclaimer)
}

pub(crate) fn render_reference<W: Write>(
    out: &mut W,
    catalog: &ReferenceCatalog,
    command: &ReferenceCommand,
) -> fmt::Result {
    match command {
        ReferenceCommand::Majors => {
            for major in catalog.majors() {
                writeln!(out, "{}", major)?;
            }
        }
        ReferenceCommand::Colleges => {
            for college in catalog.colleges() {
                match catalog.equivalencies(&college) {
                    Some(table) if !table.is_empty() => {
                        writeln!(out, "{} ({} articulated courses)", college, table.len())?
                    }
                    _ => writeln!(out, "{} (no articulated courses)", college)?,
                }
            }
        }
        ReferenceCommand::Major { name } => match catalog.major_requirements(name) {
            Some(requirements) => {
                writeln!(out, "{}", name)?;
                writeln!(
                    out,
                    "- Minimum GPA {} | units {}",
                    requirements.min_gpa,
                    requirements.units_range()
                )?;
                for course in &requirements.required_courses {
                    writeln!(
                        out,
                        "  {}: {}",
                        course.name,
                        course.equivalent_codes.join(" / ")
                    )?;
                }
                if !requirements.source_url.is_empty() {
                    writeln!(out, "Source: {}", requirements.source_url)?;
                }
            }
            None => {
                writeln!(out, "No requirements on file for '{}'", name)?;
            }
        },
    }
    Ok(())
}
