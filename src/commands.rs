use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::eligibility::kcet::{colleges_for_rank, KcetMatch, DEFAULT_KCET_CATEGORY, DEFAULT_KCET_YEAR};
use crate::eligibility::{EligibilityEvaluator, EligibilityReport, KcetQuery, Stream, StudentProfile};
use crate::error::AppError;
use crate::telemetry;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// PUC stream: science, scienceBio, commerce or arts
    #[arg(long)]
    pub(crate) stream: Stream,
    /// Aggregate PUC percentage (0-100)
    #[arg(long, value_parser = parse_percentage)]
    pub(crate) percentage: f64,
    /// Only list colleges whose location contains this text
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Catalog JSON file or CSV directory (overrides APP_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct KcetArgs {
    /// KCET rank (1 or greater)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) rank: u32,
    /// Reservation category: General, SC, ST, OBC, 2A, 2B, 3A or 3B
    #[arg(long, default_value = DEFAULT_KCET_CATEGORY)]
    pub(crate) category: String,
    /// Cutoff year
    #[arg(long, default_value_t = DEFAULT_KCET_YEAR)]
    pub(crate) year: u16,
    /// Catalog JSON file or CSV directory (overrides APP_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn parse_percentage(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("percentage must be between 0 and 100, got {value}"))
    }
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog, AppError> {
    let mut config = AppConfig::load()?;
    if path.is_some() {
        config.catalog.path = path;
    }
    telemetry::init_for_cli(&config.telemetry)?;
    Ok(Catalog::load_or_fallback(&config.catalog)?)
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs {
        stream,
        percentage,
        location,
        catalog,
    } = args;

    let catalog = load_catalog(catalog)?;
    let profile = StudentProfile {
        stream,
        percentage,
        preferred_location: location,
    };
    let evaluator = EligibilityEvaluator::new();
    let report = evaluator.evaluate(&catalog, &profile);

    for line in render_eligibility(&evaluator, &profile, &report) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_kcet(args: KcetArgs) -> Result<(), AppError> {
    let KcetArgs {
        rank,
        category,
        year,
        catalog,
    } = args;

    let catalog = load_catalog(catalog)?;
    let query = KcetQuery {
        rank,
        category,
        year,
    };
    let matches = colleges_for_rank(&catalog, &query)?;

    for line in render_kcet(&query, &matches) {
        println!("{line}");
    }
    Ok(())
}

fn render_eligibility(
    evaluator: &EligibilityEvaluator,
    profile: &StudentProfile,
    report: &EligibilityReport<'_>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Eligibility for {} stream at {:.1}%",
        profile.stream, profile.percentage
    )];
    if let Some(location) = profile
        .preferred_location
        .as_deref()
        .filter(|location| !location.is_empty())
    {
        lines.push(format!("Preferred location: {location}"));
    }

    if report.eligible_degrees.is_empty() {
        lines.push("No eligible degrees found. Try a different stream or check the requirements of each program.".to_string());
        return lines;
    }

    lines.push(format!("\nEligible degrees ({})", report.eligible_degrees.len()));
    for degree in &report.eligible_degrees {
        let requirement = evaluator.requirement(degree);
        lines.push(format!(
            "- [{}] {} ({}) | minimum {}%",
            degree.id, degree.name, degree.category, requirement.minimum_percentage
        ));
    }

    lines.push(format!(
        "\nColleges offering them ({})",
        report.eligible_colleges.len()
    ));
    if report.eligible_colleges.is_empty() {
        lines.push("- none in the preferred location".to_string());
    }
    for college in &report.eligible_colleges {
        let rank = college
            .rank
            .map(|rank| format!("rank {rank}"))
            .unwrap_or_else(|| "unranked".to_string());
        lines.push(format!(
            "- [{}] {} | {} | {} | rating {:.1}",
            college.id, college.name, college.location, rank, college.rating
        ));
    }

    lines
}

fn render_kcet(query: &KcetQuery, matches: &[KcetMatch<'_>]) -> Vec<String> {
    let mut lines = vec![format!(
        "KCET {} | rank {} | category {}",
        query.year, query.rank, query.category
    )];

    if matches.is_empty() {
        lines.push(
            "No colleges found for the given rank. Please try a different rank or category."
                .to_string(),
        );
        return lines;
    }

    lines.push(format!("Found {} colleges matching your KCET rank.", matches.len()));
    for found in matches {
        lines.push(format!("- [{}] {}", found.college.id, found.college.name));
        for program in &found.programs {
            let name = program
                .degree_name
                .clone()
                .unwrap_or_else(|| format!("degree {}", program.degree_id));
            lines.push(format!("    {name} | closing rank {}", program.cutoff_rank));
        }
    }

    lines
}
