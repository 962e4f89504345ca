use std::path::PathBuf;

use planner::{
    CatalogCode, Requirement,
    storage::load_catalog,
    validator::{fulfil_requirements, requirement_credit_total},
};
use tracing::{instrument, warn};

use super::{OutputFormat, Workspace, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The degree catalog (JSON)
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Work out satisfied courses from the plan instead of the catalog
    ///
    /// Every planned course, and every transfer credit that is a catalog
    /// code, satisfies each requirement that lists it.
    #[arg(long)]
    solve: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.catalog)?;

        let requirements = if self.solve {
            let session = workspace.open()?;
            let transfers: Vec<CatalogCode> = session
                .planner
                .transfer_credits()
                .iter()
                .filter_map(|credit| CatalogCode::new(credit.as_str()).ok())
                .collect();
            let planned = session.planner.planned_codes().chain(&transfers);
            fulfil_requirements(planned, &catalog.requirements)
        } else {
            catalog.requirements
        };

        match self.output {
            OutputFormat::Table => Self::output_table(&requirements),
            OutputFormat::Json => Self::output_json(&requirements)?,
        }
        Ok(())
    }

    fn output_table(requirements: &[Requirement]) {
        if requirements.is_empty() {
            println!("The catalog has no requirements");
            return;
        }

        println!("{:<4} {:<32} {:>9} {:>7}", "#", "Requirement", "Satisfied", "Credits");
        for (index, requirement) in requirements.iter().enumerate() {
            let satisfied = format!(
                "{}/{}",
                requirement.valid_courses.len(),
                requirement.courses.len()
            );
            let credits = match requirement_credit_total(requirement) {
                Ok(credits) => credits.to_string(),
                Err(e) => {
                    warn!("{e}");
                    "?".warning()
                }
            };
            let name = if requirement.is_started() {
                requirement.name.clone()
            } else {
                requirement.name.dim()
            };
            println!("{:<4} {name:<32} {satisfied:>9} {credits:>7}", index + 1);
        }
    }

    fn output_json(requirements: &[Requirement]) -> anyhow::Result<()> {
        use serde_json::json;

        let output: Vec<_> = requirements
            .iter()
            .map(|requirement| {
                let (credits, error) = match requirement_credit_total(requirement) {
                    Ok(credits) => (Some(credits), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                json!({
                    "name": requirement.name,
                    "courses": requirement.courses,
                    "validCourses": requirement.valid_courses,
                    "credits": credits,
                    "error": error,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
