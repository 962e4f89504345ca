use std::path::PathBuf;

use planner::{RequirementBank, storage::load_catalog};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The degree catalog (JSON)
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Requirement to search, by position (1 is the first)
    #[arg(short, long, default_value_t = 1)]
    requirement: usize,

    /// Only show courses whose code contains this text
    #[arg(short, long)]
    query: Option<String>,

    /// Show every match instead of the first page
    #[arg(long)]
    all: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let config = workspace.config()?;
        let catalog = load_catalog(&self.catalog)?;
        if catalog.is_empty() {
            println!("The catalog has no requirements");
            return Ok(());
        }

        let index = self
            .requirement
            .checked_sub(1)
            .filter(|index| *index < catalog.len())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No requirement {} (the catalog has {})",
                    self.requirement,
                    catalog.len()
                )
            })?;

        let mut bank = RequirementBank::with_config(catalog, &config);
        bank.set_requirement(index);
        if let Some(query) = self.query {
            bank.update_query(query);
        }

        let Some(requirement) = bank.active_requirement() else {
            return Ok(());
        };
        println!(
            "Requirement {}/{}: {}",
            index + 1,
            bank.catalog().len(),
            requirement.name.info()
        );
        match bank.credit_total() {
            Ok(credits) => println!("{}", format!("{credits} credit hours satisfied").dim()),
            Err(e) => println!("{}", e.to_string().warning()),
        }
        println!();

        let shown: Vec<_> = if self.all {
            bank.matches().collect()
        } else {
            bank.results()
        };
        if shown.is_empty() {
            println!("No matching courses");
            return Ok(());
        }

        for code in &shown {
            if requirement.valid_courses.contains(code) {
                println!("  {code} {}", "✓".success());
            } else {
                println!("  {code}");
            }
        }

        if !self.all && bank.has_more() {
            let total = bank.matches().count();
            println!(
                "{}",
                format!("  … and {} more (use --all)", total - shown.len()).dim()
            );
        }

        Ok(())
    }
}
