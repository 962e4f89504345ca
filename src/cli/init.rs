use planner::{Config, PlanFile, PlanSnapshot, Semester, SemesterCode};
use tracing::instrument;

use super::{Workspace, parse_term};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The first term of the plan (e.g. 2024f or "Fall 2024")
    #[clap(value_parser = parse_term)]
    first: SemesterCode,

    /// The last term of the plan
    #[clap(value_parser = parse_term)]
    last: SemesterCode,

    /// Majors the plan is built for
    #[arg(long = "major", value_name = "NAME")]
    majors: Vec<String>,

    /// Credits transferred in (catalog codes or free text)
    #[arg(long = "transfer", value_name = "CREDIT")]
    transfer_credits: Vec<String>,

    /// Include summer terms
    #[arg(long)]
    summers: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let plan_path = workspace.plan_path();
        if plan_path.exists() {
            anyhow::bail!("Plan already exists at '{}'", plan_path.display());
        }
        if self.last < self.first {
            anyhow::bail!("{} comes before {}", self.last, self.first);
        }

        let semesters: Vec<Semester> = terms(self.first, self.last)
            .filter(|term| self.summers || !term.is_summer())
            .map(Semester::new)
            .collect();

        PlanFile::new(plan_path)
            .save(&PlanSnapshot {
                majors: self.majors,
                semesters,
                transfer_credits: self.transfer_credits,
                updated: None,
            })
            .map_err(|e| anyhow::anyhow!("Failed to create plan: {e}"))?;

        println!("Initialized plan in {}", plan_path.display());

        let config_path = workspace.config_path();
        if !config_path.exists() {
            Config::default()
                .save(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;
            println!("  Created: {}", config_path.display());
        }

        println!();
        println!("Next steps:");
        println!("  plan add {} \"CS 1336\"", self.first.compact());
        println!("  plan status");

        Ok(())
    }
}

/// Every term from `first` to `last`, inclusive.
fn terms(first: SemesterCode, last: SemesterCode) -> impl Iterator<Item = SemesterCode> {
    std::iter::successors(Some(first), move |term| {
        let next = term.next();
        (next <= last && next != *term).then_some(next)
    })
}

#[cfg(test)]
mod tests {
    use planner::Season;
    use tempfile::tempdir;

    use super::*;
    use crate::cli::fixtures::reload;

    fn command(first: &str, last: &str, summers: bool) -> Command {
        Command {
            first: parse_term(first).unwrap(),
            last: parse_term(last).unwrap(),
            majors: vec!["Computer Science".to_string()],
            transfer_credits: Vec::new(),
            summers,
        }
    }

    #[test]
    fn creates_fall_and_spring_terms() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("plan.yaml"));

        command("2024f", "2026s", false).run(&workspace).unwrap();

        let plan = reload(&workspace);
        let codes: Vec<String> = plan
            .semesters
            .iter()
            .map(|s| s.code.compact().to_string())
            .collect();
        assert_eq!(codes, ["2024f", "2025s", "2025f", "2026s"]);
        assert_eq!(plan.majors, ["Computer Science"]);
        assert!(tmp.path().join("planner.toml").exists());
    }

    #[test]
    fn includes_summers_on_request() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("plan.yaml"));

        command("2025s", "2025f", true).run(&workspace).unwrap();

        let plan = reload(&workspace);
        assert_eq!(plan.semesters.len(), 3);
        assert_eq!(plan.semesters[1].code, SemesterCode::new(2025, Season::Summer));
    }

    #[test]
    fn refuses_to_overwrite_a_plan() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("plan.yaml"));
        command("2024f", "2024f", false).run(&workspace).unwrap();

        assert!(command("2024f", "2025s", false).run(&workspace).is_err());
    }

    #[test]
    fn refuses_reversed_range() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("plan.yaml"));
        assert!(command("2025f", "2024f", false).run(&workspace).is_err());
    }
}
