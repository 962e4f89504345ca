use planner::{CatalogCode, SemesterCode};
use tracing::instrument;

use super::{Workspace, parse_code, parse_term};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term holding the course
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// Catalog code of the course
    #[clap(value_parser = parse_code)]
    code: CatalogCode,

    /// Remove the override instead of setting it
    #[arg(long)]
    clear: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(term = %self.term, code = %self.code))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let semester = session.semester(self.term)?;

        let change =
            session
                .planner
                .set_course_prereq_override(semester, !self.clear, &self.code);
        session.commit(change)?;

        if self.clear {
            println!("{} in {} now requires its prerequisites", self.code, self.term);
        } else {
            println!("{} in {} no longer requires its prerequisites", self.code, self.term);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::cli::fixtures::{reload, seed_plan};

    fn command(term: &str, code: &str, clear: bool) -> Command {
        Command {
            term: parse_term(term).unwrap(),
            code: parse_code(code).unwrap(),
            clear,
        }
    }

    #[test]
    fn sets_and_clears_the_override() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());

        command("2024f", "CS 2336", false).run(&workspace).unwrap();
        assert!(reload(&workspace).semesters[0].courses[2].prereq_override);

        command("2024f", "CS 2336", true).run(&workspace).unwrap();
        assert!(!reload(&workspace).semesters[0].courses[2].prereq_override);
    }

    #[test]
    fn unknown_course_is_an_error() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());
        assert!(command("2024f", "CS 4348", false).run(&workspace).is_err());
    }
}
