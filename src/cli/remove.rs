use planner::{CatalogCode, SemesterCode};
use tracing::instrument;

use super::{Workspace, parse_code, parse_term, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term holding the course
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// Catalog code of the course to remove
    #[clap(value_parser = parse_code)]
    code: CatalogCode,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(term = %self.term, code = %self.code))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let semester = session.semester(self.term)?;
        let course = session.course(semester, &self.code)?;

        let change = session
            .planner
            .remove_course_from_semester(semester, course);
        session.commit(change)?;

        println!(
            "{}",
            format!("Removed {} from {}", self.code, self.term).success()
        );
        Ok(())
    }
}
