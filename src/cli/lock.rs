use planner::{CatalogCode, SemesterCode};
use tracing::instrument;

use super::{Workspace, parse_code, parse_term};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term to lock or unlock
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// Only this course within the term
    #[arg(long, value_parser = parse_code)]
    course: Option<CatalogCode>,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(term = %self.term))]
    pub fn run(self, workspace: &Workspace, locked: bool) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let semester = session.semester(self.term)?;

        let (change, subject) = match &self.course {
            Some(code) => (
                session.planner.set_course_lock(semester, locked, code),
                format!("{code} in {}", self.term),
            ),
            None => (
                session.planner.set_semester_lock(semester, locked),
                self.term.to_string(),
            ),
        };

        let state = if locked { "locked" } else { "unlocked" };
        if session.commit(change)? {
            println!("{subject} {state}");
        } else {
            println!("{subject} already {state}");
        }
        Ok(())
    }
}
