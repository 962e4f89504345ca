use planner::SemesterCode;
use tracing::instrument;

use super::{Workspace, parse_term, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term to clear
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(term = %self.term))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let id = session.semester(self.term)?;
        let before = session
            .planner
            .semester(id)
            .map_or(0, |semester| semester.courses.len());

        if before == 0 {
            println!("{} has no courses", self.term);
            return Ok(());
        }

        if !self.yes {
            println!("Removing every unlocked course from {}", self.term);
            prompt_to_proceed()?;
        }

        let change = session.planner.delete_all_courses_from_semester(id);
        session.commit(change)?;

        let after = session
            .planner
            .semester(id)
            .map_or(0, |semester| semester.courses.len());
        println!(
            "{}",
            format!("Removed {} courses from {}", before - after, self.term).success()
        );
        if after > 0 {
            println!("{}", format!("   {after} locked courses kept").dim());
        }

        Ok(())
    }
}
