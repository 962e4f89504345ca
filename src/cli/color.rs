use planner::{CatalogCode, Color, SemesterCode};
use tracing::instrument;

use super::{Workspace, parse_code, parse_color, parse_term, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term to tag
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// The colour (plain, red, orange, yellow, green, blue, purple, pink)
    #[clap(value_parser = parse_color)]
    color: Color,

    /// Tag this course instead of the whole semester
    #[arg(long, value_parser = parse_code)]
    course: Option<CatalogCode>,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(term = %self.term, color = %self.color))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let semester = session.semester(self.term)?;

        let (change, subject) = match &self.course {
            Some(code) => (
                session.planner.set_course_color(self.color, code, semester),
                format!("{code} in {}", self.term),
            ),
            None => (
                session.planner.set_semester_color(self.color, semester),
                self.term.to_string(),
            ),
        };

        session.commit(change)?;
        println!("{subject} is now {}", self.color.name().tagged(self.color));
        Ok(())
    }
}
