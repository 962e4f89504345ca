use planner::{CatalogCode, SemesterCode};
use tracing::{debug, instrument};

use super::{Session, Workspace, parse_code, parse_term, terminal::Colorize};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Delete the selected courses
    Delete(Selection),

    /// Move the selected courses into another semester
    Move {
        #[command(flatten)]
        selection: Selection,

        /// The destination term
        #[arg(long, value_parser = parse_term)]
        to: SemesterCode,
    },
}

/// Which courses a bulk action applies to.
#[derive(Debug, clap::Args)]
pub struct Selection {
    /// Select from these terms
    #[arg(long = "from", value_parser = parse_term, required = true)]
    terms: Vec<SemesterCode>,

    /// Only select these courses (default: every course in the terms)
    #[arg(long = "course", value_parser = parse_code)]
    codes: Vec<CatalogCode>,
}

impl Selection {
    /// Selects the matching placements and returns how many were selected.
    fn apply(&self, session: &mut Session) -> anyhow::Result<usize> {
        let mut selected = 0;
        for term in &self.terms {
            let id = session.semester(*term)?;
            let courses: Vec<_> = session
                .planner
                .semester(id)
                .into_iter()
                .flat_map(|semester| &semester.courses)
                .filter(|course| self.codes.is_empty() || self.codes.contains(&course.code))
                .map(|course| course.id)
                .collect();
            selected += session.planner.select_courses(courses);
        }
        debug!(selected, "selection built");
        Ok(selected)
    }
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;

        match self {
            Self::Delete(selection) => {
                let selected = selection.apply(&mut session)?;
                let change = session.planner.delete_selected_courses();
                session.commit(change)?;
                report("Deleted", selected, session.planner.selection().count());
            }
            Self::Move { selection, to } => {
                let target = session.semester(to)?;
                let selected = selection.apply(&mut session)?;
                let change = session.planner.move_selected_courses(target);
                session.commit(change)?;

                let left_behind = session
                    .planner
                    .selection()
                    .filter(|course| {
                        session
                            .planner
                            .locate(*course)
                            .is_some_and(|semester| semester.id != target)
                    })
                    .count();
                report(&format!("Moved to {to}:"), selected, left_behind);
            }
        }

        Ok(())
    }
}

fn report(action: &str, selected: usize, skipped: usize) {
    println!(
        "{}",
        format!("{action} {} courses", selected - skipped).success()
    );
    if skipped > 0 {
        println!(
            "{}",
            format!("   {skipped} locked courses skipped").warning()
        );
    }
}
