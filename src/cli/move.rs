use std::str::FromStr;

use planner::{
    CatalogCode, DragCoordinator, DropOutcome, DropTarget, SemesterCode, drag::Draggable,
};
use tracing::instrument;

use super::{Workspace, parse_code, parse_term, terminal::Colorize};

/// Where a course is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Bank,
    Term(SemesterCode),
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("bank") {
            Ok(Self::Bank)
        } else {
            parse_term(s).map(Self::Term)
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Catalog code of the course to move
    #[clap(value_parser = parse_code)]
    code: CatalogCode,

    /// The term currently holding the course
    #[arg(long, value_parser = parse_term)]
    from: SemesterCode,

    /// The destination term, or "bank" to take the course out of the plan
    #[arg(long, value_parser = Destination::from_str)]
    to: Destination,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(code = %self.code))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let from = session.semester(self.from)?;
        let course = session.course(from, &self.code)?;
        let target = match self.to {
            Destination::Bank => DropTarget::Bank,
            Destination::Term(term) => DropTarget::Semester(session.semester(term)?),
        };

        let mut coordinator = DragCoordinator::new();
        let drag = coordinator.register_draggable(Draggable::Placement {
            course,
            semester: from,
        });
        let zone = coordinator.register_drop_zone(target);

        match coordinator.finish_drag(&mut session.planner, drag, Some(zone)) {
            DropOutcome::Committed(_) => {
                session.save()?;
                let message = match self.to {
                    Destination::Bank => format!("Removed {} from {}", self.code, self.from),
                    Destination::Term(term) => {
                        format!("Moved {} from {} to {term}", self.code, self.from)
                    }
                };
                println!("{}", message.success());
            }
            DropOutcome::NoOp | DropOutcome::Cancelled => {
                println!("{} already in {}", self.code, self.from);
            }
            DropOutcome::Rejected(rejection) => anyhow::bail!(session.explain(&rejection)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::cli::fixtures::{codes, reload, seed_plan};

    fn command(code: &str, from: &str, to: &str) -> Command {
        Command {
            code: parse_code(code).unwrap(),
            from: parse_term(from).unwrap(),
            to: to.parse().unwrap(),
        }
    }

    #[test]
    fn moves_between_semesters_keeping_identity() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());
        let id = reload(&workspace).semesters[0].courses[2].id;

        command("CS 2336", "2024f", "2025s").run(&workspace).unwrap();

        let plan = reload(&workspace);
        assert_eq!(codes(&plan.semesters[0]), ["CS 1336", "MATH 2417"]);
        assert_eq!(codes(&plan.semesters[1]), ["CS 2336"]);
        assert_eq!(plan.semesters[1].courses[0].id, id);
    }

    #[test]
    fn dropping_on_the_bank_removes() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());

        command("MATH 2417", "2024f", "bank")
            .run(&workspace)
            .unwrap();

        let plan = reload(&workspace);
        assert_eq!(codes(&plan.semesters[0]), ["CS 1336", "CS 2336"]);
    }

    #[test]
    fn locked_target_leaves_both_semesters_untouched() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());
        let before = reload(&workspace);

        assert!(
            command("CS 1336", "2024f", "Summer 2025")
                .run(&workspace)
                .is_err()
        );

        assert_eq!(reload(&workspace).semesters, before.semesters);
    }

    #[test]
    fn locked_source_cannot_give_up_courses() {
        let tmp = tempdir().unwrap();
        let workspace = seed_plan(tmp.path());

        let err = command("HIST 1301", "2025u", "2025s")
            .run(&workspace)
            .unwrap_err();
        assert_eq!(err.to_string(), "Summer 2025 is locked");
    }

    #[test]
    fn destination_parses_bank_and_terms() {
        assert_eq!("Bank".parse::<Destination>(), Ok(Destination::Bank));
        assert!(matches!(
            "2024f".parse::<Destination>(),
            Ok(Destination::Term(_))
        ));
        assert!("nowhere".parse::<Destination>().is_err());
    }
}
