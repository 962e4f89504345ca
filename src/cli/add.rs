use planner::{
    CatalogCode, CreditPolicy, DragCoordinator, DropOutcome, DropTarget, SemesterCode,
    drag::Draggable,
};
use tracing::instrument;

use super::{
    Workspace, parse_code, parse_term,
    terminal::{Colorize, load_label},
};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The term to place the courses in (e.g. 2024f)
    #[clap(value_parser = parse_term)]
    term: SemesterCode,

    /// Catalog codes of the courses to place (e.g. "CS 1336")
    #[clap(value_parser = parse_code, required = true)]
    codes: Vec<CatalogCode>,
}

impl Command {
    /// Each course is dropped onto the semester as if dragged out of the
    /// requirement bank, so every one becomes a fresh placement.
    #[instrument(level = "debug", skip(self), fields(term = %self.term))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let target = session.semester(self.term)?;

        let mut coordinator = DragCoordinator::new();
        let zone = coordinator.register_drop_zone(DropTarget::Semester(target));

        let mut added = 0;
        for code in self.codes {
            let drag = coordinator.register_draggable(Draggable::BankItem { code: code.clone() });
            match coordinator.finish_drag(&mut session.planner, drag, Some(zone)) {
                DropOutcome::Committed(_) => {
                    added += 1;
                    println!("Added {code} to {}", self.term);
                }
                DropOutcome::Rejected(rejection) => {
                    anyhow::bail!(session.explain(&rejection));
                }
                DropOutcome::NoOp | DropOutcome::Cancelled => {}
            }
            coordinator.unregister_draggable(drag);
        }

        if added > 0 {
            session.save()?;
        }

        let policy = CreditPolicy::from(&session.config);
        if let Some(semester) = session.planner.semester(target) {
            let summary = policy.summarise(semester);
            println!(
                "{}",
                format!("{}: {} credits", self.term, summary.credits).dim()
            );
            if summary.is_warning() {
                println!("{}", load_label(summary.load));
            }
        }

        Ok(())
    }
}
