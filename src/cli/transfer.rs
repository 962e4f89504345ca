use planner::Change;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List the credits transferred in
    List,

    /// Record credits transferred in
    Add {
        /// The credits to add (for example "RHET 1302")
        #[arg(required = true)]
        credits: Vec<String>,
    },

    /// Drop recorded transfer credits
    Remove {
        /// The credits to remove
        #[arg(required = true)]
        credits: Vec<String>,
    },
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;

        let (verb, changed) = match self {
            Self::List => {
                if session.planner.transfer_credits().is_empty() {
                    println!("No transfer credits recorded");
                }
                for credit in session.planner.transfer_credits() {
                    println!("  {credit}");
                }
                return Ok(());
            }
            Self::Add { credits } => (
                "Added",
                edit(&credits, |credit| {
                    session.planner.add_transfer_credit(credit)
                }),
            ),
            Self::Remove { credits } => (
                "Removed",
                edit(&credits, |credit| {
                    session.planner.remove_transfer_credit(credit)
                }),
            ),
        };

        if !changed.is_empty() {
            session.save()?;
            println!("{}", format!("{verb} {}", changed.join(", ")).success());
        }
        Ok(())
    }
}

/// Applies an edit to each credit, returning those that changed the plan.
fn edit(credits: &[String], mut apply: impl FnMut(&str) -> Change) -> Vec<String> {
    let mut changed = Vec::new();
    for credit in credits {
        let credit = credit.trim();
        if apply(credit).is_applied() {
            changed.push(credit.to_string());
        } else {
            println!("{}", format!("{credit} unchanged").dim());
        }
    }
    changed
}
