use std::io::{BufRead, Write};

use stockroom_core::DomainResult;
use stockroom_inventory::{Inventory, Record};

use crate::error::ConsoleError;
use crate::menu::{MENU, MenuCommand};
use crate::prompt::Prompter;

/// Whether the menu loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Menu-driven inventory session.
///
/// The loop only ends on `0) Quit` or when input runs out. Domain errors are
/// printed as a single `Error: ...` line and the menu is shown again.
/// Persisting the inventory afterwards is the caller's job.
pub struct Console<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        self.prompter.into_inner()
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self, inventory: &mut Inventory) -> Result<(), ConsoleError> {
        loop {
            match self.step(inventory) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(ConsoleError::InputClosed) => {
                    tracing::info!("input closed; leaving menu");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self, inventory: &mut Inventory) -> Result<Flow, ConsoleError> {
        self.prompter.say("")?;
        self.prompter.say(MENU)?;
        let choice = self.prompter.ask("Option: ")?;

        let command = match choice.parse::<MenuCommand>() {
            Ok(command) => command,
            Err(_) => {
                self.prompter.say("Invalid option. Choose between 0 and 7.")?;
                return Ok(Flow::Continue);
            }
        };

        if command == MenuCommand::Quit {
            self.prompter.say("Goodbye.")?;
            return Ok(Flow::Quit);
        }

        match self.dispatch(command, inventory)? {
            Ok(message) => self.prompter.say(message)?,
            Err(err) => {
                tracing::debug!(?command, error = %err, "command rejected");
                self.prompter.say(format!("Error: {err}"))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Collect the command's input, then apply it.
    ///
    /// The outer `Result` is the console itself failing; the inner one is the
    /// inventory rejecting the command.
    fn dispatch(
        &mut self,
        command: MenuCommand,
        inventory: &mut Inventory,
    ) -> Result<DomainResult<String>, ConsoleError> {
        let p = &mut self.prompter;

        let outcome = match command {
            MenuCommand::Add => {
                let id = p.ask_text("ID (unique): ")?;
                let name = p.ask_text("Name: ")?;
                let quantity = p.ask_non_negative_int("Quantity: ")?;
                let price = p.ask_non_negative_number("Price: ")?;
                Record::new(id, name, quantity, price)
                    .and_then(|record| inventory.add(record))
                    .map(|()| "Product added.".to_string())
            }
            MenuCommand::Delete => {
                let id = p.ask_text("ID to delete: ")?;
                inventory
                    .remove_by_id(&id)
                    .map(|_| "Product deleted.".to_string())
            }
            MenuCommand::UpdateQuantity => {
                let id = p.ask_text("ID: ")?;
                let quantity = p.ask_non_negative_int("New quantity: ")?;
                inventory
                    .update_quantity(&id, quantity)
                    .map(|()| "Quantity updated.".to_string())
            }
            MenuCommand::UpdatePrice => {
                let id = p.ask_text("ID: ")?;
                let price = p.ask_non_negative_number("New price: ")?;
                inventory
                    .update_price(&id, price)
                    .map(|()| "Price updated.".to_string())
            }
            MenuCommand::Search => {
                let text = p.ask_text("Name to search: ")?;
                Ok(render_matches(&inventory.find_by_name_substring(&text)))
            }
            MenuCommand::List => Ok(render_listing(&inventory.list_all())),
            MenuCommand::Summary => {
                let summary = inventory.summary();
                Ok(format!(
                    "Summary: distinct items: {} | total value: ${:.2}",
                    summary.distinct_items, summary.total_value
                ))
            }
            MenuCommand::Quit => Ok(String::new()),
        };

        Ok(outcome)
    }
}

fn render_matches(records: &[Record]) -> String {
    if records.is_empty() {
        return "No matches found.".to_string();
    }
    let mut out = format!("{} match(es):", records.len());
    for record in records {
        out.push_str(&format!("\n    {record}"));
    }
    out
}

fn render_listing(records: &[Record]) -> String {
    if records.is_empty() {
        return "Inventory is empty.".to_string();
    }
    let mut out = format!("Products ({}):", records.len());
    for record in records {
        out.push_str(&format!("\n    {record}"));
    }
    out
}
