use colored::Colorize;
use crate::food::analysis::nutrition::{NutritionClient, GENERIC_FAILURE_MESSAGE};
use crate::shell::{AppShell, RequestStatus};
use indicatif::ProgressBar;
use std::time::Duration;
use uuid::Uuid;

pub mod food_cmd;
mod system;

pub use system::print_help;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

pub struct CommandHandler {
    shell: AppShell,
    client: NutritionClient,
}

impl CommandHandler {
    pub fn new(client: NutritionClient) -> Self {
        Self {
            shell: AppShell::new(),
            client,
        }
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<CommandOutcome, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(CommandOutcome::Continue);
        }

        // Handle single-word commands first
        match input.to_lowercase().as_str() {
            "help" => {
                print_help();
                return Ok(CommandOutcome::Continue);
            }
            "exit" | "quit" => {
                println!("👋 Goodbye!");
                return Ok(CommandOutcome::Exit);
            }
            "add" => {
                self.add_to_log()?;
                return Ok(CommandOutcome::Continue);
            }
            "log" => {
                print!("{}", food_cmd::render_log(self.shell.log()));
                return Ok(CommandOutcome::Continue);
            }
            "remove" => return Err("Usage: remove <n> or remove <id>".to_string()),
            _ => {}
        }

        if let Some(target) = input.strip_prefix("remove ") {
            self.remove_from_log(target.trim())?;
            return Ok(CommandOutcome::Continue);
        }

        // Anything else is a food description
        self.search(input).await?;
        Ok(CommandOutcome::Continue)
    }

    /// Runs one search and prints the card, or returns the error banner text.
    pub async fn search(&mut self, query: &str) -> Result<(), String> {
        self.shell.set_query(query);
        let query = self
            .shell
            .begin_search()
            .ok_or_else(|| "Please describe a food to analyze.".to_string())?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Analyzing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = self.client.estimate(&query).await;
        spinner.finish_and_clear();

        match self.shell.finish_search(outcome) {
            RequestStatus::Success => {
                if let Some(estimate) = self.shell.current() {
                    print!("{}", food_cmd::render_card(estimate));
                    print!("{}", food_cmd::render_macro_chart(&self.shell.macro_breakdown()));
                }
                Ok(())
            }
            _ => Err(self
                .shell
                .error_message()
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string()),
        }
    }

    fn add_to_log(&mut self) -> Result<(), String> {
        let entry = self
            .shell
            .add_to_log()
            .ok_or_else(|| "Nothing to add yet. Analyze a food first.".to_string())?;

        println!("✅ Added {} ({} kcal)", entry.estimate.name.cyan(), entry.estimate.calories);
        print!("{}", food_cmd::render_log(self.shell.log()));
        Ok(())
    }

    fn remove_from_log(&mut self, target: &str) -> Result<(), String> {
        let id = self.resolve_entry(target)?;
        match self.shell.remove_from_log(id) {
            Some(entry) => println!("🗑️  Removed {}", entry.estimate.name.cyan()),
            None => println!("Nothing to remove."),
        }
        print!("{}", food_cmd::render_log(self.shell.log()));
        Ok(())
    }

    /// Accepts a position in the displayed (newest-first) list or an entry id.
    fn resolve_entry(&self, target: &str) -> Result<Uuid, String> {
        if let Ok(position) = target.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.shell.log().newest_first().nth(index))
                .map(|entry| entry.id)
                .ok_or_else(|| format!("No log entry #{}. Type 'log' to see the list.", position));
        }

        Uuid::parse_str(target).map_err(|_| "Usage: remove <n> or remove <id>".to_string())
    }
}
