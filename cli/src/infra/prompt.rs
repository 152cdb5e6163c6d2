//! Infrastructure implementation of the `Prompter` port with `dialoguer`.

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::application::ports::Prompter;

/// Reads answers from the controlling terminal.
///
/// Errors (no TTY, closed input) are returned instead of retried so an
/// unattended run cannot spin on an empty answer forever.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn choose(&self, title: &str, items: &[(&str, &str)]) -> Result<String> {
        println!();
        println!(
            "  {}",
            title.if_supports_color(Stdout, |t| t.bold().cyan().to_string())
        );
        for (key, label) in items {
            println!("    {key}) {label}");
        }
        println!();
        self.ask("Select an option")
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("reading answer from terminal")
    }

    fn ask_secret(&self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .context("reading secret from terminal")
    }
}
