use clap::Subcommand;
use colored::Colorize;
use namekeeper_lib::{Result, Store};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the saved name
    Show,
    /// Save a new name, replacing the previous one
    Set { name: String },
}

pub async fn handle(store: &Store, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Show => match store.load().await? {
            Some(record) => println!("{}", record.name()),
            None => eprintln!("{}", "No name saved yet".dimmed()),
        },
        Command::Set { name } => {
            store.save(name.as_str()).await?;
            eprintln!("{} {}", "Saved".green(), name.as_str().bold());
        }
    }

    Ok(())
}
