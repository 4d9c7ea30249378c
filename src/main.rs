use std::{io::Write, path::PathBuf};

use clap::Parser;
use mysqlite::{
    DatabaseError, Table,
    executor::statement::{ExecuteResult, execute},
    planner::{
        parser::CommandParser,
        types::{Command, MetaCommand},
    },
    utils::art::{help_message, welcome_message},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mysqlite", version, about = "Single-table paged record store")]
struct Cli {
    /// Backing file for the table, created if missing
    #[arg(default_value = "mysqlite.db")]
    db_path: PathBuf,

    /// File to load and store line history in
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log filter written to stderr (e.g. "warn", "mysqlite=debug")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn process_command(parser: &CommandParser, line: &str, table: &mut Table) -> bool {
    let command = match parser.parse(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{e}");
            return true;
        }
    };

    match command {
        Command::Empty => {}
        Command::Meta(MetaCommand::Exit) => return false,
        Command::Meta(MetaCommand::Help) => println!("{}", help_message()),
        Command::Meta(MetaCommand::Clear) => {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
        }
        Command::Meta(MetaCommand::Count) => println!("Count: {}", table.row_count()),
        Command::Statement(statement) => match execute(&statement, table) {
            Ok(ExecuteResult::Selected(rows)) => {
                println!("Count: {}", rows.len());
                for row in rows {
                    println!("{row}");
                }
                println!("Executed.");
            }
            Ok(ExecuteResult::Inserted | ExecuteResult::Saved) => println!("Executed."),
            Err(DatabaseError::TableFull { .. }) => println!("Error: Table full."),
            Err(e) => println!("Error: {e}"),
        },
    }

    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut table = Table::open(&cli.db_path)?;
    println!("{}", welcome_message("MYSQLITE"));

    let mut rl = DefaultEditor::new()?;
    if let Some(history) = &cli.history {
        if let Err(e) = rl.load_history(history) {
            tracing::debug!(error = %e, "No history loaded");
        }
    }

    let parser = CommandParser::new();
    loop {
        match rl.readline("db > ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if !process_command(&parser, &line, &mut table) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(history) = &cli.history {
        if let Err(e) = rl.save_history(history) {
            tracing::warn!(error = %e, "Failed to save history");
        }
    }

    if let Err(e) = table.close() {
        println!("Error: {e}");
        return Err(e.into());
    }
    Ok(())
}
