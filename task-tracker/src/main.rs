use clap::{Parser, Subcommand};
use std::path::PathBuf;
use task_tracker::{Status, StoreError, Task, TaskStore};

#[derive(Parser, Debug)]
#[command(
    name = "task-cli",
    version,
    about = "A simple command-line task management tool"
)]
struct Cli {
    /// Path to the task file
    #[arg(long, global = true, default_value = "tasks.json")]
    file: PathBuf,

    /// Fail instead of starting empty when the task file is malformed
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new task
    Add { description: String },
    /// Update a task's description
    Update { id: u32, description: String },
    /// Delete a task
    Delete { id: u32 },
    /// Mark a task as in-progress
    MarkInProgress { id: u32 },
    /// Mark a task as done
    MarkDone { id: u32 },
    /// List tasks, optionally filtered by status
    List { status: Option<Status> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    let store = TaskStore::new(&args.file).with_strict_parsing(args.strict);

    match args.command {
        Commands::Add { description } => {
            let id = store.add(&description)?;
            println!("Task added successfully (ID: {id})");
        }
        Commands::Update { id, description } => match store.update(id, &description) {
            Ok(()) => println!("Task updated successfully (ID: {id})"),
            Err(err) => report(err)?,
        },
        Commands::Delete { id } => match store.delete(id) {
            Ok(()) => println!("Task deleted successfully (ID: {id})"),
            Err(err) => report(err)?,
        },
        Commands::MarkInProgress { id } => mark(&store, id, Status::InProgress)?,
        Commands::MarkDone { id } => mark(&store, id, Status::Done)?,
        Commands::List { status } => {
            let tasks = store.list(status)?;
            print_tasks(&tasks, status);
        }
    }

    Ok(())
}

fn mark(store: &TaskStore, id: u32, status: Status) -> anyhow::Result<()> {
    match store.mark(id, status) {
        Ok(()) => println!("Task marked as {status} (ID: {id})"),
        Err(err) => report(err)?,
    }
    Ok(())
}

/// A missing task gets its own line and a clean exit; anything else is a
/// real failure.
fn report(err: StoreError) -> anyhow::Result<()> {
    match err {
        StoreError::TaskNotFound(id) => {
            println!("Task not found (ID: {id})");
            Ok(())
        }
        other => Err(other.into()),
    }
}

fn print_tasks(tasks: &[Task], filter: Option<Status>) {
    if tasks.is_empty() {
        match filter {
            Some(status) => println!("No {status} tasks found."),
            None => println!("No tasks found."),
        }
        return;
    }
    match filter {
        Some(status) => println!("{} Tasks ({}):", status.display_name(), tasks.len()),
        None => println!("All Tasks ({}):", tasks.len()),
    }
    println!("{}", "=".repeat(80));
    for task in tasks {
        println!("{task}");
    }
}
