use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use jot::areas::repository::Repository;
use jot::artifacts::core::PagerWriter;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A minimal version control engine",
    long_about = "jot tracks snapshots of a directory tree in a content-addressable \
    object store, with a staging area, branches and history traversal. \
    It is a small engine, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the given files for the next commit. \
        Directories are expanded to every file beneath them."
    )]
    Add {
        #[arg(index = 1, num_args = 1.., required = true, help = "The paths to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "remove",
        about = "Unstage files",
        long_about = "This command removes the given paths from the staging area. \
        Workspace files are left untouched."
    )]
    Remove {
        #[arg(index = 1, num_args = 1.., required = true, help = "The paths to unstage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging area into a new commit with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit",
        long_about = "This command replaces the working directory with the snapshot of the \
        target branch or commit. With -b, a new branch is created at the current commit instead."
    )]
    Checkout {
        #[arg(short = 'b', required = false, help = "Create a new branch and switch to it")]
        branch: bool,
        #[arg(index = 1, help = "The branch, commit digest or digest prefix to switch to")]
        target: String,
    },
    #[command(
        name = "branch",
        about = "List, create or delete branches",
        long_about = "Without arguments this command lists branches, marking the current one. \
        With names it creates branches at the current commit; with -d it deletes them."
    )]
    Branch {
        #[arg(short = 'd', long = "delete", required = false, help = "Delete the named branches")]
        delete: bool,
        #[arg(index = 1, num_args = 0.., help = "The branch names")]
        names: Vec<String>,
    },
    #[command(
        name = "log",
        about = "Show commit history",
        long_about = "This command prints the history reachable from HEAD, newest first."
    )]
    Log,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            let mut repository = discover()?;

            repository.add(paths)?
        }
        Commands::Remove { paths } => {
            let mut repository = discover()?;

            repository.remove(paths)?
        }
        Commands::Commit { message } => {
            let mut repository = discover()?;

            repository.commit(message.as_str())?
        }
        Commands::Checkout { branch, target } => {
            let mut repository = discover()?;

            repository.checkout(target, *branch)?
        }
        Commands::Branch { delete, names } => {
            let mut repository = discover()?;

            if *delete {
                repository.branch_delete(names)?
            } else if names.is_empty() {
                repository.branch_list()?
            } else {
                for name in names {
                    repository.branch_create(name)?
                }
            }
        }
        Commands::Log => {
            let pwd = std::env::current_dir()?;
            let use_pager =
                std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none();

            if use_pager {
                let pager = minus::Pager::new();
                let mut repository = Repository::discover(
                    &pwd.to_string_lossy(),
                    Box::new(PagerWriter::new(pager.clone())),
                )?;

                repository.log()?;
                minus::page_all(pager)?
            } else {
                let mut repository = discover()?;

                repository.log()?
            }
        }
    }

    Ok(())
}

fn discover() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}
