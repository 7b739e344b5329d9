#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Bradley Tian",
    about = "A minimal local-first version-control system",
    long_about = "Gitlet is a minimal, local-first, content-addressed version-control \
    system. It manages a single working directory, a staging area, a commit \
    graph, named branches, and lightweight remotes reachable by filesystem path.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "rm", about = "Unstage a file and stage its removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of the current head")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with a matching message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "Three forms are accepted: `checkout -- <file>` restores a file from \
        the head commit, `checkout <commit> -- <file>` restores it from the named commit, \
        and `checkout <branch>` makes another branch current."
    )]
    Checkout {
        #[arg(value_name = "TARGET", num_args = 1..=3, help = "Checkout operands")]
        operands: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1, help = "The commit id, possibly abbreviated")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Record a remote repository under a name")]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "Path to the remote repository directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a recorded remote")]
    RmRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
    },
    #[command(name = "push", about = "Append the current head to a remote branch")]
    Push {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch")]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch's history into this repository")]
    Fetch {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch")]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch")]
        branch: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if std::env::args().len() <= 1 {
        println!("Please enter a command.");
        return Ok(());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // every front-end diagnostic goes to stdout with exit status 0
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => print!("{}", error),
                ErrorKind::InvalidSubcommand => println!("No command with that name exists."),
                _ => println!("Incorrect operands"),
            }
            return Ok(());
        }
    };

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) && !repository.is_initialized() {
        println!("Not in an initialized Gitlet directory.");
        return Ok(());
    }

    if let Err(error) = run(&mut repository, &cli.command).await {
        match error.downcast_ref::<GitletError>() {
            Some(diagnostic) => println!("{}", diagnostic),
            None => return Err(error),
        }
    }

    Ok(())
}

async fn run(repository: &mut Repository, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init().await,
        Commands::Add { path } => repository.add(path).await,
        Commands::Rm { path } => repository.rm(path).await,
        Commands::Commit { message } => repository.commit(message).await,
        Commands::Log => repository.log().await,
        Commands::GlobalLog => repository.global_log().await,
        Commands::Find { message } => repository.find(message).await,
        Commands::Status => repository.status().await,
        Commands::Checkout { .. } => {
            // clap swallows the `--` separator, so the raw operands decide
            // which checkout form was requested
            let operands: Vec<String> = std::env::args().skip(2).collect();
            match operands.as_slice() {
                [separator, path] if separator.as_str() == "--" => {
                    repository.checkout_file(path).await
                }
                [commit, separator, path] if separator.as_str() == "--" => {
                    repository.checkout_file_at(commit, path).await
                }
                [branch] => repository.checkout_branch(branch).await,
                _ => {
                    println!("Incorrect operands");
                    Ok(())
                }
            }
        }
        Commands::Branch { name } => repository.branch(name).await,
        Commands::RmBranch { name } => repository.rm_branch(name).await,
        Commands::Reset { commit } => repository.reset(commit).await,
        Commands::Merge { branch } => repository.merge(branch).await,
        Commands::AddRemote { name, path } => repository.add_remote(name, path).await,
        Commands::RmRemote { name } => repository.rm_remote(name).await,
        Commands::Push { remote, branch } => repository.push(remote, branch).await,
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch).await,
        Commands::Pull { remote, branch } => repository.pull(remote, branch).await,
    }
}
