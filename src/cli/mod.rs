pub mod api_client;
mod commands;
pub mod error;
pub mod remote;
pub mod utils;


use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::content::{BlogForm, ProjectForm};
use commands::blog::BlogEdit;
use commands::project::ProjectEdit;
use commands::serve::ServeArgs;
use error::CliResult;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio server and admin CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: FOLIO_API_URL env or http://localhost:3737)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Admin session token from `folio login`
    #[arg(long, global = true, env = "FOLIO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the portfolio server
    Serve(ServeArgs),
    /// Log in and print a session token
    Login {
        /// Admin password
        #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Project management commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Blog post management commands
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },
    /// Tech stack management commands
    Tech {
        #[command(subcommand)]
        command: TechCommands,
    },
    /// Resume commands
    Resume {
        #[command(subcommand)]
        command: ResumeCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add a project
    Add {
        title: String,
        #[arg(long)]
        description: String,
        /// Comma-separated skills
        #[arg(long, default_value = "")]
        skills: String,
        #[arg(long, default_value = "")]
        github_url: String,
        #[arg(long, default_value = "")]
        live_url: String,
    },
    /// Replace fields of a project
    Edit {
        /// Current title
        key: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated skills
        #[arg(long)]
        skills: Option<String>,
        /// Empty string clears the link
        #[arg(long)]
        github_url: Option<String>,
        /// Empty string clears the link
        #[arg(long)]
        live_url: Option<String>,
    },
    /// Delete a project
    Delete {
        /// Title of the project
        key: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum BlogCommands {
    /// List blog posts
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add a blog post
    Add {
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        url: String,
    },
    /// Replace fields of a blog post
    Edit {
        /// Current title
        key: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete a blog post
    Delete {
        key: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TechCommands {
    /// List technologies grouped by category
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List categories
    Categories,
    /// Add a technology
    Add {
        name: String,
        /// Existing or new category
        #[arg(long)]
        category: String,
    },
    /// Replace fields of a technology
    Edit {
        /// Current name
        key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a technology
    Delete {
        key: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
    /// Rename a category across every technology in it
    RenameCategory { from: String, to: String },
}

#[derive(Subcommand)]
enum ResumeCommands {
    /// Show whether a resume is uploaded
    Status,
    /// Upload a PDF resume (max 5MB)
    Upload { path: PathBuf },
    /// Download the current resume
    Download {
        #[arg(short, long, default_value = "resume.pdf")]
        output: PathBuf,
    },
}

fn print(result: CliResult<String>) -> miette::Result<()> {
    let output = result?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(Commands::Serve(args)) => return commands::serve::run(args).await,
        Some(command) => command,
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["folio", "--help"]);
            return Ok(());
        }
    };

    let api_client = api_client::ApiClient::new(cli.api_url).with_token(cli.token);

    match command {
        Commands::Serve(_) => Ok(()),
        Commands::Login { password } => print(commands::login::login(&api_client, &password).await),
        Commands::Project { command } => print(match command {
            ProjectCommands::List { format } => {
                commands::project::list_projects(&api_client, &format).await
            }
            ProjectCommands::Add {
                title,
                description,
                skills,
                github_url,
                live_url,
            } => {
                let form = ProjectForm {
                    title,
                    description,
                    skills,
                    github_url,
                    live_url,
                };
                commands::project::add_project(&api_client, form).await
            }
            ProjectCommands::Edit {
                key,
                title,
                description,
                skills,
                github_url,
                live_url,
            } => {
                let changes = ProjectEdit {
                    title,
                    description,
                    skills,
                    github_url,
                    live_url,
                };
                commands::project::edit_project(&api_client, &key, changes).await
            }
            ProjectCommands::Delete { key, force } => {
                commands::project::delete_project(&api_client, &key, force).await
            }
        }),
        Commands::Blog { command } => print(match command {
            BlogCommands::List { format } => commands::blog::list_blogs(&api_client, &format).await,
            BlogCommands::Add {
                title,
                description,
                url,
            } => {
                let form = BlogForm {
                    title,
                    description,
                    url,
                };
                commands::blog::add_blog(&api_client, form).await
            }
            BlogCommands::Edit {
                key,
                title,
                description,
                url,
            } => {
                let changes = BlogEdit {
                    title,
                    description,
                    url,
                };
                commands::blog::edit_blog(&api_client, &key, changes).await
            }
            BlogCommands::Delete { key, force } => {
                commands::blog::delete_blog(&api_client, &key, force).await
            }
        }),
        Commands::Tech { command } => print(match command {
            TechCommands::List { format } => commands::tech::list_tech(&api_client, &format).await,
            TechCommands::Categories => commands::tech::list_categories(&api_client).await,
            TechCommands::Add { name, category } => {
                commands::tech::add_tech(&api_client, &name, &category).await
            }
            TechCommands::Edit {
                key,
                name,
                category,
            } => commands::tech::edit_tech(&api_client, &key, name, category).await,
            TechCommands::Delete { key, force } => {
                commands::tech::delete_tech(&api_client, &key, force).await
            }
            TechCommands::RenameCategory { from, to } => {
                commands::tech::rename_category(&api_client, &from, &to).await
            }
        }),
        Commands::Resume { command } => print(match command {
            ResumeCommands::Status => commands::resume::status(&api_client).await,
            ResumeCommands::Upload { path } => commands::resume::upload(&api_client, &path).await,
            ResumeCommands::Download { output } => {
                commands::resume::download(&api_client, &output).await
            }
        }),
    }
}
