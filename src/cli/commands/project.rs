use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::records;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_list, format_optional, truncate_with_ellipsis};
use crate::content::{Project, ProjectForm, Stored};

/// Field changes for `project edit`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProjectEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Tabled)]
struct ProjectDisplay {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Skills")]
    skills: String,
    #[tabled(rename = "GitHub")]
    github: String,
    #[tabled(rename = "Live")]
    live: String,
}

impl From<&Stored<Project>> for ProjectDisplay {
    fn from(stored: &Stored<Project>) -> Self {
        let project = &stored.record;
        Self {
            title: truncate_with_ellipsis(&project.title, 40),
            description: truncate_with_ellipsis(&project.description, 50),
            skills: format_list(&project.skills),
            github: format_optional(project.github_url.as_deref()),
            live: format_optional(project.live_url.as_deref()),
        }
    }
}

/// List projects
pub async fn list_projects(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let controller = records::load::<ProjectForm>(api_client).await?;
    let projects = controller.list();

    match format {
        "json" => Ok(serde_json::to_string_pretty(projects)?),
        _ => Ok(format_table(projects)),
    }
}

fn format_table(projects: &[Stored<Project>]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let rows: Vec<ProjectDisplay> = projects.iter().map(|p| p.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// Add a project
pub async fn add_project(api_client: &ApiClient, form: ProjectForm) -> CliResult<String> {
    records::add(api_client, Default::default(), form).await
}

/// Edit a project by title (or id)
pub async fn edit_project(
    api_client: &ApiClient,
    key: &str,
    changes: ProjectEdit,
) -> CliResult<String> {
    let controller = records::load::<ProjectForm>(api_client).await?;
    records::edit(api_client, controller, key, |form| {
        if let Some(title) = changes.title {
            form.title = title;
        }
        if let Some(description) = changes.description {
            form.description = description;
        }
        if let Some(skills) = changes.skills {
            form.skills = skills;
        }
        if let Some(url) = changes.github_url {
            form.github_url = url;
        }
        if let Some(url) = changes.live_url {
            form.live_url = url;
        }
    })
    .await
}

/// Delete a project by title (or id)
pub async fn delete_project(api_client: &ApiClient, key: &str, force: bool) -> CliResult<String> {
    records::delete::<ProjectForm>(api_client, key, force).await
}
