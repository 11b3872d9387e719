use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::records;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::content::{BlogForm, BlogPost, Stored};

#[derive(Debug, Default)]
pub struct BlogEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Tabled)]
struct BlogDisplay {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Stored<BlogPost>> for BlogDisplay {
    fn from(stored: &Stored<BlogPost>) -> Self {
        Self {
            title: truncate_with_ellipsis(&stored.record.title, 40),
            description: truncate_with_ellipsis(&stored.record.description, 50),
            url: stored.record.url.clone(),
        }
    }
}

pub async fn list_blogs(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let controller = records::load::<BlogForm>(api_client).await?;
    let blogs = controller.list();

    match format {
        "json" => Ok(serde_json::to_string_pretty(blogs)?),
        _ if blogs.is_empty() => Ok("No blog posts found.".to_string()),
        _ => {
            let rows: Vec<BlogDisplay> = blogs.iter().map(|b| b.into()).collect();
            let mut table = Table::new(rows);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

pub async fn add_blog(api_client: &ApiClient, form: BlogForm) -> CliResult<String> {
    records::add(api_client, Default::default(), form).await
}

pub async fn edit_blog(api_client: &ApiClient, key: &str, changes: BlogEdit) -> CliResult<String> {
    let controller = records::load::<BlogForm>(api_client).await?;
    records::edit(api_client, controller, key, |form| {
        if let Some(title) = changes.title {
            form.title = title;
        }
        if let Some(description) = changes.description {
            form.description = description;
        }
        if let Some(url) = changes.url {
            form.url = url;
        }
    })
    .await
}

pub async fn delete_blog(api_client: &ApiClient, key: &str, force: bool) -> CliResult<String> {
    records::delete::<BlogForm>(api_client, key, force).await
}
