//! Tech stack commands.
//!
//! A category that does not exist yet is submitted through the form's
//! custom-category field, the way the admin UI does it.

use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::records;
use crate::cli::error::{CliError, CliResult};
use crate::cli::remote::HttpCollection;
use crate::cli::utils::apply_table_style;
use crate::content::{Tech, TechForm};

#[derive(Tabled)]
struct CategoryDisplay {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Technologies")]
    names: String,
}

fn choose_category(known: &[String], form: &mut TechForm, category: String) {
    if known.contains(&category) {
        form.category = category;
        form.use_custom_category = false;
    } else {
        form.new_category = category;
        form.use_custom_category = true;
    }
}

/// List technologies grouped by category
pub async fn list_tech(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let controller = records::load::<TechForm>(api_client).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(controller.list())?),
        _ if controller.list().is_empty() => Ok("No technologies found.".to_string()),
        _ => {
            let rows: Vec<CategoryDisplay> = controller
                .grouped()
                .into_iter()
                .map(|(category, members)| CategoryDisplay {
                    category,
                    names: members
                        .iter()
                        .map(|m| m.record.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            let mut table = Table::new(rows);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Existing categories, one per line
pub async fn list_categories(api_client: &ApiClient) -> CliResult<String> {
    let controller = records::load::<TechForm>(api_client).await?;
    let categories = controller.categories();
    if categories.is_empty() {
        return Ok("No categories yet.".to_string());
    }
    Ok(categories.join("\n"))
}

pub async fn add_tech(api_client: &ApiClient, name: &str, category: &str) -> CliResult<String> {
    let controller = records::load::<TechForm>(api_client).await?;
    let mut form = TechForm {
        name: name.to_string(),
        ..TechForm::default()
    };
    choose_category(&controller.categories(), &mut form, category.trim().to_string());
    records::add(api_client, controller, form).await
}

pub async fn edit_tech(
    api_client: &ApiClient,
    key: &str,
    name: Option<String>,
    category: Option<String>,
) -> CliResult<String> {
    let controller = records::load::<TechForm>(api_client).await?;
    let known = controller.categories();
    records::edit(api_client, controller, key, |form| {
        if let Some(name) = name {
            form.name = name;
        }
        if let Some(category) = category {
            choose_category(&known, form, category.trim().to_string());
        }
    })
    .await
}

pub async fn delete_tech(api_client: &ApiClient, key: &str, force: bool) -> CliResult<String> {
    records::delete::<TechForm>(api_client, key, force).await
}

/// Rename a category across every technology in it
pub async fn rename_category(api_client: &ApiClient, from: &str, to: &str) -> CliResult<String> {
    if from == to.trim() {
        return Ok("Category unchanged.".to_string());
    }
    let mut controller = records::load::<TechForm>(api_client).await?;
    if !controller.categories().iter().any(|c| c == from) {
        return Err(CliError::NotFound(format!(
            "Category '{}' not found",
            from
        )));
    }
    controller
        .rename_category(&HttpCollection::<Tech>::new(api_client), from, to)
        .await;
    records::outcome(&controller)
}
