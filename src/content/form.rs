//! Editable form buffers for the admin controllers.
//!
//! A form holds raw text exactly as typed. List fields are edited as a single
//! comma-separated string and split back into a list on submit.

use super::models::{BlogPost, Entity, Project, Tech, ValidationError};

/// Conversion between a record and its editable form buffer.
pub trait EntityForm: Default + Clone + std::fmt::Debug {
    type Entity: Entity;

    /// Populate a form from an existing record (edit mode).
    fn from_record(record: &Self::Entity) -> Self;

    /// Build the full record to persist, or explain why it cannot be built.
    fn to_record(&self) -> Result<Self::Entity, ValidationError>;
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a list back into its editable form.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub skills: String,
    pub github_url: String,
    pub live_url: String,
}

impl EntityForm for ProjectForm {
    type Entity = Project;

    fn from_record(record: &Project) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            skills: join_list(&record.skills),
            github_url: record.github_url.clone().unwrap_or_default(),
            live_url: record.live_url.clone().unwrap_or_default(),
        }
    }

    fn to_record(&self) -> Result<Project, ValidationError> {
        Project {
            title: self.title.clone(),
            description: self.description.clone(),
            skills: split_list(&self.skills),
            github_url: optional(&self.github_url),
            live_url: optional(&self.live_url),
        }
        .prepared()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl EntityForm for BlogForm {
    type Entity = BlogPost;

    fn from_record(record: &BlogPost) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
        }
    }

    fn to_record(&self) -> Result<BlogPost, ValidationError> {
        BlogPost {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
        }
        .prepared()
    }
}

/// Tech form: the category is either picked from the existing ones or typed
/// in as a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechForm {
    pub name: String,
    pub category: String,
    pub new_category: String,
    pub use_custom_category: bool,
}

impl TechForm {
    /// The category that will be submitted.
    pub fn effective_category(&self) -> &str {
        if self.use_custom_category {
            self.new_category.trim()
        } else {
            self.category.trim()
        }
    }
}

impl EntityForm for TechForm {
    type Entity = Tech;

    fn from_record(record: &Tech) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            new_category: String::new(),
            use_custom_category: false,
        }
    }

    fn to_record(&self) -> Result<Tech, ValidationError> {
        let category = self.effective_category();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Tech {
            name: self.name.clone(),
            category: category.to_string(),
        }
        .prepared()
    }
}
