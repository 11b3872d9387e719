//! Portfolio content records.
//!
//! These types are shared by the server, the admin CLI and the wasm frontend,
//! so nothing in here may depend on tokio or the store backends.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Collections
// =============================================================================

/// The named record collections exposed by a content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Projects,
    Blogs,
    Techstack,
    Resume,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Projects => "projects",
            CollectionKind::Blogs => "blogs",
            CollectionKind::Techstack => "techstack",
            CollectionKind::Resume => "resume",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of mutation carried by a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Broadcast to subscribers whenever a store mutation is accepted.
///
/// `id` is absent for batch changes such as a category rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: CollectionKind,
    pub change: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ChangeEvent {
    pub fn new(collection: CollectionKind, change: ChangeKind, id: impl Into<String>) -> Self {
        Self {
            collection,
            change,
            id: Some(id.into()),
        }
    }

    pub fn batch(collection: CollectionKind, change: ChangeKind) -> Self {
        Self {
            collection,
            change,
            id: None,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A record that cannot be persisted as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Please select or enter a category")]
    MissingCategory,
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_optional(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

// =============================================================================
// Entity trait
// =============================================================================

/// Behavior shared by every record collection.
///
/// Records are identified for display and for the flat REST surface by their
/// natural key (a title or a name).
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection this entity lives in.
    const COLLECTION: CollectionKind;

    /// Singular display name, e.g. "Project".
    const LABEL: &'static str;

    /// The human-chosen unique field.
    fn natural_key(&self) -> &str;

    /// Trim text fields and drop blank optional values.
    fn normalize(&mut self);

    /// Check that every required field is present.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Normalize then validate, returning the record ready for persistence.
    fn prepared(mut self) -> Result<Self, ValidationError> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }
}

/// A record together with the identifier its store assigned.
///
/// For the file store the identifier is the natural key; the document store
/// generates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<E> {
    pub id: String,
    #[serde(flatten)]
    pub record: E,
}

impl<E: Entity> Stored<E> {
    pub fn new(id: impl Into<String>, record: E) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }

    pub fn label(&self) -> &str {
        self.record.natural_key()
    }
}

// =============================================================================
// Records
// =============================================================================

/// A showcased project.
///
/// Missing fields deserialize as empty so an incomplete submission fails
/// validation with a field message rather than a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(utoipa::ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[cfg_attr(feature = "backend", schema(example = "Portfolio API"))]
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

impl Entity for Project {
    const COLLECTION: CollectionKind = CollectionKind::Projects;
    const LABEL: &'static str = "Project";

    fn natural_key(&self) -> &str {
        &self.title
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        self.skills = self
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        trim_optional(&mut self.github_url);
        trim_optional(&mut self.live_url);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

/// A link to an external blog post.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct BlogPost {
    #[cfg_attr(feature = "backend", schema(example = "Shipping a Rust service"))]
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Entity for BlogPost {
    const COLLECTION: CollectionKind = CollectionKind::Blogs;
    const LABEL: &'static str = "Blog post";

    fn natural_key(&self) -> &str {
        &self.title
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.url);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("url", &self.url)
    }
}

/// A technology shown in the tech stack, grouped by free-text category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Tech {
    #[cfg_attr(feature = "backend", schema(example = "Rust"))]
    pub name: String,
    #[cfg_attr(feature = "backend", schema(example = "Core Backend"))]
    pub category: String,
}

impl Entity for Tech {
    const COLLECTION: CollectionKind = CollectionKind::Techstack;
    const LABEL: &'static str = "Technology";

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.category);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// The single resume record, pointing at an uploaded PDF blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub storage_id: String,
    pub updated_at: String,
}

// =============================================================================
// Display helpers
// =============================================================================

/// Group technologies by category, keeping categories in first-seen order.
pub fn group_by_category<'a, I>(techs: I) -> Vec<(String, Vec<Tech>)>
where
    I: IntoIterator<Item = &'a Tech>,
{
    let mut groups: Vec<(String, Vec<Tech>)> = Vec::new();
    for tech in techs {
        match groups.iter_mut().find(|(name, _)| *name == tech.category) {
            Some((_, members)) => members.push(tech.clone()),
            None => groups.push((tech.category.clone(), vec![tech.clone()])),
        }
    }
    groups
}

/// Unique categories, sorted, for the category picker.
pub fn categories<'a, I>(techs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Tech>,
{
    let mut names: Vec<String> = techs.into_iter().map(|t| t.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}
