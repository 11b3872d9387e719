use serde_json::json;

use super::models::*;

fn tech(name: &str, category: &str) -> Tech {
    Tech {
        name: name.to_string(),
        category: category.to_string(),
    }
}

#[test]
fn project_uses_camel_case_and_omits_missing_urls() {
    let project = Project {
        title: "Foo".to_string(),
        description: "d".to_string(),
        skills: vec!["a".to_string()],
        github_url: Some("https://github.com/x/foo".to_string()),
        live_url: None,
    };

    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Foo",
            "description": "d",
            "skills": ["a"],
            "githubUrl": "https://github.com/x/foo"
        })
    );
}

#[test]
fn project_deserializes_without_optional_fields() {
    let project: Project =
        serde_json::from_value(json!({"title": "Foo", "description": "d"})).unwrap();
    assert!(project.skills.is_empty());
    assert_eq!(project.github_url, None);
    assert_eq!(project.live_url, None);
}

#[test]
fn stored_flattens_record_next_to_id() {
    let stored = Stored::new("abc123", tech("Rust", "Core Backend"));
    let value = serde_json::to_value(&stored).unwrap();
    assert_eq!(
        value,
        json!({"id": "abc123", "name": "Rust", "category": "Core Backend"})
    );

    let back: Stored<Tech> = serde_json::from_value(value).unwrap();
    assert_eq!(back, stored);
    assert_eq!(back.label(), "Rust");
}

#[test]
fn prepared_trims_and_drops_blank_optionals() {
    let project = Project {
        title: "  Foo ".to_string(),
        description: " d ".to_string(),
        skills: vec![" a ".to_string(), "".to_string(), "b".to_string()],
        github_url: Some("   ".to_string()),
        live_url: Some(" https://foo.dev ".to_string()),
    }
    .prepared()
    .unwrap();

    assert_eq!(project.title, "Foo");
    assert_eq!(project.description, "d");
    assert_eq!(project.skills, vec!["a", "b"]);
    assert_eq!(project.github_url, None);
    assert_eq!(project.live_url.as_deref(), Some("https://foo.dev"));
}

#[test]
fn validation_reports_first_missing_field() {
    let err = BlogPost {
        title: "Post".to_string(),
        description: " ".to_string(),
        url: String::new(),
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingField {
            field: "description"
        }
    );
    assert_eq!(err.to_string(), "description is required");
}

#[test]
fn tech_without_category_is_rejected() {
    let err = tech("Rust", "  ").validate().unwrap_err();
    assert_eq!(err, ValidationError::MissingCategory);
}

#[test]
fn natural_keys() {
    assert_eq!(tech("Rust", "x").natural_key(), "Rust");
    let blog = BlogPost {
        title: "Post".to_string(),
        ..Default::default()
    };
    assert_eq!(blog.natural_key(), "Post");
    assert_eq!(Project::COLLECTION.as_str(), "projects");
    assert_eq!(BlogPost::COLLECTION.as_str(), "blogs");
    assert_eq!(Tech::COLLECTION.as_str(), "techstack");
}

#[test]
fn group_by_category_keeps_first_seen_order() {
    let techs = vec![
        tech("Rust", "Core Backend"),
        tech("Postgres", "Databases & ORM"),
        tech("Go", "Core Backend"),
    ];

    let groups = group_by_category(&techs);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Core Backend");
    assert_eq!(
        groups[0].1.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["Rust", "Go"]
    );
    assert_eq!(groups[1].0, "Databases & ORM");
}

#[test]
fn categories_are_unique_and_sorted() {
    let techs = vec![
        tech("Rust", "Core Backend"),
        tech("Docker", "Infrastructure & DevOps"),
        tech("Go", "Core Backend"),
        tech("Git", "Developer Tools"),
    ];
    assert_eq!(
        categories(&techs),
        vec![
            "Core Backend",
            "Developer Tools",
            "Infrastructure & DevOps"
        ]
    );
}

#[test]
fn change_event_wire_format() {
    let event = ChangeEvent::new(CollectionKind::Blogs, ChangeKind::Deleted, "42");
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"collection": "blogs", "change": "deleted", "id": "42"})
    );

    let batch = ChangeEvent::batch(CollectionKind::Techstack, ChangeKind::Updated);
    assert_eq!(
        serde_json::to_value(&batch).unwrap(),
        json!({"collection": "techstack", "change": "updated"})
    );
}
