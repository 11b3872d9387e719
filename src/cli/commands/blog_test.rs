use crate::cli::commands::blog::*;
use crate::cli::commands::test_support::spawn_test_server;
use crate::content::BlogForm;

fn form(title: &str) -> BlogForm {
    BlogForm {
        title: title.to_string(),
        description: "notes".to_string(),
        url: format!("https://blog.example.com/{}", title.to_lowercase()),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_edit_delete_blog() {
    let server = spawn_test_server().await;
    let api = server.admin().await;

    assert_eq!(
        add_blog(&api, form("First")).await.unwrap(),
        "Blog post added successfully!"
    );

    edit_blog(
        &api,
        "First",
        BlogEdit {
            url: Some("https://elsewhere.example.com".to_string()),
            ..BlogEdit::default()
        },
    )
    .await
    .unwrap();

    let list: serde_json::Value =
        serde_json::from_str(&list_blogs(&api, "json").await.unwrap()).unwrap();
    assert_eq!(list[0]["url"], "https://elsewhere.example.com");
    assert_eq!(list[0]["description"], "notes");

    assert_eq!(
        delete_blog(&api, "First", true).await.unwrap(),
        "Blog post deleted successfully!"
    );
    assert_eq!(list_blogs(&api, "table").await.unwrap(), "No blog posts found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_requires_url() {
    let server = spawn_test_server().await;
    let api = server.admin().await;

    let err = add_blog(
        &api,
        BlogForm {
            url: String::new(),
            ..form("First")
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "url is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_blog_is_not_found() {
    let server = spawn_test_server().await;
    let api = server.admin().await;

    let err = delete_blog(&api, "Nope", true).await.unwrap_err();

    assert_eq!(err.to_string(), "Blog post 'Nope' not found");
}
