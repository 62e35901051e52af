use outreach_browser::{BrowserEngine, PageDriver};
use outreach_core::BrowserSettings;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_engine_launch() {
    let engine = BrowserEngine::launch(BrowserSettings::default()).await;
    assert!(engine.is_ok(), "Failed to launch browser engine");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_content() {
    let engine = BrowserEngine::launch(BrowserSettings::default())
        .await
        .unwrap();
    let session = engine.new_session().await.unwrap();

    session.goto("https://example.com").await.unwrap();
    let content = session.content().await.unwrap();
    assert!(content.to_lowercase().contains("example"));

    session.close().await;
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_anchor_enumeration() {
    let engine = BrowserEngine::launch(BrowserSettings::default())
        .await
        .unwrap();
    let session = engine.new_session().await.unwrap();

    session.goto("https://example.com").await.unwrap();
    let anchors = session.anchors().await;
    assert!(!anchors.is_empty(), "example.com has at least one anchor");

    session.close().await;
}
