//! Tray scenario tests
//!
//! Die buttons, presets, notation input and clear

use crate::harness::TestServer;

/// Test: every die button exists and starts at zero
#[tokio::test]
async fn test_initial_tray() {
    let server = TestServer::start().await.expect("Failed to start server");

    let tray = server.tray().await.expect("tray failed");
    assert_eq!(tray["notation"], "");
    assert!(tray["preset"].is_null());
    for faces in ["4", "6", "8", "10", "12", "20"] {
        assert_eq!(tray["counts"][faces], 0, "d{}", faces);
    }
}

/// Test: dice button click increments count
#[tokio::test]
async fn test_die_button_increments_count() {
    let server = TestServer::start().await.expect("Failed to start server");

    let tray = server.click_die(6).await.expect("click failed");
    assert_eq!(tray["counts"]["6"], 1);

    let tray = server.click_die(6).await.expect("click failed");
    assert_eq!(tray["counts"]["6"], 2);
    assert_eq!(tray["notation"], "2d6");
}

/// Test: mixed die buttons build notation smallest die first
#[tokio::test]
async fn test_mixed_buttons_build_notation() {
    let server = TestServer::start().await.expect("Failed to start server");

    server.click_die(20).await.expect("click failed");
    server.click_die(4).await.expect("click failed");
    let tray = server.click_die(20).await.expect("click failed");
    assert_eq!(tray["notation"], "1d4+2d20");

    let roll = server.roll_tray().await.expect("roll failed");
    assert_eq!(roll.dice.len(), 3);
    assert!((3..=44).contains(&roll.total));
}

/// Test: unsupported die button is rejected
#[tokio::test]
async fn test_unsupported_die() {
    let server = TestServer::start().await.expect("Failed to start server");

    let resp = server.post_empty("/tray/die/100").await.expect("request failed");
    assert_eq!(resp.status(), 400);

    let tray = server.tray().await.expect("tray failed");
    assert_eq!(tray["notation"], "");
}

/// Test: clear button resets everything
#[tokio::test]
async fn test_clear_resets_everything() {
    let server = TestServer::start().await.expect("Failed to start server");

    server.preset("1d20").await.expect("preset failed");
    server.click_die(12).await.expect("click failed");
    let tray = server.clear().await.expect("clear failed");

    assert_eq!(tray["notation"], "");
    assert!(tray["preset"].is_null());
    let selected = tray["counts"]
        .as_object()
        .unwrap()
        .values()
        .filter(|count| count.as_u64() != Some(0))
        .count();
    assert_eq!(selected, 0);

    // Nothing left to roll
    let resp = server.post_empty("/tray/roll").await.expect("request failed");
    assert_eq!(resp.status(), 400);
}

/// Test: preset replaces die selection
#[tokio::test]
async fn test_preset_replaces_selection() {
    let server = TestServer::start().await.expect("Failed to start server");

    server.click_die(6).await.expect("click failed");
    let tray = server.preset("all").await.expect("preset failed");
    assert_eq!(tray["notation"], "1d4+1d6+1d8+1d10+1d12+1d20");
    assert_eq!(tray["counts"]["6"], 0);

    let resp = server.post_empty("/tray/preset/9d9").await.expect("request failed");
    assert_eq!(resp.status(), 404);
}

/// Test: notation box edits without rolling
#[tokio::test]
async fn test_set_notation() {
    let server = TestServer::start().await.expect("Failed to start server");

    server.click_die(4).await.expect("click failed");
    let resp = server
        .put("/tray/notation", &serde_json::json!({ "notation": "2d8+1" }))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);

    let tray = server.tray().await.expect("tray failed");
    assert_eq!(tray["notation"], "2d8+1");
    assert_eq!(tray["counts"]["4"], 0);

    let roll = server.roll_tray().await.expect("roll failed");
    assert!((3..=17).contains(&roll.total));
}
