use storage::repository::ProgressRepository;
use vocab_core::model::WordId;

use super::test_harness::{ViewKind, setup_offline_harness};

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_renders_prompt_and_options() {
    let mut harness = setup_offline_harness(ViewKind::Learn);
    harness.rebuild();
    let html = harness.drive_until("word-option").await;

    assert!(html.contains("word-prompt"), "missing prompt in {html}");
    let options = html.matches(r#"class="word-option""#).count();
    assert_eq!(options, 8, "expected eight neutral options in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_overview_and_calendar() {
    let mut harness = setup_offline_harness(ViewKind::Progress);
    harness
        .repo
        .record_outcome(WordId::new(1), true)
        .await
        .expect("record outcome");
    harness
        .repo
        .record_outcome(WordId::new(2), false)
        .await
        .expect("record outcome");

    harness.rebuild();
    harness.drive_until("calendar-week").await;
    let html = harness.drive_until("Total words").await;

    assert!(html.contains("Total words: 16"), "missing total in {html}");
    assert!(html.contains("Learned: 1"), "missing learned in {html}");
    assert!(html.contains("Accuracy: 50%"), "missing accuracy in {html}");
    assert!(html.contains("2023-11-14: 2 words"), "missing today's cell in {html}");
    assert!(html.contains("Less"), "missing legend in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_offline_needs_no_sign_in() {
    let mut harness = setup_offline_harness(ViewKind::Login);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Offline mode"), "missing offline notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn header_smoke_shows_stats_only_when_flagged() {
    let mut with_stats = setup_offline_harness(ViewKind::Header {
        show_session_stats: true,
    });
    with_stats.rebuild();
    let html = with_stats.render();
    assert!(html.contains("✅ 2"), "missing correct count in {html}");
    assert!(html.contains("❌ 1"), "missing incorrect count in {html}");
    assert!(html.contains("anna"), "missing username in {html}");

    let mut without_stats = setup_offline_harness(ViewKind::Header {
        show_session_stats: false,
    });
    without_stats.rebuild();
    let html = without_stats.render();
    assert!(!html.contains("session-stats"), "unexpected stats in {html}");
}
