use quiz_core::model::{Selection, TrackId};
use quiz_core::session::ProgressSnapshot;
use storage::repository::{InMemoryRepository, PassengerRepository, ProgressRepository};

use super::test_harness::{CONTENT, setup_quiz_harness};
use crate::vm::{QuizAction, Screen};

#[tokio::test(flavor = "current_thread")]
async fn landing_lists_tracks() {
    let mut harness = setup_quiz_harness(Some(CONTENT), InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Choose your mode"), "missing heading in {html}");
    assert!(html.contains("Easy"), "missing track label in {html}");
    assert!(html.contains("2 questions"), "missing count in {html}");
    assert!(html.contains("Hard"), "missing track label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_content_renders_unavailable() {
    let mut harness = setup_quiz_harness(None, InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;

    assert_eq!(harness.screen(), Screen::Unavailable);
    let html = harness.render();
    assert!(
        html.contains("No question data is available."),
        "missing message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn question_flow_renders_feedback_and_completion() {
    let mut harness = setup_quiz_harness(Some(CONTENT), InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;

    harness
        .act(QuizAction::ChooseTrack(TrackId::new("easy")))
        .await;
    let html = harness.render();
    assert!(html.contains("Quiz — Easy"), "missing heading in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Madrid is in Spain."), "missing prompt in {html}");

    harness.act(QuizAction::Select(Selection::Truth(true))).await;
    let html = harness.render();
    assert!(
        html.contains("Correct: It is the capital."),
        "missing feedback in {html}"
    );

    harness.act(QuizAction::Next).await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing position in {html}");
    assert!(html.contains("width:50%"), "missing progress in {html}");
    assert!(html.contains("Image missing"), "missing image fallback in {html}");
    assert!(html.contains("Paella pan"), "missing alt caption in {html}");

    harness.act(QuizAction::Select(Selection::Choice(1))).await;
    assert!(harness.render().contains("Try again."));
    harness.act(QuizAction::Next).await;

    let Screen::Completion(pass) = harness.screen() else {
        panic!("expected completion screen");
    };
    assert_eq!(pass.stickers_label, "1 / 2");
    assert_eq!(pass.gate, "C3");
    assert_eq!(pass.boarding_time, "22:18");
    assert!(pass.flight.starts_with("QZ"));

    let html = harness.render();
    assert!(html.contains("Boarding Pass"), "missing title in {html}");
    assert!(
        html.contains("Try again to collect more stickers."),
        "missing tier message in {html}"
    );
    assert!(html.contains("<rect"), "missing barcode in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mastery_hint_is_rendered() {
    let mut harness = setup_quiz_harness(Some(CONTENT), InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;

    harness
        .act(QuizAction::ChooseTrack(TrackId::new("hard")))
        .await;
    harness.act(QuizAction::Select(Selection::Truth(true))).await;
    let html = harness.render();
    assert!(html.contains("Hint: Tomatoes!"), "missing hint in {html}");

    harness.act(QuizAction::Next).await;
    assert!(matches!(harness.screen(), Screen::Question(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn saved_progress_resumes_and_passenger_name_prefills() {
    let repo = InMemoryRepository::new();
    repo.save_progress(&ProgressSnapshot::new(TrackId::new("easy"), [0]))
        .await
        .unwrap();
    repo.save_passenger_name("Lucía").await.unwrap();

    let mut harness = setup_quiz_harness(Some(CONTENT), repo);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "expected resume in {html}");

    harness.act(QuizAction::Select(Selection::Choice(0))).await;
    harness.act(QuizAction::Next).await;
    let html = harness.render();
    assert!(html.contains("Lucía"), "missing passenger name in {html}");
    let saved = harness.repo.load_progress().await.unwrap().unwrap();
    assert_eq!(saved.correct.len(), 2);
}
