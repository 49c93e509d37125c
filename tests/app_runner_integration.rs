use std::{sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tokio::sync::Mutex;

use formfields::{
    core::state::{form::FieldId, ui::Page},
    domain::{
        contact::Contact,
        preferences::{Layout, SharedLayout},
    },
    infrastructure::{
        config::Config,
        preferences::{JsonPreferences, PreferencesPersistence},
        tui::{test::TestTui, Event},
    },
    integration::app_runner::AppRunner,
};

fn config() -> Config {
    let mut config = Config::embedded().unwrap();
    config.catalog.latency_ms = 0;
    config.contacts = vec![
        Contact::new("jdoe", "John Doe"),
        Contact::new("jsmith", "Jane Smith"),
    ];
    config
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn runner(layout: SharedLayout) -> (AppRunner, Arc<Mutex<TestTui>>) {
    let tui = Arc::new(Mutex::new(TestTui::new(60, 20).unwrap()));
    let runner = AppRunner::new_with_config(config(), layout, tui.clone());
    (runner, tui)
}

#[tokio::test]
async fn test_dark_theme_is_written_through_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let preferences = Arc::new(JsonPreferences::in_dir(dir.path()));
    let layout = SharedLayout::default();
    let (runner, tui) = runner(layout.clone());
    let mut runner = runner.with_persistence(preferences.clone());

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::F(2))])
        .await
        .unwrap();
    assert_eq!(runner.runtime().state().ui.page, Page::Settings);
    assert!(runner.runtime().state().ui.is_focused(FieldId::DarkTheme));

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Char(' '))])
        .await
        .unwrap();
    assert!(layout.dark_theme());
    assert_eq!(
        preferences.load().unwrap(),
        Some(Layout { dark_theme: true })
    );
    assert!(tui.lock().await.screen_text().contains("[ ON  ]"));

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Enter)])
        .await
        .unwrap();
    assert!(!layout.dark_theme());
    assert_eq!(
        preferences.load().unwrap(),
        Some(Layout { dark_theme: false })
    );
}

#[tokio::test]
async fn test_settings_page_reads_store_value() {
    let layout = SharedLayout::new(Layout { dark_theme: true });
    let (mut runner, _tui) = runner(layout);
    assert!(runner.runtime().state().dark_theme());

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::F(2)), Event::Render])
        .await
        .unwrap();
    assert!(runner.runtime().state().settings.dark_theme);
}

#[tokio::test]
async fn test_outside_store_write_is_reflected_on_settings_page() {
    let layout = SharedLayout::default();
    let (mut runner, tui) = runner(layout.clone());
    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::F(2)), Event::Render])
        .await
        .unwrap();
    assert!(tui.lock().await.screen_text().contains("[ OFF ]"));

    layout.set_dark_theme(true);
    runner
        .run_one_cycle_for_tests(vec![Event::Render])
        .await
        .unwrap();
    assert!(runner.runtime().state().settings.dark_theme);
    assert!(tui.lock().await.screen_text().contains("[ ON  ]"));

    // toggling starts from the store's value
    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Char(' '))])
        .await
        .unwrap();
    assert!(!layout.dark_theme());
    assert!(tui.lock().await.screen_text().contains("[ OFF ]"));
}

struct FailingPersistence;

impl PreferencesPersistence for FailingPersistence {
    fn save(&self, _layout: &Layout) -> color_eyre::Result<()> {
        Err(color_eyre::eyre::eyre!("disk full"))
    }
}

#[tokio::test]
async fn test_persistence_failure_is_reported() {
    let layout = SharedLayout::default();
    let (runner, _tui) = runner(layout.clone());
    let mut runner = runner.with_persistence(Arc::new(FailingPersistence));

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::F(2))])
        .await
        .unwrap();
    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Char(' '))])
        .await
        .unwrap();
    // the error comes back as a raw message on the next cycle
    runner.run_one_cycle_for_tests(vec![]).await.unwrap();

    assert!(layout.dark_theme());
    let status = runner.runtime().state().system.status_message.clone();
    assert!(status.is_some_and(|s| s.contains("disk full")));
}

#[tokio::test(start_paused = true)]
async fn test_contact_dropdown_is_rendered_and_selectable() {
    let (mut runner, tui) = runner(SharedLayout::default());

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Tab)])
        .await
        .unwrap();
    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Char('j'))])
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    runner.run_one_cycle_for_tests(vec![]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    runner
        .run_one_cycle_for_tests(vec![Event::Render])
        .await
        .unwrap();

    let screen = tui.lock().await.screen_text();
    assert!(screen.contains("John Doe (jdoe)"));
    assert!(screen.contains("Jane Smith (jsmith)"));
    assert_eq!(runner.components().areas().get(FieldId::Contact).len(), 2);

    runner
        .run_one_cycle_for_tests(vec![key(KeyCode::Down), key(KeyCode::Enter), Event::Render])
        .await
        .unwrap();
    let state = runner.runtime().state();
    assert_eq!(state.form.contact.value(), Some(&"jdoe".to_string()));
    assert!(!tui.lock().await.screen_text().contains("Jane Smith (jsmith)"));
}

#[tokio::test]
async fn test_event_source_exhaustion_stops_runner() {
    let events = [key(KeyCode::Char('7')), Event::Render];
    let tui = Arc::new(Mutex::new(TestTui::with_events(60, 20, events).unwrap()));
    let mut runner = AppRunner::new_with_config(config(), SharedLayout::default(), tui.clone());

    runner.run().await.unwrap();

    assert_eq!(runner.runtime().state().form.amount.value(), Some("7.00"));
    assert!(!tui.lock().await.is_entered());
}
