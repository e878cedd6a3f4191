//! StudioService → DatasetPort → row selection.

use aqistudio::adapters::dataset::StaticDataset;
use aqistudio::app::commands::AppCommand;
use aqistudio::app::events::{AppEvent, ReadingSource};
use aqistudio::app::service::StudioService;
use aqistudio::aqi::reading::{Field, Preset, Reading};
use aqistudio::config::StudioConfig;
use aqistudio::error::DatasetError;

use super::mock_ports::{MockDataset, RecordingSink, ScriptedPredictor};

fn rows() -> Vec<Reading> {
    vec![
        Preset::Clean.reading(),
        Preset::Moderate.reading(),
        Reading::default().with(Field::Pm2_5, 250.0),
    ]
}

fn loaded_app() -> (StudioService, RecordingSink) {
    let mut app = StudioService::new(StudioConfig::default());
    let mut sink = RecordingSink::new();
    assert!(app.load_dataset(&mut MockDataset::rows(rows()), &mut sink));
    (app, sink)
}

#[test]
fn rows_load_and_select() {
    let (mut app, mut sink) = loaded_app();
    assert_eq!(app.rows().len(), 3);
    assert_eq!(sink.last(), Some(&AppEvent::DatasetLoaded { rows: 3 }));

    assert!(app.select_row(1, &mut sink));
    assert_eq!(app.selected_row(), Some(1));
    assert_eq!(app.reading(), Preset::Moderate.reading());
    assert_eq!(app.form().get(Field::Co), "1.2");
    assert_eq!(
        sink.last(),
        Some(&AppEvent::ReadingLoaded(ReadingSource::DatasetRow(1)))
    );
}

#[test]
fn out_of_range_row_is_a_no_op() {
    let (mut app, mut sink) = loaded_app();
    app.load_preset(Preset::Polluted, &mut sink);
    let before = sink.events.len();

    assert!(!app.select_row(3, &mut sink));
    assert!(!app.select_row(usize::MAX, &mut sink));

    assert_eq!(app.reading(), Preset::Polluted.reading());
    assert_eq!(app.selected_row(), None);
    assert_eq!(sink.events.len(), before);
}

#[test]
fn string_selector_ignores_garbage() {
    let (mut app, mut sink) = loaded_app();
    for text in ["", "  ", "-1", "1.5", "two", "3"] {
        app.handle_command(AppCommand::SelectRow(text.into()), &mut sink);
    }
    assert_eq!(app.selected_row(), None);
    assert!(app.form().is_blank());

    app.handle_command(AppCommand::SelectRow(" 2 ".into()), &mut sink);
    assert_eq!(app.selected_row(), Some(2));
    assert_eq!(app.reading().pm2_5, 250.0);
}

#[test]
fn selecting_row_clears_previous_result() {
    let (mut app, mut sink) = loaded_app();
    app.predict(&mut ScriptedPredictor::always(77), &mut sink);
    app.tick(900);
    assert!(app.prediction().is_some());

    app.select_row(0, &mut sink);

    assert!(app.prediction().is_none());
    assert_eq!(app.view().display_value, 0);
}

#[test]
fn preset_deselects_row() {
    let (mut app, mut sink) = loaded_app();
    app.select_row(2, &mut sink);
    app.load_preset(Preset::Clean, &mut sink);
    assert_eq!(app.selected_row(), None);
}

#[test]
fn failed_fetch_keeps_last_known_rows() {
    let mut app = StudioService::new(StudioConfig::default());
    let mut sink = RecordingSink::new();
    let mut source = MockDataset::new([
        Ok(rows()),
        Err(DatasetError::Transport("connection reset".into())),
    ]);

    assert!(app.load_dataset(&mut source, &mut sink));
    assert!(!app.load_dataset(&mut source, &mut sink));

    assert_eq!(app.rows().len(), 3);
    assert_eq!(source.fetches, 2);
    assert!(matches!(sink.last(), Some(AppEvent::DatasetUnavailable(_))));
}

#[test]
fn shrinking_dataset_drops_stale_selection() {
    let (mut app, mut sink) = loaded_app();
    app.select_row(2, &mut sink);
    app.load_dataset(&mut StaticDataset::new(vec![Reading::default()]), &mut sink);
    assert_eq!(app.selected_row(), None);
    assert_eq!(app.view().row_count, 1);
}

#[test]
fn disabled_dataset_never_fetches() {
    let config = StudioConfig {
        dataset_loading: false,
        ..StudioConfig::default()
    };
    let mut app = StudioService::new(config);
    let mut sink = RecordingSink::new();
    let mut source = MockDataset::rows(rows());

    assert!(!app.load_dataset(&mut source, &mut sink));
    assert_eq!(source.fetches, 0);
    assert!(app.rows().is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn reload_deselects_row_but_keeps_form() {
    let (mut app, mut sink) = loaded_app();
    app.select_row(0, &mut sink);
    let fresh = vec![Preset::Polluted.reading(), Preset::Moderate.reading()];

    assert!(app.load_dataset(&mut MockDataset::rows(fresh), &mut sink));

    assert_eq!(app.selected_row(), None);
    assert_eq!(app.view().selected_row, None);
    assert_eq!(app.reading(), Preset::Clean.reading());
    assert_ne!(app.reading(), app.rows()[0]);
}
