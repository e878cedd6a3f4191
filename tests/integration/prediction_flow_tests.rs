//! StudioService → PredictionPort → events.

use aqistudio::adapters::ConfiguredPredictor;
use aqistudio::adapters::local::HeuristicPredictor;
use aqistudio::adapters::remote::{HttpTransport, NullTransport};
use aqistudio::app::commands::AppCommand;
use aqistudio::app::events::{AppEvent, ReadingSource};
use aqistudio::app::service::{Completion, StudioService};
use aqistudio::aqi::category::{Category, ColourToken, SevereColour};
use aqistudio::aqi::reading::{Field, Preset};
use aqistudio::config::{PredictionMode, StudioConfig};
use aqistudio::Error;
use aqistudio::error::PredictionError;

use super::mock_ports::{RecordingSink, ScriptedPredictor};

fn make_app() -> (StudioService, RecordingSink) {
    (StudioService::new(StudioConfig::default()), RecordingSink::new())
}

#[test]
fn clean_preset_predicts_good_locally() {
    let (mut app, mut sink) = make_app();
    app.load_preset(Preset::Clean, &mut sink);

    let outcome = app.predict(&mut HeuristicPredictor::new(), &mut sink);

    assert_eq!(outcome, Completion::Applied);
    let p = app.prediction().expect("prediction applied");
    assert_eq!(p.aqi, 15);
    assert_eq!(p.band.category, Category::Good);
    assert_eq!(p.band.colour, ColourToken::Green);
    assert!(matches!(
        sink.last(),
        Some(AppEvent::PredictionReady { aqi: 15, category: Category::Good, .. })
    ));
}

#[test]
fn polluted_preset_predicts_moderate_locally() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::LoadPreset(Preset::Polluted), &mut sink);
    app.predict(&mut HeuristicPredictor::new(), &mut sink);
    let p = app.prediction().unwrap();
    assert_eq!(p.aqi, 184);
    assert_eq!(p.band.category, Category::Moderate);
}

#[test]
fn blank_form_is_sent_as_zeros() {
    let (mut app, mut sink) = make_app();
    app.set_field(Field::Pm10, "  ");
    app.set_field(Field::No2, "n/a");
    let mut predictor = ScriptedPredictor::always(3);

    app.predict(&mut predictor, &mut sink);

    let seen = predictor.seen[0];
    for field in Field::ALL {
        assert_eq!(seen.get(field), 0.0, "{} should be coerced to 0", field.key());
    }
}

#[test]
fn typed_fields_reach_predictor() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::SetField(Field::Pm2_5, "42.5".into()), &mut sink);
    app.handle_command(AppCommand::SetField(Field::Humidity, "55".into()), &mut sink);
    let mut predictor = ScriptedPredictor::always(90);

    app.predict(&mut predictor, &mut sink);

    assert_eq!(predictor.seen[0].pm2_5, 42.5);
    assert_eq!(predictor.seen[0].humidity, 55.0);
    assert_eq!(app.prediction().unwrap().band.category, Category::Satisfactory);
}

#[test]
fn failure_is_surfaced_and_keeps_previous_result() {
    let (mut app, mut sink) = make_app();
    let mut predictor = ScriptedPredictor::new([
        Ok(120),
        Err(PredictionError::Transport("timeout".into())),
    ]);

    app.predict(&mut predictor, &mut sink);
    app.predict(&mut predictor, &mut sink);

    assert_eq!(app.prediction().unwrap().aqi, 120);
    assert_eq!(
        app.error(),
        Some(&PredictionError::Transport("timeout".into()))
    );
    assert!(matches!(sink.last(), Some(AppEvent::PredictionFailed { .. })));
    assert_eq!(app.view().error, Some(PredictionError::Transport("timeout".into())));
}

#[test]
fn success_clears_previous_error() {
    let (mut app, mut sink) = make_app();
    let mut predictor =
        ScriptedPredictor::new([Err(PredictionError::InvalidResponse("bad".into())), Ok(10)]);
    app.predict(&mut predictor, &mut sink);
    assert!(app.error().is_some());
    app.predict(&mut predictor, &mut sink);
    assert!(app.error().is_none());
}

#[test]
fn out_of_order_response_is_discarded() {
    let (mut app, mut sink) = make_app();
    let first = app.begin_prediction(&mut sink);
    let second = app.begin_prediction(&mut sink);

    // Second answers first, then the slow first request lands.
    assert_eq!(
        app.complete_prediction(second.token, Ok(350), &mut sink),
        Completion::Applied
    );
    assert_eq!(
        app.complete_prediction(first.token, Ok(20), &mut sink),
        Completion::Stale
    );

    assert_eq!(app.prediction().unwrap().aqi, 350);
    assert_eq!(
        sink.last(),
        Some(&AppEvent::StaleResponseDiscarded {
            token: first.token,
            latest: second.token,
        })
    );
}

#[test]
fn duplicate_completion_is_stale() {
    let (mut app, mut sink) = make_app();
    let req = app.begin_prediction(&mut sink);
    assert_eq!(app.complete_prediction(req.token, Ok(60), &mut sink), Completion::Applied);
    assert_eq!(app.complete_prediction(req.token, Ok(500), &mut sink), Completion::Stale);
    assert_eq!(app.prediction().unwrap().aqi, 60);
}

#[test]
fn response_after_preset_load_is_discarded() {
    let (mut app, mut sink) = make_app();
    let req = app.begin_prediction(&mut sink);
    app.load_preset(Preset::Moderate, &mut sink);

    assert_eq!(app.complete_prediction(req.token, Ok(450), &mut sink), Completion::Stale);
    assert!(app.prediction().is_none());
    assert!(!app.view().pending);
}

#[test]
fn response_after_reset_is_discarded() {
    let (mut app, mut sink) = make_app();
    app.load_preset(Preset::Polluted, &mut sink);
    let req = app.begin_prediction(&mut sink);
    app.handle_command(AppCommand::Reset, &mut sink);

    assert_eq!(app.complete_prediction(req.token, Ok(184), &mut sink), Completion::Stale);
    assert!(app.form().is_blank());
    assert_eq!(sink.count(|e| *e == AppEvent::Reset), 1);
}

#[test]
fn count_up_restarts_on_new_prediction_and_resets_on_preset() {
    let (mut app, mut sink) = make_app();
    let mut predictor = ScriptedPredictor::new([Ok(300), Ok(90)]);

    app.predict(&mut predictor, &mut sink);
    assert_eq!(app.tick(450), 150);
    app.predict(&mut predictor, &mut sink);
    assert_eq!(app.view().display_value, 0);
    assert_eq!(app.tick(900), 90);

    app.load_preset(Preset::Clean, &mut sink);
    assert_eq!(app.view().display_value, 0);
    assert!(app.prediction().is_none());
    assert_eq!(
        sink.last(),
        Some(&AppEvent::ReadingLoaded(ReadingSource::Preset(Preset::Clean)))
    );
}

#[test]
fn legend_highlights_current_category() {
    let (mut app, mut sink) = make_app();
    app.predict(&mut ScriptedPredictor::always(420), &mut sink);
    let view = app.view();
    let active: Vec<_> = view.legend.iter().filter(|e| e.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].category, Category::Severe);
    assert_eq!(active[0].colour, ColourToken::Gray);
}

#[test]
fn purple_severe_from_config() {
    let config = StudioConfig {
        severe_colour: SevereColour::Purple,
        adaptive_background: true,
        ..StudioConfig::default()
    };
    let mut app = StudioService::new(config);
    let mut sink = RecordingSink::new();
    app.predict(&mut ScriptedPredictor::always(401), &mut sink);
    assert_eq!(app.prediction().unwrap().band.colour, ColourToken::Purple);
    assert_eq!(app.view().background, Some(ColourToken::Purple));
}

#[test]
fn remote_mode_without_transport_fails_visibly() {
    let config = StudioConfig {
        prediction: PredictionMode::Remote,
        ..StudioConfig::default()
    };
    let mut app = StudioService::new(config);
    let mut sink = RecordingSink::new();
    let mut predictor = ConfiguredPredictor::<NullTransport>::from_config(app.config(), None);

    app.predict(&mut predictor, &mut sink);

    assert_eq!(app.error(), Some(&PredictionError::Disabled));
    assert!(app.prediction().is_none());
}

/// Echoes a fixed AQI as the service would, checking the request path.
struct FakeService;

impl HttpTransport for FakeService {
    type Error = String;

    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<Vec<u8>, String> {
        assert!(url.ends_with("/api/predict"));
        let reading: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        let pm = reading["PM2_5"].as_f64().unwrap_or(0.0);
        Ok(format!(r#"{{"predictedAQI": {}}}"#, pm * 2.0).into_bytes())
    }

    fn get(&mut self, _url: &str) -> Result<Vec<u8>, String> {
        Err("not found".into())
    }
}

#[test]
fn remote_mode_round_trips_through_transport() {
    let config = StudioConfig {
        prediction: PredictionMode::Remote,
        api_base_url: "http://aqi.test".into(),
        ..StudioConfig::default()
    };
    let mut app = StudioService::new(config);
    let mut sink = RecordingSink::new();
    let mut predictor = ConfiguredPredictor::from_config(app.config(), Some(FakeService));

    app.set_field(Field::Pm2_5, "101");
    app.predict(&mut predictor, &mut sink);

    let p = app.prediction().unwrap();
    assert_eq!(p.aqi, 202);
    assert_eq!(p.band.category, Category::Poor);
}

#[test]
fn remote_fraction_is_classified_past_the_bound() {
    let config = StudioConfig {
        prediction: PredictionMode::Remote,
        api_base_url: "http://aqi.test".into(),
        ..StudioConfig::default()
    };
    let mut app = StudioService::new(config);
    let mut sink = RecordingSink::new();
    let mut predictor = ConfiguredPredictor::from_config(app.config(), Some(FakeService));

    // FakeService answers 50.3.
    app.set_field(Field::Pm2_5, "25.15");
    app.predict(&mut predictor, &mut sink);

    let p = app.prediction().unwrap();
    assert_eq!(p.aqi, 51);
    assert_eq!(p.band.category, Category::Satisfactory);
}

#[test]
fn outcome_reports_error_over_previous_result() {
    let (mut app, mut sink) = make_app();
    assert_eq!(app.outcome(), Ok(None));

    let mut predictor = ScriptedPredictor::new([Ok(42), Err(PredictionError::Disabled)]);
    app.predict(&mut predictor, &mut sink);
    assert_eq!(app.outcome().unwrap().map(|p| p.aqi), Some(42));

    app.predict(&mut predictor, &mut sink);
    assert_eq!(app.outcome(), Err(Error::Prediction(PredictionError::Disabled)));
}
