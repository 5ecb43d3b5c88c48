//! Session workflow against an in-memory solver backend.

use hen_app::{
    AppError, AppResult, BuildResponse, DetailMatrix, Lookup, ResultEdge, Session, SolveResponse,
    SolverBackend, StreamDetail, StreamUnit,
};
use hen_core::SiValue;
use hen_payload::PayloadSi;
use hen_project::schema::*;
use hen_project::{SCHEMA_VERSION, new_stream};

#[derive(Default)]
struct MockBackend {
    builds: usize,
    solves: usize,
    match_calls: usize,
    stream_calls: usize,
    last_payload: Option<PayloadSi>,
}

impl SolverBackend for MockBackend {
    fn build(&mut self, payload: &PayloadSi) -> AppResult<BuildResponse> {
        self.builds += 1;
        self.last_payload = Some(payload.clone());
        Ok(BuildResponse {
            ok: true,
            plot: None,
        })
    }

    fn solve(&mut self) -> AppResult<SolveResponse> {
        self.solves += 1;
        Ok(SolveResponse {
            ok: true,
            hot_names: vec!["h1".to_string()],
            cold_names: vec!["c1".to_string()],
            edges: vec![
                ResultEdge {
                    hot: "h1".to_string(),
                    cold: "c1".to_string(),
                    q_total: 1600.0,
                },
                ResultEdge {
                    hot: String::new(),
                    cold: "c1".to_string(),
                    q_total: 1.0,
                },
            ],
            obj_value: Some(42.0),
            ..Default::default()
        })
    }

    fn match_detail(&mut self, hot: &str, cold: &str) -> AppResult<DetailMatrix> {
        self.match_calls += 1;
        Ok(DetailMatrix {
            hot: hot.to_string(),
            cold: cold.to_string(),
            rows: vec!["T1".to_string()],
            cols: vec!["T1".to_string()],
            q: vec![vec![1600.0]],
        })
    }

    fn stream_detail(&mut self, name: &str, unit: StreamUnit) -> AppResult<StreamDetail> {
        self.stream_calls += 1;
        Ok(StreamDetail {
            name: name.to_string(),
            unit: unit.to_string(),
            ..Default::default()
        })
    }
}

fn stream(thermal: ThermalKind, f: &str, tin: &str, tout: &str) -> Stream {
    let mut s = new_stream(1, thermal);
    s.f = ScalarSpec::fixed(f, "mol/s");
    s.t_in = ScalarSpec::fixed(tin, "°C");
    s.t_out = ScalarSpec::fixed(tout, "°C");
    s.cp.value = "2".to_string();
    s
}

fn ready_session() -> Session<MockBackend> {
    let streams = vec![
        stream(ThermalKind::Hot, "10", "150", "50"),
        stream(ThermalKind::Cold, "8", "30", "120"),
    ];
    Session::with_streams(MockBackend::default(), streams, IntervalsConfig::default())
}

fn solved_session() -> Session<MockBackend> {
    let mut session = ready_session();
    session.build().expect("build");
    session.solve().expect("solve");
    session
}

#[test]
fn default_session_is_blocked_by_validation() {
    let mut session = Session::new(MockBackend::default());
    assert_eq!(session.streams().len(), 2);

    let err = session.build().unwrap_err();
    assert!(matches!(err, AppError::Blocked { errors } if errors > 0));
    assert_eq!(session.backend().builds, 0);
    assert!(!session.is_built());
}

#[test]
fn solve_requires_a_build() {
    let mut session = ready_session();
    assert!(matches!(session.solve(), Err(AppError::NotBuilt)));
    assert_eq!(session.backend().solves, 0);
}

#[test]
fn build_sends_si_payload() {
    let mut session = ready_session();
    session.build().expect("build");

    let payload = session.backend().last_payload.as_ref().expect("payload sent");
    assert_eq!(payload.streams.len(), 2);
    match payload.streams[0].t_in {
        SiValue::Fixed(t) => assert!((t - 423.15).abs() < 1e-9),
        other => panic!("unexpected {other:?}"),
    }
    assert!(payload.intervals_config.is_some());
}

#[test]
fn solve_keeps_only_complete_edges() {
    let session = solved_session();
    let results = session.results().expect("results");
    assert_eq!(results.edges.len(), 1);
    assert_eq!(results.obj_value, Some(42.0));
    assert_eq!(session.hot_order(), ["h1"]);
    assert_eq!(session.cold_order(), ["c1"]);
}

#[test]
fn editing_invalidates_build_and_results() {
    let mut session = solved_session();
    session.add_stream(ThermalKind::Cold);

    assert!(session.results().is_none());
    assert!(!session.is_built());
    assert!(session.hot_order().is_empty());
    assert!(matches!(session.solve(), Err(AppError::NotBuilt)));
}

#[test]
fn match_detail_is_fetched_once_until_next_solve() {
    let mut session = solved_session();
    session.match_detail("h1", "c1").expect("detail");
    session.match_detail("h1", "c1").expect("detail");
    assert_eq!(session.backend().match_calls, 1);

    session.solve().expect("solve");
    session.match_detail("h1", "c1").expect("detail");
    assert_eq!(session.backend().match_calls, 2);
}

#[test]
fn stream_detail_is_keyed_by_unit() {
    let mut session = solved_session();
    let k = session.stream_detail("h1", StreamUnit::Kelvin).expect("detail");
    assert_eq!(k.unit, "K");
    session.stream_detail("h1", StreamUnit::Kelvin).expect("detail");
    session.stream_detail("h1", StreamUnit::Celsius).expect("detail");
    assert_eq!(session.backend().stream_calls, 2);
}

#[test]
fn superseded_detail_is_cached_but_not_returned() {
    let mut session = solved_session();
    let Lookup::Pending(first) = session.begin_match_detail("h1", "c1") else {
        panic!("expected miss");
    };
    let Lookup::Pending(_second) = session.begin_match_detail("h1", "c2") else {
        panic!("expected miss");
    };

    let matrix = session.fetch_match_detail("h1", "c1").expect("fetch");
    assert_eq!(session.finish_match_detail(first, "h1", "c1", matrix), None);
    assert!(matches!(
        session.begin_match_detail("h1", "c1"),
        Lookup::Cached(_)
    ));
}

#[test]
fn stream_list_editing() {
    let mut session = ready_session();

    let id = session.add_stream(ThermalKind::Hot);
    assert_eq!(session.stream(&id).map(|s| s.name.as_str()), Some("h2"));

    let copy = session.duplicate_stream(&id).expect("duplicate");
    assert_ne!(copy, id);
    assert_eq!(session.stream(&copy).map(|s| s.name.as_str()), Some("h2_copy"));

    let removed = session.delete_stream(&copy).expect("delete");
    assert_eq!(removed.name, "h2_copy");
    assert_eq!(session.streams().len(), 3);

    assert!(matches!(
        session.delete_stream("missing"),
        Err(AppError::StreamNotFound(_))
    ));
}

#[test]
fn update_keeps_identity() {
    let mut session = ready_session();
    let id = session.streams()[0].id.clone();
    let mut edited = session.streams()[0].clone();
    edited.id = "something-else".to_string();
    edited.name = "feed".to_string();

    session.update_stream(&id, edited).expect("update");
    assert_eq!(session.stream(&id).map(|s| s.name.as_str()), Some("feed"));
}

#[test]
fn set_kind_canonicalizes() {
    let mut session = ready_session();
    let id = session.streams()[0].id.clone();
    session
        .set_kind(&id, StreamKind::IsothermalFixed)
        .expect("set kind");

    let s = session.stream(&id).expect("stream");
    assert_eq!(s.kind, StreamKind::IsothermalFixed);
    assert_eq!(s.t_out, s.t_in);
}

#[test]
fn reorder_result_axes() {
    let mut session = solved_session();
    session.move_hot(0, 0);
    assert_eq!(session.hot_order(), ["h1"]);
}

#[test]
fn streamset_round_trip() {
    let session = ready_session();
    let set = session.to_streamset("plant-a");
    assert_eq!(set.schema_version, SCHEMA_VERSION);
    assert_eq!(set.name, "plant-a");

    let restored = Session::from_streamset(MockBackend::default(), set).expect("restore");
    assert_eq!(restored.streams(), session.streams());

    let mut newer = session.to_streamset("plant-b");
    newer.schema_version = "ei-stream-ui-v9".to_string();
    assert!(matches!(
        Session::from_streamset(MockBackend::default(), newer),
        Err(AppError::Project(_))
    ));
}
