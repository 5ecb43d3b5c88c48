use hen_project::schema::*;
use hen_project::{
    INTERVALS_OWNER, IssueLevel, canonicalize, has_blocking_error, new_stream, validate_all,
};

fn common(n: usize, thermal: ThermalKind, f: &str, tin: &str, tout: &str) -> Stream {
    let mut s = new_stream(n, thermal);
    s.f = ScalarSpec::fixed(f, "mol/s");
    s.t_in = ScalarSpec::fixed(tin, "°C");
    s.t_out = ScalarSpec::fixed(tout, "°C");
    s.cp.value = "2".to_string();
    s
}

fn two_streams() -> Vec<Stream> {
    vec![
        common(1, ThermalKind::Hot, "10", "150", "50"),
        common(1, ThermalKind::Cold, "8", "30", "120"),
    ]
}

#[test]
fn two_stream_problem_has_no_errors() {
    let issues = validate_all(&two_streams(), Some(&IntervalsConfig::default()));
    assert!(!has_blocking_error(&issues), "{issues:?}");
}

#[test]
fn unknown_hot_name_in_match_row_adds_a_warning() {
    let streams = two_streams();
    let mut cfg = IntervalsConfig::default();
    let before = validate_all(&streams, Some(&cfg));

    cfg.forbidden_match.push(ForbiddenMatch {
        id: "r1".to_string(),
        hot: "ghost".to_string(),
        cold: "c1".to_string(),
        q_lb: "0".to_string(),
        q_ub: "100".to_string(),
    });
    let after = validate_all(&streams, Some(&cfg));

    let warns = |xs: &[hen_project::Issue]| xs.iter().filter(|i| i.level == IssueLevel::Warn).count();
    assert!(warns(&after) > warns(&before));
    assert!(after.iter().any(|i| i.stream_id == INTERVALS_OWNER));
}

#[test]
fn mvr_pin_gate_clears_when_ranged() {
    let mut s = common(1, ThermalKind::Hot, "10", "150", "50");
    s.kind = StreamKind::Mvr;
    s.p_in = ScalarSpec::fixed("1", "bar");
    s.p_out = ScalarSpec::fixed("3", "bar");

    let pin_errors = |s: &Stream| {
        validate_all(std::slice::from_ref(s), None)
            .into_iter()
            .filter(|i| i.is_error() && i.field.as_deref() == Some("Pin"))
            .count()
    };
    assert!(pin_errors(&s) >= 1);

    s.p_in = ScalarSpec::range("1", "5", "bar");
    assert_eq!(pin_errors(&s), 0);
}

#[test]
fn canonicalized_isothermal_stream_validates() {
    let mut s = common(1, ThermalKind::Hot, "10", "100", "60");
    s.hvap.value = "40".to_string();

    let s = canonicalize(s, StreamKind::IsothermalFixed);
    assert_eq!(s.t_out.value, s.t_in.value);
    assert_eq!(s.t_out.unit, s.t_in.unit);
    assert!(!has_blocking_error(&validate_all(&[s.clone()], None)));

    // editing Tout afterwards breaks the invariant again and validation sees it
    let mut edited = s;
    edited.t_out.value = "80".to_string();
    assert!(has_blocking_error(&validate_all(&[edited], None)));
}

#[test]
fn canonicalized_mvr_stream_validates() {
    let mut s = common(1, ThermalKind::Hot, "10", "150", "50");
    s.f = ScalarSpec::range("10", "12", "mol/s");
    s.p_in = ScalarSpec::range("1", "5", "bar");
    s.p_out = ScalarSpec::fixed("6", "bar");

    let s = canonicalize(s, StreamKind::Mvr);
    let issues = validate_all(&[s], None);
    assert!(!has_blocking_error(&issues), "{issues:?}");
}

#[test]
fn duplicate_names_flag_the_later_stream() {
    let first = common(1, ThermalKind::Hot, "10", "150", "50");
    let second = common(1, ThermalKind::Hot, "5", "140", "40");
    let issues = validate_all(&[first, second.clone()], Some(&IntervalsConfig::default()));

    let name_errors: Vec<_> = issues
        .iter()
        .filter(|i| i.is_error() && i.field.as_deref() == Some("name"))
        .collect();
    assert_eq!(name_errors.len(), 1);
    assert_eq!(name_errors[0].stream_id, second.id);
}
