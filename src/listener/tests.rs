use super::form::{encode_component, form_value, parse_form};
use super::*;
use std::net::TcpListener;

#[test]
fn test_parse_form_decodes_pairs() {
    let pairs = parse_form("workspace=%2Fhome%2Fdev%2Fmy+proj&flag&x=1");
    assert_eq!(
        pairs,
        vec![
            ("workspace".to_string(), "/home/dev/my proj".to_string()),
            ("flag".to_string(), String::new()),
            ("x".to_string(), "1".to_string()),
        ]
    );
}

#[test]
fn test_form_value_takes_first_occurrence() {
    assert_eq!(
        form_value("workspace=/a&workspace=/b", "workspace").as_deref(),
        Some("/a")
    );
    assert_eq!(form_value("other=1", "workspace"), None);
    assert_eq!(form_value("", "workspace"), None);
}

#[test]
fn test_malformed_percent_sequences_are_kept_literally() {
    assert_eq!(form_value("workspace=100%25", "workspace").as_deref(), Some("100%"));
    assert_eq!(form_value("workspace=%zz%", "workspace").as_deref(), Some("%zz%"));
}

#[test]
fn test_encode_component_round_trips_through_form_value() {
    let path = r"C:\Users\Dev\My Project";
    let body = format!("workspace={}", encode_component(path));
    assert!(!body.contains(' '));
    assert_eq!(form_value(&body, "workspace").as_deref(), Some(path));
}

#[test]
fn test_decide_follows_workspace_rule() {
    let current = Some("/Proj");
    assert_eq!(decide("", current), HookDecision::Accepted);
    assert_eq!(decide("workspace=", current), HookDecision::Accepted);
    assert_eq!(decide("workspace=%2FProj%2F", current), HookDecision::Accepted);
    assert_eq!(decide("workspace=/PROJ", current), HookDecision::Accepted);
    assert_eq!(decide("workspace=/Other", current), HookDecision::Skipped);
    assert_eq!(decide("workspace=/Proj", None), HookDecision::Skipped);
}

#[test]
fn test_decision_bodies() {
    assert_eq!(HookDecision::Accepted.body(), "OK");
    assert_eq!(HookDecision::Skipped.body(), "SKIP");
}

#[test]
fn test_port_range_bounds() {
    let range = PortRange::default();
    assert_eq!(range.start(), 57843);
    assert_eq!(range.end(), 57852);
    assert_eq!(range.ports().count(), 10);
    assert!(range.contains(57850));
    assert!(!range.contains(57853));
    assert_eq!(range.to_string(), "57843-57852");
}

#[test]
fn test_port_range_rejects_invalid_input() {
    assert!(matches!(
        PortRange::new(65530, 10),
        Err(ListenerError::InvalidRange { .. })
    ));
    assert!(PortRange::new(57843, 0).is_err());
    assert!(PortRange::new(0, 5).is_err());
    assert!(PortRange::new(65535, 1).is_ok());
}

#[test]
fn test_bind_skips_occupied_ports() {
    let range = PortRange::new(57843, 10).unwrap();
    let _occupied: Vec<TcpListener> = (57843..=57845)
        .map(|port| TcpListener::bind(("127.0.0.1", port)).unwrap())
        .collect();

    let (_server, port) = bind_first_available("127.0.0.1", range).unwrap();
    assert_eq!(port, 57846);
}

#[test]
fn test_bind_reports_exhausted_range() {
    let range = PortRange::new(57943, 2).unwrap();
    let _occupied: Vec<TcpListener> = range
        .ports()
        .map(|port| TcpListener::bind(("127.0.0.1", port)).unwrap())
        .collect();

    let err = bind_first_available("127.0.0.1", range).err().expect("expected bind to fail");
    assert!(matches!(
        err,
        ListenerError::PortsExhausted {
            start: 57943,
            end: 57944
        }
    ));
    assert_eq!(err.to_string(), "All ports (57943-57944) are in use");
}

#[test]
fn test_free_ports_excludes_bound_ports() {
    let range = PortRange::new(57953, 3).unwrap();
    let _occupied = TcpListener::bind(("127.0.0.1", 57954)).unwrap();

    let free = free_ports("127.0.0.1", range);
    assert!(!free.contains(&57954));
}

#[test]
fn test_serve_reports_unrequested_stop() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    let ctx = HandlerContext {
        workspace: None,
        events: tx,
    };
    let stopping = AtomicBool::new(false);

    server.unblock();
    serve(&server, &ctx, &stopping);

    assert!(matches!(rx.try_recv(), Ok(ListenerEvent::Failed(_))));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_serve_is_quiet_on_requested_stop() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    let ctx = HandlerContext {
        workspace: None,
        events: tx,
    };
    let stopping = AtomicBool::new(true);

    server.unblock();
    serve(&server, &ctx, &stopping);

    assert!(rx.try_recv().is_err());
}
