use favdirs_core::config::{self, Config, SourceKind};
use favdirs_core::contract::{ActivateRequest, CoreRequest, CoreResponse, QueryRequest};
use favdirs_core::presenter::ItemAction;
use favdirs_core::query_service::QueryService;
use favdirs_core::transport::{handle_json, handle_request, serve, ErrorCode, TransportResponse};

fn service_with_seed_catalog(dir: &tempfile::TempDir) -> QueryService {
    let directories_path = dir.path().join("directories.json");
    std::fs::write(
        &directories_path,
        r#"[{"keyword":"photos","path":"/home/u/Photos"},{"keyword":"music","path":"/home/u/Music"}]"#,
    )
    .unwrap();
    QueryService::new(Config {
        directories_path,
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn request_handler_returns_ok_transport_response() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);

    let response = handle_request(
        &service,
        CoreRequest::Query(QueryRequest {
            query: Some("MUS".into()),
            preferences: None,
        }),
    );

    match response {
        TransportResponse::Ok {
            response: CoreResponse::Query(payload),
        } => {
            assert_eq!(payload.items.len(), 1);
            assert_eq!(payload.items[0].title, "music");
        }
        other => panic!("expected query response, got {other:?}"),
    }
}

#[test]
fn json_handler_encodes_ok_status() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);

    let raw = handle_json(&service, r#"{"kind":"query","payload":{"query":""}}"#);

    assert!(raw.contains("\"status\":\"ok\""));
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();
    assert!(matches!(parsed, TransportResponse::Ok { .. }));
}

#[test]
fn json_handler_returns_invalid_json_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);

    let raw = handle_json(&service, "{not-json");
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();

    match parsed {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidJson),
        _ => panic!("expected invalid json error"),
    }
}

#[test]
fn json_handler_returns_invalid_request_for_blank_open_path() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);
    let request = CoreRequest::Activate(ActivateRequest {
        action: ItemAction::OpenPath { path: "  ".into() },
    });

    let raw = handle_json(&service, &serde_json::to_string(&request).unwrap());
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();

    match parsed {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidRequest),
        _ => panic!("expected invalid request error"),
    }
}

#[test]
fn activating_placeholder_reports_nothing_opened() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);

    let response = handle_request(
        &service,
        CoreRequest::Activate(ActivateRequest {
            action: ItemAction::NoOp,
        }),
    );

    assert_eq!(
        response,
        TransportResponse::Ok {
            response: CoreResponse::Activate(favdirs_core::contract::ActivateResponse {
                opened: false
            })
        }
    );
}

#[test]
fn serve_answers_one_line_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_seed_catalog(&dir);
    let input = concat!(
        r#"{"kind":"query","payload":{"query":"pho"}}"#,
        "\n\n",
        "garbage\n",
        r#"{"kind":"query","payload":{"query":"zzz"}}"#,
        "\n"
    );
    let mut output = Vec::new();

    let handled = serve(&service, input.as_bytes(), &mut output).unwrap();

    assert_eq!(handled, 3);
    let lines: Vec<TransportResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(matches!(lines[0], TransportResponse::Ok { .. }));
    assert!(matches!(lines[1], TransportResponse::Err { .. }));
    match &lines[2] {
        TransportResponse::Ok {
            response: CoreResponse::Query(payload),
        } => assert_eq!(payload.items[0].title, "No matching directories found"),
        other => panic!("expected query response, got {other:?}"),
    }
}

fn query_titles(raw: &str) -> Vec<String> {
    match serde_json::from_str::<TransportResponse>(raw).unwrap() {
        TransportResponse::Ok {
            response: CoreResponse::Query(payload),
        } => payload.items.into_iter().map(|item| item.title).collect(),
        other => panic!("expected query response, got {other:?}"),
    }
}

#[test]
fn reloading_service_sees_preference_edits_between_requests() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "source = \"preference_lines\"\n\n[preferences]\nm = \"/home/u/Music\"\n",
    )
    .unwrap();
    let service = QueryService::reloading(config::load(Some(&config_path)).unwrap()).unwrap();
    let request = r#"{"kind":"query","payload":{"query":""}}"#;

    let before = query_titles(&handle_json(&service, request));
    std::fs::write(
        &config_path,
        "source = \"preference_lines\"\n\n[preferences]\nm = \"/home/u/Music\"\nv = \"/home/u/Videos\"\n",
    )
    .unwrap();
    let after = query_titles(&handle_json(&service, request));

    assert_eq!(before, vec!["Music"]);
    assert_eq!(after, vec!["Music", "Videos"]);
}

#[test]
fn reloading_service_keeps_last_config_when_file_turns_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "source = \"preference_lines\"\n\n[preferences]\nm = \"/home/u/Music\"\n",
    )
    .unwrap();
    let service = QueryService::reloading(config::load(Some(&config_path)).unwrap()).unwrap();

    std::fs::write(&config_path, "source = [").unwrap();
    let titles = query_titles(&handle_json(
        &service,
        r#"{"kind":"query","payload":{"query":"mus"}}"#,
    ));

    assert_eq!(titles, vec!["Music"]);
}

#[test]
fn request_preference_snapshot_replaces_configured_mapping() {
    let service = QueryService::new(Config {
        source: SourceKind::FixedSlots,
        preferences: toml::from_str(r#"item1 = "/home/u/Music""#).unwrap(),
        ..Config::default()
    })
    .unwrap();
    let request = r#"{"kind":"query","payload":{"query":"","preferences":{"item1":"/home/u/Music","item2":"/home/u/Videos"}}}"#;

    let with_snapshot = query_titles(&handle_json(&service, request));
    let without_snapshot = query_titles(&handle_json(
        &service,
        r#"{"kind":"query","payload":{"query":""}}"#,
    ));

    assert_eq!(with_snapshot, vec!["Music", "Videos"]);
    assert_eq!(without_snapshot, vec!["Music"]);
    assert_eq!(service.config().source, SourceKind::FixedSlots);
}
