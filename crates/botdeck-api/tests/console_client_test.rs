// Integration tests for `ConsoleClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use botdeck_api::console::{
    CommandHistoryQuery, GroupListQuery, GroupUpdate, HistoryQuery, PrivateUserListQuery,
    PrivateUserUpdate,
};
use botdeck_api::{ConsoleClient, Error, FailureKind, HttpClient, Patch, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ConsoleClient) {
    let server = MockServer::start().await;
    let http = HttpClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new())
        .unwrap();
    (server, ConsoleClient::from_http(http))
}

fn group_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "status": "Normal",
        "enable": true,
        "enable_chat": true,
        "chat_mode": "Separated",
        "sanity_limit": 5,
        "allow_r18g": false,
        "allow_setu": false,
        "admin_ids": [],
        "message_count": 12,
        "last_activity": "2024-06-15T10:30:00"
    })
}

fn user_json(id: i64, nick: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nick_name": nick,
        "status": "Normal",
        "enable_chat": true,
        "sanity_limit": 3,
        "allow_r18g": false,
        "message_count": 4,
        "last_activity": null
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_groups_with_search() {
    let (server, client) = setup().await;

    let body = json!({
        "total": 3,
        "items": [group_json(1, "foo one"), group_json(2, "foo two"), group_json(3, "foo three")]
    });

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(query_param("q", "foo"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .list_groups(&GroupListQuery {
            q: Some("foo".into()),
            limit: Some(10),
            offset: Some(0),
            ..GroupListQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
    assert!(page.items.len() <= 10);
    assert_eq!(page.items[1].name.as_deref(), Some("foo two"));
    assert_eq!(page.items[0].message_count, 12);
}

#[tokio::test]
async fn test_get_group_detail_passes_recent_limit() {
    let (server, client) = setup().await;

    let mut body = group_json(42, "Night owls");
    body["recent_messages"] = json!([{
        "message_id": 900,
        "user_id": 7,
        "type": "text",
        "bot_send": true,
        "text": "hello",
        "sent_at": "2024-06-15T10:31:00Z"
    }]);

    Mock::given(method("GET"))
        .and(path("/api/groups/42"))
        .and(query_param("recent_limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = client.get_group_detail(42, Some(5)).await.unwrap();

    assert_eq!(detail.group.id, 42);
    assert_eq!(detail.recent_messages.len(), 1);
    assert!(detail.recent_messages[0].bot_send);
}

#[tokio::test]
async fn test_update_group_sends_partial_body() {
    let (server, client) = setup().await;

    let mut updated = group_json(42, "X");
    updated["chat_mode"] = json!(null);
    updated["recent_messages"] = json!([]);

    Mock::given(method("PUT"))
        .and(path("/api/groups/42"))
        .and(body_json(json!({ "name": "X", "chat_mode": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&server)
        .await;

    let update = GroupUpdate {
        name: Patch::Set("X".into()),
        chat_mode: Patch::Clear,
        ..GroupUpdate::default()
    };
    let detail = client.update_group(42, &update).await.unwrap();

    assert_eq!(detail.group.name.as_deref(), Some("X"));
    assert_eq!(detail.group.chat_mode, None);
    // untouched fields come back unchanged
    assert_eq!(detail.group.sanity_limit, 5);
}

#[tokio::test]
async fn test_list_private_users_with_status_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/private/users"))
        .and(query_param("status", "Blocked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [user_json(10, "bob")]
        })))
        .mount(&server)
        .await;

    let page = client
        .list_private_users(&PrivateUserListQuery {
            status: Some("Blocked".into()),
            ..PrivateUserListQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].nick_name.as_deref(), Some("bob"));
    assert_eq!(page.items[0].last_activity, None);
}

#[tokio::test]
async fn test_private_user_detail_and_meta() {
    let (server, client) = setup().await;

    let mut body = user_json(10, "bob");
    body["recent_messages"] = json!([
        { "message_id": 1, "user_id": 10, "type": "text", "bot_send": false, "text": "hi", "sent_at": "2024-06-15T10:30:00" },
        { "message_id": 2, "type": "text", "bot_send": true, "text": "hello bob", "sent_at": null }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/private/users/10"))
        .and(query_param("recent_limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/private/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [
                { "label": "Normal", "value": "Normal" },
                { "label": "Blocked", "value": "Blocked" }
            ]
        })))
        .mount(&server)
        .await;

    let detail = client.get_private_user_detail(10, Some(2)).await.unwrap();
    assert_eq!(detail.user.id, 10);
    assert_eq!(detail.recent_messages.len(), 2);
    assert_eq!(detail.recent_messages[0].user_id, Some(10));
    assert!(detail.recent_messages[1].bot_send);
    assert_eq!(detail.recent_messages[1].sent_at, None);

    let meta = client.fetch_private_meta().await.unwrap();
    let values: Vec<&str> = meta.statuses.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["Normal", "Blocked"]);
}

#[tokio::test]
async fn test_group_history_forwards_before_cursor() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/groups/42/history"))
        .and(query_param("limit", "2"))
        .and(query_param("before", "2024-06-15T10:30:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "message_id": 8, "user_id": 7, "type": "text", "bot_send": false, "text": "older", "sent_at": "2024-06-15T10:29:00" },
            { "message_id": 7, "user_id": null, "type": "image", "bot_send": true, "text": null, "sent_at": "2024-06-15T10:28:00" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let before = botdeck_api::timestamp::parse("2024-06-15T10:30:00").unwrap();
    let history = client
        .get_group_history(
            42,
            &HistoryQuery {
                limit: Some(2),
                before: Some(before),
            },
        )
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message_id, 8);
    assert!(history.iter().all(|m| m.sent_at.is_some_and(|t| t < before)));
    assert_eq!(history[1].message_type, "image");
}

#[tokio::test]
async fn test_private_history_without_cursor_sends_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/private/users/10/history"))
        .and(query_param_is_missing("before"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "message_id": 3, "type": "text", "bot_send": true, "text": "hi bob", "sent_at": "2024-06-15T10:30:00" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let history = client
        .get_private_history(10, &HistoryQuery::default())
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_id, None);
    assert_eq!(history[0].text.as_deref(), Some("hi bob"));
}

#[tokio::test]
async fn test_command_history_forwards_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/commands/history"))
        .and(query_param("command", "setu"))
        .and(query_param("user_id", "7"))
        .and(query_param("success", "false"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 11,
            "items": [{
                "id": 501,
                "command": "setu",
                "user_id": 7,
                "chat_id": 1001,
                "chat_type": "group",
                "message_id": 9000,
                "arguments": ["--r18"],
                "raw_text": "/setu --r18",
                "success": false,
                "error_message": "not allowed in this group",
                "duration_ms": 12,
                "triggered_at": "2024-06-15T10:30:00.123456"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .list_command_history(&CommandHistoryQuery {
            command: Some("setu".into()),
            user_id: Some(7),
            success: Some(false),
            limit: Some(5),
            offset: Some(10),
        })
        .await
        .unwrap();

    assert_eq!(page.total, 11);
    let entry = &page.items[0];
    assert!(!entry.success);
    assert_eq!(entry.arguments.as_deref(), Some(&["--r18".to_owned()][..]));
    assert_eq!(entry.error_message.as_deref(), Some("not allowed in this group"));
    assert!(entry.triggered_at.is_some());
}

#[tokio::test]
async fn test_update_private_user_clears_nickname() {
    let (server, client) = setup().await;

    let mut updated = user_json(10, "bob");
    updated["nick_name"] = json!(null);
    updated["recent_messages"] = json!([]);

    Mock::given(method("PUT"))
        .and(path("/api/private/users/10"))
        .and(body_json(json!({ "nick_name": null, "enable_chat": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .mount(&server)
        .await;

    let update = PrivateUserUpdate {
        nick_name: Patch::Clear,
        enable_chat: Patch::Set(false),
        ..PrivateUserUpdate::default()
    };
    let detail = client.update_private_user(10, &update).await.unwrap();

    assert_eq!(detail.user.nick_name, None);
}

#[tokio::test]
async fn test_feature_flags_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config/features"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{
                "key": "allow_r18g",
                "label": "Allow R18G",
                "description": "Default for new groups",
                "value": false,
                "editable": true,
                "category": "content"
            }],
            "placeholders": [{
                "key": "voice_replies",
                "label": "Voice replies",
                "description": "Reserved",
                "value": null,
                "editable": false,
                "category": "future"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/config/features/dark_mode"))
        .and(body_json(json!({ "value": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "dark_mode",
            "label": "Dark mode",
            "description": "",
            "value": true,
            "editable": true,
            "category": "ui"
        })))
        .mount(&server)
        .await;

    let flags = client.fetch_feature_flags().await.unwrap();
    assert_eq!(flags.features[0].value, Some(false));
    assert_eq!(flags.placeholders[0].value, None);
    assert!(!flags.placeholders[0].editable);

    let flag = client.update_feature_flag("dark_mode", true).await.unwrap();
    assert_eq!(flag.value, Some(true));
}

#[tokio::test]
async fn test_dashboard_summary_limit_is_omitted_when_unset() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_groups": 4,
            "active_groups": 3,
            "chat_enabled_groups": 2,
            "total_users": 9,
            "chat_enabled_users": 8,
            "total_group_messages": 120,
            "total_private_messages": 30,
            "recent_activity": [{
                "message_id": 1,
                "scope": "group",
                "scope_id": 42,
                "preview": "hi",
                "sent_at": "2024-06-15T10:30:00"
            }]
        })))
        .mount(&server)
        .await;

    let summary = client.fetch_dashboard_summary(None).await.unwrap();
    assert_eq!(summary.total_groups, 4);
    assert_eq!(summary.recent_activity[0].scope, "group");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_carries_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/groups/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Group not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_group_detail(404, None).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::RequestFailed {
            kind,
            status,
            message,
        } => {
            assert_eq!(kind, FailureKind::Status);
            assert_eq!(status, Some(404));
            assert_eq!(message, "Group not found");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_error_is_flattened() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/groups/1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "sanity_limit"], "msg": "must be >= 0", "type": "value_error" }]
        })))
        .mount(&server)
        .await;

    let update = GroupUpdate {
        sanity_limit: Patch::Set(-1),
        ..GroupUpdate::default()
    };
    let err = client.update_group(1, &update).await.unwrap_err();

    assert_eq!(err.http_status(), Some(422));
    assert!(err.to_string().contains("body.sanity_limit: must be >= 0"));
}

#[tokio::test]
async fn test_flag_key_is_one_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/config/features/odd%2Fkey%3Fx"))
        .and(body_json(json!({ "value": true })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Unknown feature" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.update_feature_flag("odd/key?x", true).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Unknown feature"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups/meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "chat_modes": [], "statuses": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let client = ConsoleClient::new(&format!("{}/api", server.uri()), &transport).unwrap();

    let err = client.fetch_group_meta().await.unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::Timeout));
    assert_eq!(err.http_status(), None);
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/groups/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_group_meta().await.unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::Decode));
}
