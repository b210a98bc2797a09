//! Discord and PagerDuty notifier tests against local mock servers

use mockito::Matcher;
use pomon::alerts::{AlertNotice, DiscordNotifier, Notifier, PagerDutyNotifier};
use pomon::error::NotifyError;
use serde_json::json;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn notice() -> AlertNotice {
    AlertNotice {
        address: "terravaloper1abc".to_string(),
        misses: 12,
        threshold: 10,
        endpoint: "https://lcd.example.org".to_string(),
        query: "/oracle/validators/terravaloper1abc/miss".to_string(),
    }
}

#[test]
fn test_discord_posts_embed() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/webhooks/1/token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "content": "<@4242>",
            "embeds": [{
                "title": "Price Oracle Alert",
                "description": concat!(
                    "terravaloper1abc\r\n",
                    "https://lcd.example.org/oracle/validators/terravaloper1abc/miss"
                ),
                "fields": [
                    {"name": "Misses", "value": "12", "inline": true},
                    {"name": "Threshold", "value": "10", "inline": true}
                ]
            }]
        })))
        .with_status(204)
        .expect(1)
        .create();

    let url = format!("{}/api/webhooks/1/token", server.url());
    let notifier = DiscordNotifier::new(url, Some("4242".to_string()), TIMEOUT).unwrap();

    notifier.notify(&notice()).unwrap();
    mock.assert();
}

#[test]
fn test_discord_rejection_is_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/hook")
        .with_status(400)
        .with_body("Invalid Form Body")
        .create();

    let notifier = DiscordNotifier::new(format!("{}/hook", server.url()), None, TIMEOUT).unwrap();
    let err = notifier.notify(&notice()).unwrap_err();

    match err {
        NotifyError::Rejected {
            service,
            status,
            message,
        } => {
            assert_eq!(service, "Discord");
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid Form Body");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pagerduty_triggers_event() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v2/enqueue")
        .match_body(Matcher::Json(json!({
            "routing_key": "R0UT1NG",
            "event_action": "trigger",
            "payload": {
                "summary": "Price Oracle Alert: terravaloper1abc - 12 Missed",
                "source": "pomon",
                "severity": "critical"
            }
        })))
        .with_status(202)
        .with_body(r#"{"status":"success","message":"Event processed"}"#)
        .expect(1)
        .create();

    let notifier = PagerDutyNotifier::new("R0UT1NG", TIMEOUT)
        .unwrap()
        .with_events_url(format!("{}/v2/enqueue", server.url()));

    notifier.notify(&notice()).unwrap();
    mock.assert();
}

#[test]
fn test_pagerduty_invalid_key() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v2/enqueue")
        .with_status(400)
        .with_body(r#"{"status":"invalid event","message":"Event object is invalid"}"#)
        .create();

    let notifier = PagerDutyNotifier::new("bad", TIMEOUT)
        .unwrap()
        .with_events_url(format!("{}/v2/enqueue", server.url()));

    let err = notifier.notify(&notice()).unwrap_err();
    assert!(matches!(err, NotifyError::Rejected { status: 400, .. }));
}

#[test]
fn test_unreachable_service_is_http_error() {
    let notifier = PagerDutyNotifier::new("key", TIMEOUT)
        .unwrap()
        .with_events_url("http://127.0.0.1:1/v2/enqueue");

    let err = notifier.notify(&notice()).unwrap_err();
    assert!(matches!(err, NotifyError::Http(_) | NotifyError::Timeout));
}
