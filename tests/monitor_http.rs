//! End-to-end poll cycles over HTTP: LCD reads in, webhook posts out

use mockito::Matcher;
use pomon::alerts::{DiscordNotifier, PagerDutyNotifier, ServiceSink};
use pomon::domain::ServiceKind;
use pomon::services::{Monitor, MonitorConfig};
use pomon::source::LcdClient;
use std::time::{Duration, SystemTime};

const ADDR: &str = "terravaloper1abc";
const PATH: &str = "/oracle/validators/terravaloper1abc/miss";
const TIMEOUT: Duration = Duration::from_secs(5);

fn at(minutes: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(minutes * 60)
}

fn counter(server: &mut mockito::ServerGuard, misses: u64) -> mockito::Mock {
    server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(format!(r#"{{"miss_counter":"{}"}}"#, misses))
        .create()
}

#[test]
fn test_alert_lifecycle_over_http() {
    let mut lcd = mockito::Server::new();
    let mut discord = mockito::Server::new();

    let webhook = discord
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "embeds": [{"fields": [{"name": "Misses", "value": "12"}]}]
        })))
        .with_status(204)
        .expect(1)
        .create();

    let source = LcdClient::new(vec![lcd.url()], TIMEOUT).unwrap();
    let notifier = DiscordNotifier::new(format!("{}/hook", discord.url()), None, TIMEOUT).unwrap();
    let config = MonitorConfig {
        addresses: vec![ADDR.to_string()],
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(config, source, vec![ServiceSink::new(10, Box::new(notifier))]);

    let reading = counter(&mut lcd, 12);
    let summary = monitor.tick_at(at(0));
    assert_eq!(summary.polled, 1);
    assert_eq!(summary.notifications, 1);

    // unchanged inside the cooldown window: nothing sent, alert kept
    let summary = monitor.tick_at(at(5));
    assert_eq!(summary.notifications, 0);
    assert!(monitor.ledger().lookup(ServiceKind::Discord, ADDR).is_some());

    reading.remove();
    let _reading = counter(&mut lcd, 0);
    let summary = monitor.tick_at(at(10));
    assert_eq!(summary.closed, 1);
    assert!(monitor.ledger().is_empty());

    webhook.assert();
}

#[test]
fn test_rejected_delivery_still_records_alert() {
    let mut lcd = mockito::Server::new();
    let mut pagerduty = mockito::Server::new();

    let enqueue = pagerduty
        .mock("POST", "/v2/enqueue")
        .with_status(400)
        .with_body(r#"{"status":"invalid event"}"#)
        .expect(1)
        .create();
    let _reading = counter(&mut lcd, 30);

    let source = LcdClient::new(vec![lcd.url()], TIMEOUT).unwrap();
    let notifier = PagerDutyNotifier::new("key", TIMEOUT)
        .unwrap()
        .with_events_url(format!("{}/v2/enqueue", pagerduty.url()));
    let config = MonitorConfig {
        addresses: vec![ADDR.to_string()],
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(config, source, vec![ServiceSink::new(20, Box::new(notifier))]);

    monitor.tick_at(at(0));

    let alert = monitor.ledger().lookup(ServiceKind::PagerDuty, ADDR).unwrap();
    assert_eq!(alert.misses, 30);
    assert_eq!(alert.notifications, 1);
    enqueue.assert();
}

#[test]
fn test_unreachable_lcd_skips_cycle() {
    let source = LcdClient::new(vec!["http://127.0.0.1:1".to_string()], TIMEOUT).unwrap();
    let config = MonitorConfig {
        addresses: vec![ADDR.to_string(), "terravaloper1def".to_string()],
        ..MonitorConfig::default()
    };
    let mut monitor = Monitor::new(config, source, Vec::new());

    let summary = monitor.tick_at(at(0));
    assert_eq!(summary.polled, 0);
    assert_eq!(summary.skipped, 2);
    assert!(monitor.tracker().previous(ADDR).is_none());
}
