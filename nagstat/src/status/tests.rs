//! Tests for the status parser.

use super::*;
use crate::fixtures::SAMPLE_STATUS;
use crate::{Error, StatusSnapshot};

#[test]
fn test_parse_counts_services() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    assert_eq!(snap.service_count(), 6);
    let hosts: Vec<_> = snap.hosts.keys().collect();
    assert_eq!(hosts, vec!["web1", "db1", "webdb1"]);
}

#[test]
fn test_hoststatus_optional() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    assert!(snap.host("web1").unwrap().hoststatus.is_some());
    // webdb1 only appears through a servicestatus block
    assert!(snap.host("webdb1").unwrap().hoststatus.is_none());
}

#[test]
fn test_service_attributes() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    let svc = snap.service("web1", "disk_root").unwrap();
    assert_eq!(svc.host_name(), "web1");
    assert_eq!(svc.description(), "disk_root");
    assert_eq!(svc.get("current_state"), Some("2"));
    assert_eq!(
        svc.get("plugin_output"),
        Some("DISK CRITICAL - free space: / 12 MB (1%)")
    );
}

#[test]
fn test_value_keeps_everything_after_first_equals() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    let status = snap.host("web1").unwrap().hoststatus.as_ref().unwrap();
    assert_eq!(
        status.get("plugin_output").map(String::as_str),
        Some("PING OK - Packet loss = 0%")
    );
}

#[test]
fn test_info_and_program() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    assert_eq!(snap.info.get("version").map(String::as_str), Some("3.2.3"));
    assert_eq!(snap.process.get("nagios_pid").map(String::as_str), Some("1234"));
}

#[test]
fn test_contacts_exclude_name() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    let contact = snap.contacts.get("nagiosadmin").unwrap();
    assert!(!contact.contains_key("contact_name"));
    assert_eq!(
        contact.get("host_notifications_enabled").map(String::as_str),
        Some("1")
    );
}

#[test]
fn test_comments_in_file_order() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    let host = snap.host("web1").unwrap();

    assert_eq!(host.hostcomments.len(), 1);
    assert!(!host.hostcomments[0].contains_key("host_name"));

    let comments = host.servicecomments.get("disk_root").unwrap();
    let ids: Vec<_> = comments
        .iter()
        .map(|c| c.get("comment_id").unwrap().as_str())
        .collect();
    assert_eq!(ids, vec!["2", "3"]);
    // Only a literal service_name key is dropped from service comments
    assert!(comments[0].contains_key("service_description"));
}

#[test]
fn test_downtimes() {
    let snap = parse_status(SAMPLE_STATUS).unwrap();
    assert_eq!(snap.host("db1").unwrap().hostdowntime.as_deref(), Some("7"));
    assert!(snap.host("db1").unwrap().in_downtime());
    assert_eq!(
        snap.host("web1").unwrap().servicedowntime.get("http").map(String::as_str),
        Some("9")
    );
    assert!(snap.host("web1").unwrap().hostdowntime.is_none());
}

#[test]
fn test_missing_host_name_is_fatal() {
    let text = "servicestatus {\n\tservice_description=disk\n\t}\n";
    match parse_status(text) {
        Err(Error::Parse { line, block, message }) => {
            assert_eq!(line, 3);
            assert_eq!(block, "servicestatus");
            assert!(message.contains("host_name"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_service_description_is_fatal() {
    let text = "hoststatus {\n\thost_name=a\n\t}\nservicestatus {\n\thost_name=a\n\t}\n";
    assert!(matches!(parse_status(text), Err(Error::Parse { .. })));
}

#[test]
fn test_missing_downtime_id_is_fatal() {
    let text = "hostdowntime {\n\thost_name=a\n\t}\n";
    let err = parse_status(text).unwrap_err();
    assert!(err.to_string().contains("downtime_id"));
}

#[test]
fn test_identifying_key_matches_whole_key() {
    let text = "servicestatus {\n\thost_name_backup=old\n\thost_name=new\n\tservice_description=x\n\t}\n";
    let snap = parse_status(text).unwrap();
    assert!(snap.host("new").is_some());
    assert!(snap.host("old").is_none());
}

#[test]
fn test_unknown_block_ignored() {
    let text = "futurestatus {\n\tsomething=1\n\t}\nhoststatus {\n\thost_name=a\n\t}\n";
    let snap = parse_status(text).unwrap();
    assert_eq!(snap.hosts.len(), 1);
    assert!(snap.info.is_empty());
}

#[test]
fn test_brace_in_value_does_not_close_block() {
    let text = "servicestatus {\n\thost_name=a\n\tplugin_output=json {\"x\": 1}\n\tservice_description=b\n\t}\n";
    let snap = parse_status(text).unwrap();
    let svc = snap.service("a", "b").unwrap();
    assert_eq!(svc.get("plugin_output"), Some("json {\"x\": 1}"));
}

#[test]
fn test_empty_value_kept() {
    let text = "servicestatus {\n\thost_name=a\n\tservice_description=b\n\tlong_plugin_output=\n\t}\n";
    let snap = parse_status(text).unwrap();
    assert_eq!(snap.service("a", "b").unwrap().get("long_plugin_output"), Some(""));
}

#[test]
fn test_crlf_line_endings() {
    let text = "hoststatus {\r\n\thost_name=a\r\n\tcurrent_state=1\r\n\t}\r\n";
    let snap = parse_status(text).unwrap();
    let status = snap.host("a").unwrap().hoststatus.as_ref().unwrap();
    assert_eq!(status.get("current_state").map(String::as_str), Some("1"));
}

#[test]
fn test_parse_is_idempotent() {
    let a = parse_status(SAMPLE_STATUS).unwrap();
    let b = parse_status(SAMPLE_STATUS).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_repeated_block_merges() {
    let text = "servicestatus {\n\thost_name=a\n\tservice_description=b\n\tcurrent_state=0\n\t}\n\
                servicestatus {\n\thost_name=a\n\tservice_description=b\n\tcurrent_state=2\n\t}\n";
    let snap = parse_status(text).unwrap();
    assert_eq!(snap.service_count(), 1);
    assert_eq!(snap.service("a", "b").unwrap().get("current_state"), Some("2"));
}

#[test]
fn test_block_kind_lookup() {
    assert_eq!(BlockKind::from_name("servicestatus"), Some(BlockKind::ServiceStatus));
    assert_eq!(BlockKind::from_name("hostdowntime"), Some(BlockKind::HostDowntime));
    assert_eq!(BlockKind::from_name("servicegroup"), None);
}

#[test]
fn test_decode_latin1_fallback() {
    let bytes = b"hoststatus {\n\thost_name=caf\xe9\n\t}\n";
    let text = decode_status_bytes(bytes);
    let snap = parse_status(&text).unwrap();
    assert!(snap.host("caf\u{e9}").is_some());
}

#[test]
fn test_decode_utf8_borrowed() {
    let text = decode_status_bytes("plain".as_bytes());
    assert!(matches!(text, std::borrow::Cow::Borrowed("plain")));
}

#[test]
fn test_from_path_missing_file() {
    let err = StatusSnapshot::from_path(std::path::Path::new("/nonexistent/status.dat")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_from_path_reads_latin1_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("status.dat");
    std::fs::write(&path, b"servicestatus {\n\thost_name=h\n\tservice_description=s\n\tplugin_output=\xb5s\n\t}\n").unwrap();
    let snap = StatusSnapshot::from_path(&path).unwrap();
    assert_eq!(snap.service("h", "s").unwrap().get("plugin_output"), Some("\u{b5}s"));
}
