//! Building external command lines.

use std::collections::BTreeMap;

use crate::{Error, Result};

use super::actions::{lookup_action, ActionSpec};

/// One command to send: an action name plus its named field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    pub action: String,
    pub fields: BTreeMap<String, String>,
    /// Seconds since the epoch; `None` means "now".
    pub timestamp: Option<i64>,
}

impl CommandRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.insert(name.into(), value.to_string());
        self
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Parse `name=value` arguments into fields.
    pub fn with_assignments<'a>(mut self, args: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for arg in args {
            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("Expected field=value, got '{}'", arg)))?;
            self.fields.insert(name.trim().to_string(), value.to_string());
        }
        Ok(self)
    }
}

/// Current time in epoch seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Check a request against the action table, returning the action's spec.
///
/// Every missing or empty required field is named in the error. Values
/// holding a line break are rejected.
pub fn validate(request: &CommandRequest) -> Result<&'static ActionSpec> {
    let spec = lookup_action(&request.action)
        .ok_or_else(|| Error::UnknownAction(request.action.clone()))?;

    let missing: Vec<String> = spec
        .fields
        .iter()
        .filter(|f| request.fields.get(**f).map_or(true, |v| v.is_empty()))
        .map(|f| f.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingFields {
            action: spec.name.to_string(),
            fields: missing,
        });
    }

    // One request must stay one line in the command file.
    if let Some(field) = spec
        .fields
        .iter()
        .find(|f| request.fields.get(**f).is_some_and(|v| v.contains(&['\n', '\r'][..])))
    {
        return Err(Error::MultilineField {
            action: spec.name.to_string(),
            field: field.to_string(),
        });
    }
    Ok(spec)
}

/// Format `[<ts>] ACTION;field1;field2;...` for a request.
///
/// Zero-argument actions produce just `[<ts>] ACTION`. Fields not named by
/// the action are ignored.
pub fn format_command(request: &CommandRequest) -> Result<String> {
    let spec = validate(request)?;
    let ts = request.timestamp.unwrap_or_else(current_timestamp);

    let mut line = format!("[{}] {}", ts, spec.name);
    for field in spec.fields {
        line.push(';');
        // validate() guarantees presence
        line.push_str(request.fields.get(*field).map(String::as_str).unwrap_or_default());
    }
    Ok(line)
}

/// Substitute `${host}`, `${service}` and `${tstamp}` into `template`, or
/// return `default` when there is no template.
pub fn expand_template(template: Option<&str>, host: &str, service: &str, tstamp: i64, default: &str) -> String {
    match template {
        None => default.to_string(),
        Some(t) => t
            .replace("${host}", host)
            .replace("${service}", service)
            .replace("${tstamp}", &tstamp.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack() -> CommandRequest {
        CommandRequest::new("ACKNOWLEDGE_SVC_PROBLEM")
            .field("host_name", "web1")
            .field("service_description", "disk")
            .field("sticky", 1)
            .field("notify", 0)
            .field("persistent", 1)
            .field("author", "ops")
            .field("comment", "on it")
            .at(1700000000)
    }

    #[test]
    fn test_format_field_order() {
        let line = format_command(&ack()).unwrap();
        assert_eq!(line, "[1700000000] ACKNOWLEDGE_SVC_PROBLEM;web1;disk;1;0;1;ops;on it");
    }

    #[test]
    fn test_missing_author_is_named() {
        let mut req = ack();
        req.fields.remove("author");
        match format_command(&req) {
            Err(Error::MissingFields { action, fields }) => {
                assert_eq!(action, "ACKNOWLEDGE_SVC_PROBLEM");
                assert_eq!(fields, vec!["author"]);
            }
            other => panic!("expected missing field error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let req = ack().field("comment", "");
        let err = format_command(&req).unwrap_err();
        assert!(err.to_string().contains("comment"));
    }

    #[test]
    fn test_only_host_and_service_lists_all_missing() {
        let req = CommandRequest::new("ACKNOWLEDGE_SVC_PROBLEM")
            .field("host_name", "web1")
            .field("service_description", "disk");
        let err = format_command(&req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Action ACKNOWLEDGE_SVC_PROBLEM requires sticky, notify, persistent, author, comment"
        );
    }

    #[test]
    fn test_line_break_in_value_rejected() {
        let req = ack().field("comment", "ok\n[1] SHUTDOWN_PROGRAM");
        match format_command(&req) {
            Err(Error::MultilineField { action, field }) => {
                assert_eq!(action, "ACKNOWLEDGE_SVC_PROBLEM");
                assert_eq!(field, "comment");
            }
            other => panic!("expected multiline field error, got {:?}", other),
        }

        let req = ack().field("author", "ops\r");
        assert!(matches!(format_command(&req), Err(Error::MultilineField { field, .. }) if field == "author"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let req = CommandRequest::new("MAKE_COFFEE").at(1);
        assert!(matches!(format_command(&req), Err(Error::UnknownAction(a)) if a == "MAKE_COFFEE"));
    }

    #[test]
    fn test_zero_argument_action() {
        let req = CommandRequest::new("ENABLE_NOTIFICATIONS").field("host_name", "ignored").at(5);
        assert_eq!(format_command(&req).unwrap(), "[5] ENABLE_NOTIFICATIONS");
    }

    #[test]
    fn test_default_timestamp_is_now() {
        let before = current_timestamp();
        let line = format_command(&CommandRequest::new("ENABLE_NOTIFICATIONS")).unwrap();
        let ts: i64 = line[1..line.find(']').unwrap()].parse().unwrap();
        assert!(ts >= before && ts <= before + 5);
    }

    #[test]
    fn test_with_assignments() {
        let req = CommandRequest::new("DEL_HOST_DOWNTIME")
            .with_assignments(["downtime_id=12"])
            .unwrap()
            .at(3);
        assert_eq!(format_command(&req).unwrap(), "[3] DEL_HOST_DOWNTIME;12");

        assert!(CommandRequest::new("X").with_assignments(["novalue"]).is_err());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let req = CommandRequest::new("PROCESS_HOST_CHECK_RESULT")
            .with_assignments(["host_name=a", "status_code=0", "plugin_output=rta=0.1ms"])
            .unwrap()
            .at(9);
        assert_eq!(format_command(&req).unwrap(), "[9] PROCESS_HOST_CHECK_RESULT;a;0;rta=0.1ms");
    }

    #[test]
    fn test_expand_template() {
        assert_eq!(expand_template(None, "h", "s", 1, "fallback"), "fallback");
        assert_eq!(
            expand_template(Some("${host}/${service}@${tstamp}"), "h", "s", 7, "x"),
            "h/s@7"
        );
        assert_eq!(expand_template(Some("${host} ${host}"), "h", "", 0, ""), "h h");
    }
}
