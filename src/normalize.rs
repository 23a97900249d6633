//! Parsing of the model's raw reply into a [`CommitRecord`].

use log::debug;
use serde::Deserialize;

use crate::domain::CommitRecord;
use crate::error::{AppError, AppResult};

/// Expected shape of the model reply. Unknown fields are ignored and
/// optional fields default to empty; common capitalization variants of the
/// keys are tolerated since models do not reliably honor casing.
#[derive(Debug, Default, Deserialize)]
struct RawReply {
    #[serde(default, alias = "Type", alias = "TYPE")]
    r#type: String,
    #[serde(default, alias = "Scope", alias = "SCOPE")]
    scope: String,
    #[serde(default, alias = "Desc", alias = "DESC", alias = "description")]
    desc: String,
    #[serde(default, alias = "Body", alias = "BODY")]
    body: String,
    #[serde(default, alias = "Footer", alias = "FOOTER")]
    footer: String,
}

/// Extracts the JSON payload from a reply that may be wrapped in a
/// markdown code fence (with or without a `json` language tag) or padded
/// with prose around a bare object.
fn extract_json_str(reply: &str) -> Option<&str> {
    if let Some(start) = reply.find("```json") {
        let content_start = start + 7;
        let end = reply[content_start..]
            .find("```")
            .map(|e| content_start + e)?;
        return Some(reply[content_start..end].trim());
    }

    if let Some(start) = reply.find("```") {
        let content_start = start + 3;
        // Skip a language identifier on the fence line.
        let line_end = reply[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);
        let end = reply[line_end..].find("```").map(|e| line_end + e)?;
        return Some(reply[line_end..end].trim());
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if start <= end {
        Some(reply[start..=end].trim())
    } else {
        None
    }
}

fn malformed(reason: impl Into<String>, raw: &str) -> AppError {
    AppError::MalformedResponse {
        reason: reason.into(),
        raw: raw.to_string(),
    }
}

/// Parses the raw model reply into a structured commit record.
///
/// Line-length normalization is not applied here; the orchestrator folds
/// the body afterwards.
pub fn normalize_reply(raw: &str) -> AppResult<CommitRecord> {
    debug!("normalizing model reply ({} bytes)", raw.len());

    let payload =
        extract_json_str(raw).ok_or_else(|| malformed("no JSON object in reply", raw))?;

    let reply: RawReply = serde_json::from_str(payload)
        .map_err(|err| malformed(format!("invalid JSON: {err}"), raw))?;

    if reply.r#type.trim().is_empty() {
        return Err(malformed("missing required field `type`", raw));
    }
    if reply.desc.trim().is_empty() {
        return Err(malformed("missing required field `desc`", raw));
    }

    Ok(CommitRecord {
        kind: reply.r#type.trim().to_string(),
        scope: reply.scope.trim().to_string(),
        desc: reply.desc.trim().to_string(),
        body: reply.body.trim().to_string(),
        footer: reply.footer.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let rec = normalize_reply(
            r#"{"type":"feat","scope":"core","desc":"add x","body":"details","footer":""}"#,
        )
        .unwrap();
        assert_eq!(rec.kind, "feat");
        assert_eq!(rec.scope, "core");
        assert_eq!(rec.desc, "add x");
        assert_eq!(rec.body, "details");
        assert_eq!(rec.footer, "");
    }

    #[test]
    fn strips_json_code_fence() {
        let raw = "```json\n{\"type\":\"feat\",\"desc\":\"add x\",\"body\":\"\",\"scope\":\"\",\"footer\":\"\"}\n```";
        let rec = normalize_reply(raw).unwrap();
        assert_eq!(rec.kind, "feat");
        assert_eq!(rec.desc, "add x");
    }

    #[test]
    fn strips_plain_code_fence() {
        let raw = "```\n{\"type\":\"fix\",\"desc\":\"patch y\"}\n```";
        let rec = normalize_reply(raw).unwrap();
        assert_eq!(rec.kind, "fix");
        assert_eq!(rec.scope, "");
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let raw = "Here is your commit message:\n{\"type\":\"docs\",\"desc\":\"update readme\"}\nHope that helps!";
        let rec = normalize_reply(raw).unwrap();
        assert_eq!(rec.kind, "docs");
    }

    #[test]
    fn tolerates_capitalized_keys() {
        let rec =
            normalize_reply(r#"{"Type":"feat","Desc":"add x","Scope":"cli"}"#).unwrap();
        assert_eq!(rec.kind, "feat");
        assert_eq!(rec.scope, "cli");
    }

    #[test]
    fn ignores_unknown_fields() {
        let rec = normalize_reply(
            r#"{"type":"feat","desc":"add x","confidence":0.9,"notes":["n"]}"#,
        )
        .unwrap();
        assert_eq!(rec.kind, "feat");
    }

    #[test]
    fn rejects_non_json() {
        let err = normalize_reply("not json").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[test]
    fn rejects_missing_required_fields() {
        let err = normalize_reply(r#"{"scope":"x"}"#).unwrap_err();
        match err {
            AppError::MalformedResponse { reason, raw } => {
                assert!(reason.contains("`type`"));
                assert!(raw.contains("scope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_desc() {
        let err = normalize_reply(r#"{"type":"feat","desc":"  "}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }
}
