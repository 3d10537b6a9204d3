//! Fixtures shared by the Conduit-backed tests.

use crate::conduit::ConduitClient;
use crate::config::Credentials;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

pub fn credentials_for(server: &MockServer) -> Credentials {
    Credentials::new(format!("{}/api/", server.uri()), TEST_TOKEN)
}

pub fn client_for(server: &MockServer) -> ConduitClient {
    ConduitClient::new(credentials_for(server), 4).unwrap()
}

pub fn conduit_ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": result,
        "error_code": null,
        "error_info": null,
    }))
}

/// Mounts `result` for `conduit_method` calls whose form body contains
/// `body_part`.
pub async fn mount_result(
    server: &MockServer,
    conduit_method: &str,
    body_part: &str,
    result: Value,
) {
    mount_result_after(server, conduit_method, body_part, result, Duration::ZERO).await;
}

/// Like [`mount_result`], answering only after `delay`.
pub async fn mount_result_after(
    server: &MockServer,
    conduit_method: &str,
    body_part: &str,
    result: Value,
    delay: Duration,
) {
    Mock::given(method("POST"))
        .and(path(format!("/api/{conduit_method}")))
        .and(body_string_contains(body_part))
        .respond_with(conduit_ok(result).set_delay(delay))
        .mount(server)
        .await;
}

pub fn revision_json(
    id: i64,
    title: &str,
    reviewers: &[&str],
    repository: Option<&str>,
) -> Value {
    json!({
        "id": id.to_string(),
        "phid": format!("PHID-DREV-{id}"),
        "title": title,
        "uri": format!("https://phab.example.com/D{id}"),
        "dateCreated": "1500000000",
        "dateModified": "1500432000",
        "statusName": "Closed",
        "diffs": ["2", "1"],
        "lineCount": "120",
        "repositoryPHID": repository,
        "reviewers": reviewers,
    })
}

pub fn user_json(phid: &str, username: &str) -> Value {
    json!([{"phid": phid, "userName": username, "realName": username.to_uppercase()}])
}

/// Mounts the diff list and commit paths of revision `id`.
pub async fn mount_revision_lookups(server: &MockServer, id: i64, diff_dates: &[i64]) {
    mount_revision_lookups_after(server, id, diff_dates, Duration::ZERO).await;
}

/// Like [`mount_revision_lookups`], each lookup answering only after `delay`.
pub async fn mount_revision_lookups_after(
    server: &MockServer,
    id: i64,
    diff_dates: &[i64],
    delay: Duration,
) {
    let diffs: serde_json::Map<String, Value> = diff_dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let diff_id = id * 10 + index as i64;
            (
                diff_id.to_string(),
                json!({"id": diff_id.to_string(), "dateCreated": date.to_string()}),
            )
        })
        .collect();
    mount_result_after(
        server,
        "differential.querydiffs",
        &format!("revisionIDs%5B0%5D={id}"),
        Value::Object(diffs),
        delay,
    )
    .await;
    mount_result_after(
        server,
        "differential.getcommitpaths",
        &format!("revision_id={id}"),
        json!([format!("src/d{id}.rs"), "README.md"]),
        delay,
    )
    .await;
}
