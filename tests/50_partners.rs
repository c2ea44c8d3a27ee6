mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn cleaner() -> Value {
    json!({
        "category": "daglig-drift",
        "name": "Renhold AS",
        "service": "Vask etter utleie",
        "phone": "22 33 44 55",
        "email": "post@renhold.no",
        "notes": "Fast hver fredag"
    })
}

#[tokio::test]
async fn partner_crud_is_scoped_by_owner() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.post(server.url("/api/partners/owner-1")).json(&cleaner()).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let partner = common::data(res).await?;
    assert_eq!(partner["owner_id"], "owner-1");
    assert_eq!(partner["status"], "Aktiv");
    assert_eq!(partner["is_certified"], false);
    let partner_id = partner["id"].as_str().unwrap().to_string();

    server.client.post(server.url("/api/partners/owner-2")).json(&cleaner()).send().await?;

    let listed = common::data(server.client.get(server.url("/api/partners/owner-1")).send().await?).await?;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let updated = common::data(
        server
            .client
            .put(server.url(&format!("/api/partners/owner-1/{}", partner_id)))
            .json(&json!({ "is_certified": true, "notes": null }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(updated["is_certified"], true);
    assert_eq!(updated["notes"], "Fast hver fredag");
    assert_eq!(updated["name"], "Renhold AS");

    let (status, body) = common::read(
        server
            .client
            .put(server.url(&format!("/api/partners/owner-2/{}", partner_id)))
            .json(&json!({ "name": "Kapret" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Partner not found");

    let message = common::data(
        server.client.delete(server.url(&format!("/api/partners/owner-1/{}", partner_id))).send().await?,
    )
    .await?;
    assert_eq!(message["message"], "Partner deleted successfully");

    let (status, _) = common::read(
        server.client.delete(server.url(&format!("/api/partners/owner-1/{}", partner_id))).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let listed = common::data(server.client.get(server.url("/api/partners/owner-1")).send().await?).await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn partner_create_rejects_missing_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let res = server
        .client
        .post(server.url("/api/partners/owner-1"))
        .json(&json!({ "name": "Uten kategori" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn partner_bodies_must_be_objects() -> Result<()> {
    let server = common::spawn_server().await?;
    let partner = common::data(server.client.post(server.url("/api/partners/owner-1")).json(&cleaner()).send().await?).await?;
    let partner_id = partner["id"].as_str().unwrap();

    let (status, body) = common::read(
        server
            .client
            .post(server.url("/api/partners/owner-1"))
            .json(&json!(["daglig-drift", "Renhold AS", "Vask", "22 33 44 55"]))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    let (status, _) = common::read(
        server
            .client
            .put(server.url(&format!("/api/partners/owner-1/{}", partner_id)))
            .json(&json!(["annen-kategori"]))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let listed = common::data(server.client.get(server.url("/api/partners/owner-1")).send().await?).await?;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["category"], "daglig-drift");
    Ok(())
}
