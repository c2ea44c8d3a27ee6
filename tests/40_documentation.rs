mod common;

use anyhow::Result;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn alarm() -> Value {
    json!({
        "name": "Innbruddsalarm",
        "location": "Gang",
        "system_type": "Verisure",
        "additional_info": { "panel": "Smartpanel 2" }
    })
}

#[tokio::test]
async fn security_systems_empty_without_document() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = common::create_owner(&server, "kari@example.no").await?;
    let owner_id = owner["id"].as_str().unwrap();

    let items = common::data(
        server
            .client
            .get(server.url(&format!("/api/owners/{}/documentation/security-systems", owner_id)))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(items, json!([]));

    let (status, body) = common::read(
        server
            .client
            .get(server.url(&format!("/api/owners/{}/documentation/security-systems/x", owner_id)))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Documentation not found");
    Ok(())
}

#[tokio::test]
async fn security_system_item_lifecycle() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = common::create_owner(&server, "kari@example.no").await?;
    let base = format!("/api/owners/{}/documentation", owner["id"].as_str().unwrap());

    let res = server
        .client
        .post(server.url(&format!("{}/security-systems", base)))
        .json(&alarm())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let item = common::data(res).await?;
    assert_eq!(item["category"], "security_systems");
    assert_eq!(item["images"], json!([]));
    assert_eq!(item["additional_info"]["panel"], "Smartpanel 2");
    let item_url = format!("{}/security-systems/{}", base, item["id"].as_str().unwrap());

    let doc = common::data(server.client.get(server.url(&base)).send().await?).await?;
    assert_eq!(doc["security_systems"].as_array().unwrap().len(), 1);

    let updated = common::data(
        server
            .client
            .put(server.url(&item_url))
            .json(&json!({ "installer": "Sikkerhet AS", "notes": "Service hvert år" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(updated["installer"], "Sikkerhet AS");
    assert_eq!(updated["name"], "Innbruddsalarm");
    assert_ne!(updated["updated_at"], item["updated_at"]);

    let fetched = common::data(server.client.get(server.url(&item_url)).send().await?).await?;
    assert_eq!(fetched["notes"], "Service hvert år");

    let (status, body) = common::read(
        server
            .client
            .put(server.url(&format!("{}/security-systems/missing", base)))
            .json(&json!({ "notes": "x" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Security system item not found");

    common::data(server.client.delete(server.url(&item_url)).send().await?).await?;
    let items = common::data(server.client.get(server.url(&format!("{}/security-systems", base))).send().await?).await?;
    assert_eq!(items, json!([]));
    Ok(())
}

#[tokio::test]
async fn images_and_documents_attach_to_items() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = common::create_owner(&server, "kari@example.no").await?;
    let base = format!("/api/owners/{}/documentation", owner["id"].as_str().unwrap());

    let item = common::data(
        server.client.post(server.url(&format!("{}/security-systems", base))).json(&alarm()).send().await?,
    )
    .await?;
    let item_url = format!("{}/security-systems/{}", base, item["id"].as_str().unwrap());

    let image_part = Part::bytes(b"jpeg".to_vec()).file_name("panel.jpg").mime_str("image/jpeg")?;
    let image = common::data(
        server
            .client
            .post(server.url(&format!("{}/upload-image", item_url)))
            .multipart(Form::new().part("file", image_part).text("caption", "Alarmpanel"))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(image["caption"], "Alarmpanel");
    assert!(image["url"].as_str().unwrap().ends_with(".jpg"));

    let doc_part = Part::bytes(b"%PDF-1.4 manual".to_vec())
        .file_name("manual.pdf")
        .mime_str("application/pdf")?;
    let document = common::data(
        server
            .client
            .post(server.url(&format!("{}/upload-document", item_url)))
            .multipart(Form::new().part("file", doc_part))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(document["filename"], "manual.pdf");
    assert_eq!(document["file_type"], "pdf");
    assert_eq!(document["size"], 15);

    let bad_part = Part::bytes(b"plain".to_vec()).file_name("notes.txt").mime_str("text/plain")?;
    let (status, body) = common::read(
        server
            .client
            .post(server.url(&format!("{}/upload-document", item_url)))
            .multipart(Form::new().part("file", bad_part))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "File must be PDF or Word document");

    let fetched = common::data(server.client.get(server.url(&item_url)).send().await?).await?;
    assert_eq!(fetched["images"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["documents"].as_array().unwrap().len(), 1);

    let image_id = image["id"].as_str().unwrap();
    common::data(server.client.delete(server.url(&format!("{}/images/{}", item_url, image_id))).send().await?).await?;
    let fetched = common::data(server.client.get(server.url(&item_url)).send().await?).await?;
    assert_eq!(fetched["images"], json!([]));
    assert_eq!(fetched["documents"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn upload_to_missing_item_is_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = common::create_owner(&server, "kari@example.no").await?;
    let base = format!("/api/owners/{}/documentation", owner["id"].as_str().unwrap());
    common::data(server.client.post(server.url(&format!("{}/security-systems", base))).json(&alarm()).send().await?).await?;

    let part = Part::bytes(b"jpeg".to_vec()).file_name("x.jpg").mime_str("image/jpeg")?;
    let (status, body) = common::read(
        server
            .client
            .post(server.url(&format!("{}/security-systems/missing/upload-image", base)))
            .multipart(Form::new().part("file", part))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Security system item not found");
    Ok(())
}
