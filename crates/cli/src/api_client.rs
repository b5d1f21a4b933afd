use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use rolodex_core::{Contact, NewContact};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).context("failed to build API URL")
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let body = self.send(req).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let url = self.url("/api/contacts")?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn get_contact(&self, id: Uuid) -> Result<Contact> {
        let url = self.url(&format!("/api/contacts/{id}"))?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn create_contact(&self, contact: &NewContact) -> Result<CreateContactResponse> {
        let url = self.url("/api/contacts")?;
        let response: CreateContactResponse =
            self.send_json(self.http.post(url).json(contact)).await?;
        ensure_success(response.success)?;
        Ok(response)
    }

    pub async fn set_favorite(&self, id: Uuid, is_favorite: bool) -> Result<()> {
        let url = self.url(&format!("/api/contacts/{id}/favorite"))?;
        let body = serde_json::json!({ "is_favorite": is_favorite });
        let response: SuccessResponse = self.send_json(self.http.put(url).json(&body)).await?;
        ensure_success(response.success)
    }

    pub async fn delete_contact(&self, id: Uuid) -> Result<()> {
        let url = self.url(&format!("/api/contacts/{id}"))?;
        let response: SuccessResponse = self.send_json(self.http.delete(url)).await?;
        ensure_success(response.success)
    }

    pub async fn import_workbook(&self, file_name: &str, data: Vec<u8>) -> Result<ImportResponse> {
        let url = self.url("/api/import")?;
        let part = Part::bytes(data).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let response: ImportResponse = self.send_json(self.http.post(url).multipart(form)).await?;
        ensure_success(response.success)?;
        Ok(response)
    }

    pub async fn export_workbook(&self) -> Result<Vec<u8>> {
        let url = self.url("/api/export")?;
        let bytes = self.send(self.http.get(url)).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("/api/health")?;
        self.send_json(self.http.get(url)).await
    }
}

fn ensure_success(success: bool) -> Result<()> {
    if !success {
        anyhow::bail!("server reported failure");
    }
    Ok(())
}

// =============================================================================
// Response types (mirrored from server handlers)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: usize,
    pub skipped: usize,
    pub without_details: usize,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
