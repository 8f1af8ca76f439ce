//! HTTP client for the CRM service

use crate::api::CrmApi;
use crate::error::{RemoteError, RemoteResult};
use crate::types::{
    CreateBusinessRequest, CreateContactRequest, ErrorBody, UpdateBusinessRequest,
    UpdateContactRequest,
};
use ::async_trait::async_trait;
use prospect_core::{Business, BusinessId, Contact, ContactId, Role, User, UserId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::time::Duration;

/// Credentials attached to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CrmCredentials {
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
}

/// [`CrmApi`] implementation speaking HTTP/JSON to the live service.
#[derive(Clone)]
pub struct HttpCrmApi {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl HttpCrmApi {
    pub fn new(base_url: &str, auth: &CrmCredentials, timeout_ms: u64) -> RemoteResult<Self> {
        let timeout = Duration::from_millis(timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(auth)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    async fn get_json<T>(&self, path: &str) -> RemoteResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .send()
            .await?;
        parse_response(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> RemoteResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> RemoteResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(url)
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }

    /// DELETE endpoints answer 2xx with bodies that vary by service
    /// version, so any successful status is enough.
    async fn delete(&self, path: &str) -> RemoteResult<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(url)
            .headers(self.auth_header.clone())
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await?;
        Err(error_from_body(status, &text))
    }
}

#[async_trait]
impl CrmApi for HttpCrmApi {
    async fn list_businesses(&self) -> RemoteResult<Vec<Business>> {
        self.get_json("/business/all").await
    }

    async fn list_businesses_by_user(&self, user_id: &UserId) -> RemoteResult<Vec<Business>> {
        let path = format!("/business/byUser/{}", user_id.as_str());
        self.get_json(&path).await
    }

    async fn create_business(&self, req: &CreateBusinessRequest) -> RemoteResult<Business> {
        self.post_json("/business/create", req).await
    }

    async fn update_business(
        &self,
        id: &BusinessId,
        req: &UpdateBusinessRequest,
    ) -> RemoteResult<Business> {
        let path = format!("/business/update/{}", id.as_str());
        self.put_json(&path, req).await
    }

    async fn delete_business(&self, id: &BusinessId) -> RemoteResult<()> {
        let path = format!("/business/delete/{}", id.as_str());
        self.delete(&path).await
    }

    async fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        self.get_json("/leads/all").await
    }

    async fn create_contact(&self, req: &CreateContactRequest) -> RemoteResult<Contact> {
        self.post_json("/leads/create", req).await
    }

    async fn update_contact(
        &self,
        id: &ContactId,
        req: &UpdateContactRequest,
    ) -> RemoteResult<Contact> {
        let path = format!("/leads/update/{}", id.as_str());
        self.put_json(&path, req).await
    }

    async fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        let path = format!("/leads/delete/{}", id.as_str());
        self.delete(&path).await
    }

    async fn list_users_by_role(&self, role: Role) -> RemoteResult<Vec<User>> {
        let path = format!("/users/all/{}", role.as_str());
        self.get_json(&path).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> RemoteResult<T> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(serde_json::from_str(&text)?)
    } else {
        Err(error_from_body(status, &text))
    }
}

/// Turn a non-2xx response into a [`RemoteError::Server`], preferring
/// the service's structured `{"message": ...}` payload over raw text.
fn error_from_body(status: StatusCode, text: &str) -> RemoteError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
        if !body.message.trim().is_empty() {
            return RemoteError::server(status.as_u16(), body.message);
        }
    }
    let message = if text.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.trim().to_string()
    };
    RemoteError::server(status.as_u16(), message)
}

fn build_auth_headers(auth: &CrmCredentials) -> RemoteResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &auth.api_key {
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(api_key).map_err(|e| RemoteError::Config(e.to_string()))?,
        );
    }
    if let Some(token) = &auth.bearer_token {
        let value = format!("Bearer {}", token);
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| RemoteError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}

// =============================================================================
// TESTS
// =============================================================================
