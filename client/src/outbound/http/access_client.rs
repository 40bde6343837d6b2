//! Reqwest-backed adapter for `/access` login and registration.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::dto::LoginResponseDto;
use super::transport::HttpTransport;
use crate::domain::ports::{AccessGateway, LoginGrant, ResourceError};
use crate::domain::{LoginCredentials, RegistrationRequest, Role};

const LOGIN_PATH: &str = "access/login";

/// Access endpoints reached over HTTP.
///
/// Build the transport with the login deadline; it applies to both login and
/// registration.
#[derive(Debug, Clone)]
pub struct HttpAccessClient {
    transport: HttpTransport,
}

impl HttpAccessClient {
    /// Wrap a transport configured with the login deadline.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AccessGateway for HttpAccessClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, ResourceError> {
        let body = json!({
            "email": credentials.email(),
            "password": credentials.password(),
        });
        let response: LoginResponseDto = self
            .transport
            .send_json(Method::POST, LOGIN_PATH, Some(&body))
            .await?;
        Ok(LoginGrant {
            role: Role::parse(&response.role),
        })
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<(), ResourceError> {
        let path = format!("access/registration/{}", request.role);
        self.transport
            .send(Method::POST, &path, Some(&request.body))
            .await
            .map(drop)
    }
}
