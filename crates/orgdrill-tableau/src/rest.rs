//! Blocking REST client

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::auth::{AuthSession, Credentials, SignInResponse};
use crate::config::{validate_api_version, ServerConfig};
use crate::error::{Result, TableauError};
use crate::model::{
    ErrorResponse, Pagination, ServerInfo, ServerInfoResponse, User, UserResponse, Workbook,
    WorkbooksResponse,
};
use crate::{AUTH_HEADER, SERVER_INFO_API_VERSION};

const JSON: &str = "application/json";

/// A connection to one server, optionally signed in.
///
/// All calls are synchronous and issued one at a time.
pub struct RestClient {
    pub(crate) http: Client,
    pub(crate) config: ServerConfig,
    api_version: String,
    pub(crate) session: Option<AuthSession>,
}

impl RestClient {
    /// Build the HTTP client and settle the REST API version.
    ///
    /// Without a pinned version the server is asked for the newest one it supports.
    pub fn connect(config: ServerConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        let api_version = match &config.api_version {
            Some(version) => version.clone(),
            None => {
                let info = fetch_server_info(&http, &config)?;
                validate_api_version(&info.rest_api_version)?;
                tracing::info!(
                    "Server at {} supports REST API {}",
                    config.base_url,
                    info.rest_api_version
                );
                info.rest_api_version
            }
        };

        Ok(Self {
            http,
            config,
            api_version,
            session: None,
        })
    }

    /// REST API version used for every call
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Connection settings
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Active session, if signed in
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Ask the server for its product and REST API versions
    pub fn server_info(&self) -> Result<ServerInfo> {
        fetch_server_info(&self.http, &self.config)
    }

    /// Sign in to the configured site
    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<&AuthSession> {
        let url = format!("{}/auth/signin", self.api_base());
        let body = credentials.sign_in_request(&self.config.site_content_url);

        let response = send(
            self.http
                .post(&url)
                .header(ACCEPT, JSON)
                .header(CONTENT_TYPE, JSON)
                .json(&body),
        )?;
        let signed_in: SignInResponse = response.json()?;

        tracing::info!(
            "Logged in to the server {} as {}",
            self.config.base_url,
            credentials.identity()
        );
        Ok(&*self.session.insert(AuthSession::from(signed_in)))
    }

    /// Sign out and drop the session. Does nothing when not signed in.
    pub fn sign_out(&mut self) -> Result<()> {
        let token = match &self.session {
            Some(session) => session.token.clone(),
            None => {
                tracing::warn!("Sign out requested without an active session");
                return Ok(());
            }
        };

        let url = format!("{}/auth/signout", self.api_base());
        send(
            self.http
                .post(&url)
                .header(AUTH_HEADER, token)
                .header(ACCEPT, JSON)
                .header(CONTENT_TYPE, JSON),
        )?;

        self.session = None;
        tracing::info!("Logged out of the server {}", self.config.base_url);
        Ok(())
    }

    /// Fetch one page of the site's workbooks (1-based page number)
    pub fn workbooks_page(&self, page_number: u64) -> Result<(Vec<Workbook>, Pagination)> {
        let session = self.require_session()?;
        let url = format!("{}/sites/{}/workbooks", self.api_base(), session.site_id);

        let response = send(
            self.authed(self.http.get(&url), session).query(&[
                ("pageSize", self.config.page_size.to_string()),
                ("pageNumber", page_number.to_string()),
            ]),
        )?;
        let page: WorkbooksResponse = response.json()?;
        Ok((page.workbooks.workbook, page.pagination))
    }

    /// Fetch every workbook on the site, following pages until all are read
    pub fn all_workbooks(&self) -> Result<Vec<Workbook>> {
        let mut workbooks = Vec::new();
        let mut page_number = 1;

        loop {
            let (page, pagination) = self.workbooks_page(page_number)?;
            let fetched = page.len();
            workbooks.extend(page);
            tracing::debug!(
                "Workbook page {}: {} items ({} of {})",
                page_number,
                fetched,
                workbooks.len(),
                pagination.total_available
            );

            if fetched == 0 || workbooks.len() as u64 >= pagination.total_available {
                break;
            }
            page_number += 1;
        }

        Ok(workbooks)
    }

    /// Look up one user of the site
    pub fn user_by_id(&self, user_id: &str) -> Result<User> {
        let session = self.require_session()?;
        let url = format!(
            "{}/sites/{}/users/{}",
            self.api_base(),
            session.site_id,
            user_id
        );

        let response = send(self.authed(self.http.get(&url), session))?;
        let user: UserResponse = response.json()?;
        Ok(user.user)
    }

    pub(crate) fn require_session(&self) -> Result<&AuthSession> {
        self.session.as_ref().ok_or(TableauError::NotSignedIn)
    }

    pub(crate) fn authed(&self, request: RequestBuilder, session: &AuthSession) -> RequestBuilder {
        request
            .header(AUTH_HEADER, &session.token)
            .header(ACCEPT, JSON)
    }

    fn api_base(&self) -> String {
        self.config.api_url(&self.api_version)
    }
}

fn fetch_server_info(http: &Client, config: &ServerConfig) -> Result<ServerInfo> {
    let url = format!("{}/serverinfo", config.api_url(SERVER_INFO_API_VERSION));
    let response = send(http.get(&url).header(ACCEPT, JSON))?;
    let info: ServerInfoResponse = response.json()?;
    Ok(info.server_info)
}

/// Send a request and turn a non-success status into [`TableauError::Status`]
pub(crate) fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send()?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error.message(),
        Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("").to_string(),
        Err(_) => body,
    };

    tracing::debug!("Request to {} failed with {}", url, status);
    Err(TableauError::Status {
        status: status.as_u16(),
        url,
        message,
    })
}
