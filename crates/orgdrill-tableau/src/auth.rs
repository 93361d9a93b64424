//! Sign-in credentials and the session they produce

use std::fmt;

use serde::{Deserialize, Serialize};

/// How to authenticate at sign-in
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and password
    Password { username: String, password: String },
    /// Personal access token name and secret
    PersonalAccessToken { name: String, secret: String },
}

impl Credentials {
    /// The user or token name, safe to log
    pub fn identity(&self) -> &str {
        match self {
            Credentials::Password { username, .. } => username,
            Credentials::PersonalAccessToken { name, .. } => name,
        }
    }

    pub(crate) fn sign_in_request<'a>(&'a self, site_content_url: &'a str) -> SignInRequest<'a> {
        let site = SiteRef {
            content_url: site_content_url,
        };
        let credentials = match self {
            Credentials::Password { username, password } => SignInCredentials {
                name: Some(username.as_str()),
                password: Some(password.as_str()),
                personal_access_token_name: None,
                personal_access_token_secret: None,
                site,
            },
            Credentials::PersonalAccessToken { name, secret } => SignInCredentials {
                name: None,
                password: None,
                personal_access_token_name: Some(name.as_str()),
                personal_access_token_secret: Some(secret.as_str()),
                site,
            },
        };
        SignInRequest { credentials }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::PersonalAccessToken { name, .. } => f
                .debug_struct("PersonalAccessToken")
                .field("name", name)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    credentials: SignInCredentials<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInCredentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal_access_token_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal_access_token_secret: Option<&'a str>,
    site: SiteRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteRef<'a> {
    content_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub credentials: SignedInCredentials,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignedInCredentials {
    pub token: String,
    pub site: SignedInSite,
    pub user: SignedInUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignedInSite {
    pub id: String,
    #[serde(default)]
    pub content_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignedInUser {
    pub id: String,
}

/// An active server session
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Value sent in the auth header
    pub token: String,
    /// Site id used in REST resource paths
    pub site_id: String,
    /// Site content URL the session belongs to
    pub site_content_url: String,
    /// Id of the signed-in user
    pub user_id: String,
}

impl From<SignInResponse> for AuthSession {
    fn from(response: SignInResponse) -> Self {
        let c = response.credentials;
        Self {
            token: c.token,
            site_id: c.site.id,
            site_content_url: c.site.content_url,
            user_id: c.user.id,
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("site_id", &self.site_id)
            .field("site_content_url", &self.site_content_url)
            .field("user_id", &self.user_id)
            .finish()
    }
}
