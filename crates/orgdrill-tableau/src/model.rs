//! REST response payloads

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// The server reports most numbers as JSON strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    NumberOrString::deserialize(deserializer)?.into_u64()
}

fn lenient_opt_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_u64)
        .transpose()
}

/// Result of `GET /api/{version}/serverinfo`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub rest_api_version: String,
    #[serde(default)]
    pub product_version: Option<ProductVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductVersion {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerInfoResponse {
    pub server_info: ServerInfo,
}

/// Paging information attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(deserialize_with = "lenient_u64")]
    pub page_number: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub page_size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_available: u64,
}

/// Reference to another resource by id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One workbook as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub id: String,
    pub name: String,
    /// Size in megabytes, as reported by the server
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<ResourceRef>,
    #[serde(default)]
    pub project: Option<ResourceRef>,
}

impl Workbook {
    /// Owner id, if the server reported one
    pub fn owner_id(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.id.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkbooksResponse {
    pub pagination: Pagination,
    #[serde(default)]
    pub workbooks: WorkbookList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkbookList {
    #[serde(default)]
    pub workbook: Vec<Workbook>,
}

/// A site user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub site_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub user: User,
}

/// Error body returned with failing statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDetail {
    pub(crate) fn message(&self) -> String {
        let parts: Vec<&str> = [&self.summary, &self.detail, &self.code]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        parts.join(" - ")
    }
}
