//! GraphQL queries against the metadata API

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

use crate::error::{Result, TableauError};
use crate::rest::{send, RestClient};

/// Names accepted by [`MetadataQuery::from_name`]
pub const QUERY_NAMES: [&str; 6] = [
    "databases",
    "database",
    "datasources",
    "workbooks",
    "workbook-fields",
    "custom-sql",
];

/// A metadata query, either built in or supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataQuery {
    /// Every database with its tables
    Databases,
    /// Tables and columns of one database
    Database { name: String },
    /// Published data sources with extract info and owner
    Datasources,
    /// Workbooks with sheets, embedded and upstream data sources
    Workbooks,
    /// Fields of one workbook and the calculations referencing them
    WorkbookFields { name: String },
    /// Custom SQL tables
    CustomSql,
    /// Raw GraphQL text
    Custom(String),
}

impl MetadataQuery {
    /// Look up a built-in query by name.
    ///
    /// `database` and `workbook-fields` need `argument`; the rest ignore it.
    pub fn from_name(name: &str, argument: Option<&str>) -> Result<Self> {
        let required = |what: &str| {
            argument.map(str::to_string).ok_or_else(|| {
                TableauError::InvalidConfig(format!("query '{}' needs a {} name", name, what))
            })
        };

        match name {
            "databases" => Ok(Self::Databases),
            "database" => Ok(Self::Database {
                name: required("database")?,
            }),
            "datasources" => Ok(Self::Datasources),
            "workbooks" => Ok(Self::Workbooks),
            "workbook-fields" => Ok(Self::WorkbookFields {
                name: required("workbook")?,
            }),
            "custom-sql" => Ok(Self::CustomSql),
            other => Err(TableauError::InvalidConfig(format!(
                "unknown query '{}', expected one of: {}",
                other,
                QUERY_NAMES.join(", ")
            ))),
        }
    }

    /// Read raw GraphQL from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::Custom(std::fs::read_to_string(path)?))
    }

    /// File stem used when no output name is given
    pub fn default_output(&self) -> &'static str {
        match self {
            Self::Databases => "all_databases",
            Self::Database { .. } => "specific_database",
            Self::Datasources => "all_datasources",
            Self::Workbooks => "workbook_details",
            Self::WorkbookFields { .. } => "workbook_fields",
            Self::CustomSql => "custom_sql",
            Self::Custom(_) => "query_result",
        }
    }

    /// The GraphQL document to send
    pub fn text(&self) -> String {
        match self {
            Self::Databases => DATABASES.to_string(),
            Self::Database { name } => DATABASE.replace("$NAME", &graphql_string(name)),
            Self::Datasources => DATASOURCES.to_string(),
            Self::Workbooks => WORKBOOKS.to_string(),
            Self::WorkbookFields { name } => {
                WORKBOOK_FIELDS.replace("$NAME", &graphql_string(name))
            }
            Self::CustomSql => CUSTOM_SQL.to_string(),
            Self::Custom(text) => text.clone(),
        }
    }
}

const DATABASES: &str = r#"query getDatabases {
  databases {
    name
    id
    connectionType
    tables {
      name
      id
    }
  }
}"#;

const DATABASE: &str = r#"query getSpecificDatabase {
  databases(filter: {name: $NAME}) {
    name
    tables {
      name
      columns {
        name
        remoteType
      }
    }
  }
}"#;

const DATASOURCES: &str = r#"query getDataSources {
  publishedDatasources {
    name
    id
    hasExtracts
    extractLastRefreshTime
    owner {
      name
    }
  }
}"#;

const WORKBOOKS: &str = r#"query getWorkbookDetails {
  workbooks {
    name
    sheets {
      name
    }
    embeddedDatasources {
      name
      upstreamTables {
        name
        database {
          name
        }
      }
    }
    upstreamDatasources {
      name
      upstreamTables {
        name
        database {
          name
        }
      }
    }
  }
}"#;

const WORKBOOK_FIELDS: &str = r#"query workbookFields {
  workbooks(filter: {name: $NAME}) {
    name
    owner {
      id
      username
    }
    embeddedDatasources {
      name
      fields {
        name
        referencedByCalculations {
          name
          dataType
          formula
        }
      }
    }
    upstreamDatasources {
      name
      fields {
        name
        referencedByCalculations {
          name
          dataType
          formula
        }
      }
    }
  }
}"#;

const CUSTOM_SQL: &str = r#"query customSql {
  customSQLTables {
    name
    isCertified
    query
  }
}"#;

/// Quote a value as a GraphQL string literal
pub fn graphql_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl RestClient {
    /// Run a GraphQL query and return the whole response document.
    ///
    /// Entries under `errors` are logged; the document is still returned.
    pub fn query_metadata(&self, query: &str) -> Result<Value> {
        let session = self.require_session()?;
        let url = self.config.metadata_url();

        let response = send(
            self.authed(self.http.post(&url), session)
                .header(CONTENT_TYPE, "application/json")
                .json(&json!({ "query": query })),
        )?;
        let result: Value = response.json()?;

        if let Some(errors) = result.get("errors").and_then(Value::as_array) {
            for error in errors {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                tracing::warn!("Metadata query reported an error: {}", message);
            }
        }

        Ok(result)
    }
}

/// Write `value` pretty-printed to `{stem}.json` and return the path
pub fn save_json<P: AsRef<Path>>(value: &Value, stem: P) -> Result<PathBuf> {
    let mut path = stem.as_ref().as_os_str().to_owned();
    path.push(".json");
    let path = PathBuf::from(path);

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Query result saved to {}", path.display());
    Ok(path)
}
