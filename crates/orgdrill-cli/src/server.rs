//! Server-backed commands: workbook owner export and metadata queries

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use orgdrill_tableau::metadata::save_json;
use orgdrill_tableau::owners::{collect_workbook_owners, format_owner_table, write_owners_csv_file};
use orgdrill_tableau::{Credentials, MetadataQuery, RestClient, ServerConfig};

/// Exactly one way to sign in
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct LoginArgs {
    /// Sign in with this username; the password is read from TABLEAU_PASSWORD or prompted
    #[arg(short, long)]
    pub username: Option<String>,

    /// Sign in with this personal access token; the secret is read from TABLEAU_PAT_SECRET or prompted
    #[arg(short = 'n', long)]
    pub token_name: Option<String>,
}

/// Where the server is and how to sign in
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Server URL, e.g. https://tableau.example.com (a bare host gets https://)
    #[arg(short = 's', long, visible_alias = "server")]
    pub site_url: String,

    /// Site content URL; empty for the default site
    #[arg(short = 'i', long, visible_alias = "site", default_value = "")]
    pub site_id: String,

    /// REST API version, e.g. 3.23 (default: ask the server)
    #[arg(long)]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(flatten)]
    pub login: LoginArgs,

    #[arg(long, env = "TABLEAU_PASSWORD", hide_env_values = true, hide = true)]
    pub password: Option<String>,

    #[arg(long, env = "TABLEAU_PAT_SECRET", hide_env_values = true, hide = true)]
    pub token_secret: Option<String>,
}

impl ServerArgs {
    fn config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::new(&self.site_url)?
            .with_site(&self.site_id)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(version) = &self.api_version {
            config = config.with_api_version(version)?;
        }
        Ok(config)
    }

    fn credentials(&self) -> Result<Credentials> {
        match (&self.login.username, &self.login.token_name) {
            (Some(username), None) => Ok(Credentials::Password {
                username: username.clone(),
                password: secret(&self.password, "Input your password: ")?,
            }),
            (None, Some(name)) => Ok(Credentials::PersonalAccessToken {
                name: name.clone(),
                secret: secret(&self.token_secret, "Input your Personal Access Token: ")?,
            }),
            _ => bail!("pass exactly one of --username or --token-name"),
        }
    }

    /// Connect with `config` and sign in
    fn sign_in(&self, config: ServerConfig) -> Result<RestClient> {
        let mut client = RestClient::connect(config)
            .with_context(|| format!("Failed to reach '{}'", self.site_url))?;
        let credentials = self.credentials()?;
        client
            .sign_in(&credentials)
            .with_context(|| format!("Failed to sign in as '{}'", credentials.identity()))?;
        Ok(client)
    }
}

fn secret(from_env: &Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = from_env {
        return Ok(value.clone());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let value = rpassword::prompt_password(prompt).context("Failed to read secret")?;
        return non_empty(value);
    }

    eprint!("{}", prompt);
    io::stderr().flush()?;
    read_secret_line(stdin.lock())
}

/// Read a secret piped on stdin, one line
fn read_secret_line<R: BufRead>(mut input: R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read secret from stdin")?;
    non_empty(line.trim_end_matches(['\r', '\n']).to_string())
}

fn non_empty(value: String) -> Result<String> {
    if value.is_empty() {
        bail!("no secret given");
    }
    Ok(value)
}

/// List every workbook with its owner, print the table, and save it as CSV
pub fn export_owners(args: &ServerArgs, output: &Path, page_size: Option<u32>) -> Result<()> {
    println!("Site ID is {}", args.site_id);
    println!("Site URL is {}", args.site_url);

    let mut config = args.config().context("Invalid server settings")?;
    if let Some(size) = page_size {
        config = config.with_page_size(size)?;
    }
    let mut client = args.sign_in(config)?;

    let result = collect_workbook_owners(&client).context("Failed to list workbook owners");
    let sign_out = client.sign_out();
    let records = result?;

    print!("{}", format_owner_table(&records));
    write_owners_csv_file(&records, output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("CSV file was saved to {}", output.display());

    sign_out.context("Failed to sign out")?;
    println!("Logged out of the server {}", args.site_url);
    Ok(())
}

/// Which metadata query to run
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Built-in query: databases, database, datasources, workbooks, workbook-fields, custom-sql
    #[arg(required_unless_present = "query_file")]
    pub query: Option<String>,

    /// Database or workbook name for `database` and `workbook-fields`
    pub name: Option<String>,

    /// Read the GraphQL query from a file instead
    #[arg(long, conflicts_with = "query")]
    pub query_file: Option<PathBuf>,

    /// Output file stem; `.json` is appended
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run one metadata query and save the result to `{output}.json`
pub fn metadata(args: &ServerArgs, query_args: &QueryArgs) -> Result<()> {
    let query = match (&query_args.query_file, &query_args.query) {
        (Some(file), _) => MetadataQuery::from_file(file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?,
        (None, Some(name)) => MetadataQuery::from_name(name, query_args.name.as_deref())?,
        (None, None) => bail!("pass a query name or --query-file"),
    };
    let stem = query_args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(query.default_output()));

    let config = args.config().context("Invalid server settings")?;
    let mut client = args.sign_in(config)?;
    let result = client
        .query_metadata(&query.text())
        .context("Metadata query failed");
    let sign_out = client.sign_out();
    let value = result?;

    let path = save_json(&value, &stem)
        .with_context(|| format!("Failed to save '{}.json'", stem.display()))?;
    println!("Query result saved to: {}", path.display());

    sign_out.context("Failed to sign out")?;
    Ok(())
}
