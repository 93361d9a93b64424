//! orgdrill CLI - hierarchy browser and server export tool

mod browse;
mod logging;
mod render;
mod server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use orgdrill::prelude::*;
use orgdrill::{XlsxReadOptions, DEFAULT_PATH_COLUMN};
use std::io;
use std::path::PathBuf;

use logging::LogLevel;
use server::{QueryArgs, ServerArgs};

#[derive(Parser)]
#[command(name = "orgdrill")]
#[command(
    author,
    version,
    about = "Drill-down browser for delimited org hierarchies, plus server export tools"
)]
struct Cli {
    /// Log level (RUST_LOG overrides)
    #[arg(short, long, global = true, value_enum, default_value_t = LogLevel::Error)]
    logging_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a hierarchy interactively
    Browse {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Print one view of a hierarchy without interaction
    Show {
        #[command(flatten)]
        table: TableArgs,

        /// Path to open, e.g. DIS/MMF (default: top level)
        #[arg(short, long)]
        path: Option<String>,

        /// Write the exact-match rows to a CSV or TSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Export every workbook on a site with its owner to CSV
    ExportOwners {
        #[command(flatten)]
        server: ServerArgs,

        /// Output CSV file
        #[arg(short, long, default_value = "list_workbooks.csv")]
        output: PathBuf,

        /// Workbooks requested per page (1-1000)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Run a metadata API query and save the JSON result
    Metadata {
        #[command(flatten)]
        server: ServerArgs,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Input file and how to read the hierarchy from it
#[derive(Args)]
struct TableArgs {
    /// Input file (xlsx, xlsm, csv, tsv)
    input: PathBuf,

    /// Column holding the delimited path
    #[arg(short, long, default_value = DEFAULT_PATH_COLUMN)]
    column: String,

    /// Separator between path segments
    #[arg(short, long, default_value_t = '/')]
    delimiter: char,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,
}

impl TableArgs {
    fn load(&self) -> Result<HierarchyTable> {
        let options = LoadOptions {
            hierarchy: HierarchyOptions {
                path_column: self.column.clone(),
                delimiter: self.delimiter,
            },
            xlsx: XlsxReadOptions {
                sheet: self.sheet.clone(),
            },
            ..Default::default()
        };

        let table = HierarchyTable::open(&self.input, &options)
            .with_context(|| format!("Failed to open '{}'", self.input.display()))?;
        tracing::info!("Loaded {} rows from {}", table.len(), self.input.display());
        Ok(table)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.logging_level);

    match cli.command {
        Commands::Browse { table } => browse_table(&table),
        Commands::Show {
            table,
            path,
            export,
        } => show(&table, path.as_deref(), export.as_deref()),
        Commands::ExportOwners {
            server,
            output,
            page_size,
        } => server::export_owners(&server, &output, page_size),
        Commands::Metadata { server, query } => server::metadata(&server, &query),
    }
}

fn browse_table(args: &TableArgs) -> Result<()> {
    let table = args.load()?;
    let nav = Navigator::new(&table);
    let mut path = ActivePath::new();

    browse::run(&nav, &mut path, io::stdin().lock(), io::stdout().lock())
        .context("Terminal I/O failed")
}

fn show(args: &TableArgs, path: Option<&str>, export: Option<&std::path::Path>) -> Result<()> {
    let table = args.load()?;
    let nav = Navigator::new(&table);

    let mut active = ActivePath::new();
    let separator = args.delimiter.to_string();
    let labels = path
        .map(|p| p.split(args.delimiter).filter(|s| !s.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();
    for (i, label) in labels.iter().enumerate() {
        let step = if i == 0 {
            nav.select_root(&mut active, label)
        } else {
            nav.select_child(&mut active, label)
        };
        step.with_context(|| format!("Cannot open '{}'", labels[..=i].join(separator.as_str())))?;
    }

    let view = nav.view(&active);
    print!("{}", render::render_view(&view, table.headers()));

    if let Some(out) = export {
        table
            .export_rows(&view.exact_rows, out)
            .with_context(|| format!("Failed to write '{}'", out.display()))?;
        eprintln!(
            "Wrote {} rows to '{}'",
            view.exact_rows.len(),
            out.display()
        );
    }

    Ok(())
}
