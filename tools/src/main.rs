//! sales-dashboard: interactive analytics over the generated dataset.
//!
//! Usage:
//!   sales-dashboard --data amazon_sales_data.csv --category Books --city Pune
//!   sales-dashboard --start 2023-03-01 --end 2023-03-31 --preview --rows 20 --export march.csv
//!   sales-dashboard --ipc-mode

mod cli;
mod render;

use anyhow::Result;
use sales_core::{
    dashboard::{DashboardViews, FilteredView, PREVIEW_ROWS},
    dataset::{Dataset, DatasetSource, DEFAULT_DATASET_PATH},
    error::SalesError,
    filter::{parse_date, FilterSpec, Selector},
    store,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

const MISSING_DATASET_MESSAGE: &str = "Please run sales-gen first to create the dataset!";

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetFilter {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        segment: Option<String>,
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        end: Option<String>,
    },
    ResetFilters,
    Reload,
    Preview {
        #[serde(default = "default_preview_rows")]
        limit: usize,
    },
    Export {
        path: String,
    },
    Quit,
}

fn default_preview_rows() -> usize {
    PREVIEW_ROWS
}

#[derive(serde::Serialize)]
struct SelectorOptions {
    categories: Vec<String>,
    cities: Vec<String>,
    segments: Vec<String>,
}

#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum UiState {
    Ready {
        dataset_rows: usize,
        filter: FilterSpec,
        options: SelectorOptions,
        views: DashboardViews,
    },
    Preview {
        rows: usize,
        csv: String,
    },
    Exported {
        path: String,
        rows: usize,
    },
    MissingDataset {
        message: String,
    },
}

/// One dashboard session: the dataset handle plus the current filter.
struct Session {
    source: DatasetSource,
    filter: Option<FilterSpec>,
}

impl Session {
    fn new(path: &str) -> Self {
        Self {
            source: DatasetSource::new(path),
            filter: None,
        }
    }

    /// The dataset, or `None` when the file does not exist yet.
    fn dataset(&mut self) -> Result<Option<Arc<Dataset>>> {
        match self.source.get() {
            Ok(dataset) => Ok(Some(dataset)),
            Err(SalesError::MissingDataset { .. }) => {
                log::warn!("dataset missing at {}", self.source.path().display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn current_filter(&mut self, dataset: &Dataset) -> FilterSpec {
        self.filter
            .get_or_insert_with(|| FilterSpec::for_dataset(dataset))
            .clone()
    }

    fn state(&mut self) -> Result<UiState> {
        let Some(dataset) = self.dataset()? else {
            return Ok(missing_dataset());
        };
        let filter = self.current_filter(&dataset);
        let view = FilteredView::build(&dataset, filter);
        Ok(UiState::Ready {
            dataset_rows: dataset.len(),
            filter: view.filter,
            options: SelectorOptions {
                categories: owned(dataset.categories()),
                cities: owned(dataset.cities()),
                segments: owned(dataset.segments()),
            },
            views: view.views,
        })
    }

    fn handle(&mut self, command: IpcCommand) -> Result<UiState> {
        match command {
            IpcCommand::GetState | IpcCommand::Quit => {}
            IpcCommand::SetFilter {
                category,
                city,
                segment,
                start,
                end,
            } => {
                let Some(dataset) = self.dataset()? else {
                    return Ok(missing_dataset());
                };
                // Parse everything before touching the current filter so a
                // bad date leaves it unchanged.
                let start = start.as_deref().map(parse_date).transpose()?;
                let end = end.as_deref().map(parse_date).transpose()?;
                let mut filter = self.current_filter(&dataset);
                if let Some(c) = category {
                    filter.category = Selector::from(c);
                }
                if let Some(c) = city {
                    filter.city = Selector::from(c);
                }
                if let Some(s) = segment {
                    filter.segment = Selector::from(s);
                }
                filter.start = start.unwrap_or(filter.start);
                filter.end = end.unwrap_or(filter.end);
                self.filter = Some(filter);
            }
            IpcCommand::ResetFilters => self.filter = None,
            IpcCommand::Reload => {
                self.filter = None;
                match self.source.reload() {
                    Ok(_) | Err(SalesError::MissingDataset { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            IpcCommand::Preview { limit } => {
                let Some(dataset) = self.dataset()? else {
                    return Ok(missing_dataset());
                };
                let view = FilteredView::build(&dataset, self.current_filter(&dataset));
                let rows = view.preview(limit);
                return Ok(UiState::Preview {
                    rows: rows.len(),
                    csv: store::records_to_csv_string(rows.iter().copied())?,
                });
            }
            IpcCommand::Export { path } => {
                let Some(dataset) = self.dataset()? else {
                    return Ok(missing_dataset());
                };
                let view = FilteredView::build(&dataset, self.current_filter(&dataset));
                let rows = store::write_records_to_path(Path::new(&path), view.rows.iter().copied())?;
                log::info!("exported {rows} filtered rows to {path}");
                return Ok(UiState::Exported { path, rows });
            }
        }
        self.state()
    }
}

fn missing_dataset() -> UiState {
    UiState::MissingDataset {
        message: MISSING_DATASET_MESSAGE.to_string(),
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = cli::flag_value(&args, "--data").unwrap_or(DEFAULT_DATASET_PATH);
    let ipc_mode = cli::has_flag(&args, "--ipc-mode");

    let mut session = Session::new(data);
    if ipc_mode {
        run_ipc_loop(&mut session, io::stdin().lock(), &mut io::stdout())
    } else {
        run_report(&mut session, &args)
    }
}

fn run_report(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(dataset) = session.dataset()? else {
        println!("{MISSING_DATASET_MESSAGE}");
        return Ok(());
    };

    let mut filter = FilterSpec::for_dataset(&dataset);
    if let Some(c) = cli::flag_value(args, "--category") {
        filter.category = Selector::from(c);
    }
    if let Some(c) = cli::flag_value(args, "--city") {
        filter.city = Selector::from(c);
    }
    if let Some(s) = cli::flag_value(args, "--segment") {
        filter.segment = Selector::from(s);
    }
    if let Some(d) = cli::flag_value(args, "--start") {
        filter.start = parse_date(d)?;
    }
    if let Some(d) = cli::flag_value(args, "--end") {
        filter.end = parse_date(d)?;
    }

    let view = FilteredView::build(&dataset, filter);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::report(&mut out, &dataset, &view)?;

    if cli::has_flag(args, "--preview") {
        writeln!(out)?;
        let limit = cli::parse_arg(args, "--rows", PREVIEW_ROWS);
        render::preview(&mut out, view.preview(limit))?;
    }
    if let Some(path) = cli::flag_value(args, "--export") {
        let rows = store::write_records_to_path(Path::new(path), view.rows.iter().copied())?;
        writeln!(out, "Exported {rows} filtered rows to {path}")?;
    }
    Ok(())
}

/// One JSON command per input line, one JSON response per output line.
fn run_ipc_loop(session: &mut Session, mut input: impl BufRead, stdout: &mut impl Write) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let command: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };
        let quit = matches!(command, IpcCommand::Quit);

        match session.handle(command) {
            Ok(state) => writeln!(stdout, "{}", serde_json::to_string(&state)?)?,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
            }
        }
        stdout.flush()?;

        if quit {
            break;
        }
    }
    Ok(())
}
