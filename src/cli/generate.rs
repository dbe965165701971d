use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::archive;
use crate::config::Config;
use crate::docx::DocxTemplate;
use crate::gate;
use crate::llm::factory;
use crate::llm::models::{ModelFinder, DEFAULT_MODEL};
use crate::pipeline::generator::PlanGenerator;
use crate::selection::{Mode, SearchSelection, SelectionEntry, TeamSelection};
use crate::session::Session;
use crate::sheets::SheetsClient;
use crate::table::{Table, AGENT_COLUMN};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    sheet_url: String,
    date: Option<String>,
    lookback_override: Option<usize>,
    mode: String,
    agents: Vec<String>,
    all: bool,
    output_override: Option<String>,
    config_path: Option<String>,
    model_override: Option<String>,
    password: Option<String>,
    dry_run: bool,
) -> Result<()> {
    // Load config (explicit path, working directory, or user config dir)
    let config = Config::load_with_path(config_path)?;

    // The gate runs before any other component.
    gate::check_access(config.access_secret().as_deref(), password.as_deref())?;

    let roster = config.roster();
    if roster.is_empty() {
        bail!("team roster is not configured");
    }

    // Apply CLI overrides
    let mut lookback = config.generation.lookback;
    if let Some(n) = lookback_override {
        info!("CLI override: lookback = {}", n);
        lookback = n;
    }
    let mut output_dir = config.generation.output_dir.clone();
    if let Some(ref dir) = output_override {
        info!("CLI override: output = {}", dir);
        output_dir = dir.clone();
    }

    let mode = Mode::from_str(&mode)?;
    let default_date = match date {
        Some(ref s) => s
            .parse()
            .with_context(|| format!("invalid --date {:?} (expected YYYY-MM-DD)", s))?,
        None => Local::now().date_naive(),
    };
    info!("Global coaching date: {}", default_date);

    // Spreadsheet load; any failure here skips the whole pipeline.
    let timeout = config.generation.timeout_secs;
    let sheets = match &config.sheets.base_url {
        Some(base_url) => {
            SheetsClient::with_base_url(config.sheets_token()?, base_url.clone(), timeout)?
        }
        None => SheetsClient::new(config.sheets_token()?, timeout)?,
    };
    let table = sheets
        .fetch_table(&sheet_url)
        .await
        .context("Error loading sheet")?;
    if !table.has_column(AGENT_COLUMN) {
        bail!("sheet is missing required column {:?}", AGENT_COLUMN);
    }
    info!("Loaded sheet: {} data row(s)", table.row_count());

    // Resolve the active model once per process.
    let model = match model_override.or_else(|| config.llm.model.clone()) {
        Some(model) => {
            info!("Using configured model: {}", model);
            model
        }
        None if dry_run => DEFAULT_MODEL.to_string(),
        None => {
            let finder = match &config.llm.base_url {
                Some(base_url) => {
                    ModelFinder::with_base_url(config.llm_api_key()?, base_url.clone(), timeout)?
                }
                None => ModelFinder::new(config.llm_api_key()?, timeout)?,
            };
            finder.resolve().await.to_string()
        }
    };
    info!("Connected to model: {}", model);
    let client = factory::create_client(&config, &model, dry_run)?;

    let selections = build_selections(&roster, &table, mode, &agents, all, default_date)?;
    if selections.is_empty() {
        bail!("no agents selected");
    }
    info!("Selected {} agent(s)", selections.len());

    // Generation pipeline
    let template = DocxTemplate::from_path(&config.generation.template_path)?;
    let generator = PlanGenerator::new(client, template).with_lookback(lookback);
    let mut session = Session::new();
    generator
        .generate_batch(&table, &selections, &mut session)
        .await?;

    // Packaging: the combined archive plus every document individually,
    // only once the batch is marked complete.
    if session.batch_complete() {
        let out_dir = Path::new(&output_dir);
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;
        for file in session.files() {
            fs::write(out_dir.join(&file.name), &file.data)
                .with_context(|| format!("Failed to write {}", file.name))?;
        }
        let bundle = archive::bundle(session.files())?;
        let archive_path = out_dir.join(archive::archive_name(default_date));
        fs::write(&archive_path, bundle)
            .with_context(|| format!("Failed to write {}", archive_path.display()))?;

        info!(
            "All done: {} document(s) and {}",
            session.files().len(),
            archive_path.display()
        );
    }
    Ok(())
}

fn build_selections(
    roster: &[String],
    table: &Table,
    mode: Mode,
    agents: &[String],
    all: bool,
    default_date: NaiveDate,
) -> Result<Vec<SelectionEntry>> {
    let specs: Vec<(String, Option<NaiveDate>)> = agents
        .iter()
        .map(|spec| parse_agent_spec(spec))
        .collect::<Result<_>>()?;

    let entries = match mode {
        Mode::Team => {
            let mut selection = TeamSelection::new(roster, table, default_date);
            if all {
                selection.select_all(true);
            }
            for (agent, date) in &specs {
                if !selection.set_checked(agent, true) {
                    warn!("{} is not on the roster or not in the sheet; skipping", agent);
                    continue;
                }
                if let Some(d) = date {
                    selection.set_date(agent, *d);
                }
            }
            selection.entries()
        }
        Mode::Search => {
            if all {
                warn!("--all only applies to team mode; ignoring");
            }
            let mut selection = SearchSelection::new(table, default_date);
            for (agent, date) in &specs {
                if !selection.select(agent) {
                    warn!("{} is not in the sheet; skipping", agent);
                    continue;
                }
                if let Some(d) = date {
                    selection.set_date(agent, *d);
                }
            }
            selection.entries()
        }
    };
    Ok(entries)
}

/// `"Last, First"` or `"Last, First=YYYY-MM-DD"`. Agent names contain
/// commas, so the date separator is `=`.
fn parse_agent_spec(spec: &str) -> Result<(String, Option<NaiveDate>)> {
    match spec.split_once('=') {
        Some((name, date)) => {
            let date = date
                .trim()
                .parse()
                .with_context(|| format!("invalid date in agent spec {:?}", spec))?;
            Ok((name.trim().to_string(), Some(date)))
        }
        None => Ok((spec.trim().to_string(), None)),
    }
}
