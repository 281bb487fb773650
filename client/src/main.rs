//! Demo shell: drives the trip-planning client from a line-based prompt.
//!
//! Every surface is a plain console printer, so the shell doubles as a
//! living demonstration of the presenter wiring: mutate through one command
//! and watch every affected surface reprint itself.

#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use mockable::DefaultClock;
use reqwest::Url;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use client::domain::ports::{Navigator, ScheduleGateway, View, ViewError};
use client::domain::{
    BriefPresenter, BriefViewState, DestinationId, EditorPresenter, EditorViewState, FilterKind,
    FilterPresenter, FilterViewState, ListPresenter, ListViewState, PointDraft, PointId,
    PointKind, SortKey, SortPresenter, SortViewState, TripModel, UrlParamsStore,
};
use client::outbound::{HttpScheduleGateway, MemoryNavigator};

const USAGE: &str = "commands: filter <kind> | sort <key> | favorite <id> | delete <id> | \
                     add <kind> <destination-id> | back | forward | refresh | quit";

/// `trip-client` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trip-client",
    about = "Interactive trip-planning client over a schedule service or a generated catalogue",
    version
)]
struct CliArgs {
    /// Schedule service endpoint; omitted runs on a generated catalogue.
    #[arg(long, value_name = "url")]
    endpoint: Option<Url>,
    /// Authorization header value sent to the schedule service.
    #[arg(long, value_name = "value", default_value = "")]
    authorization: String,
    /// Request timeout in seconds for the schedule service.
    #[arg(long, value_name = "seconds", default_value_t = 30)]
    timeout_seconds: u64,
    /// Seed for the generated catalogue when no endpoint is given.
    #[arg(long, value_name = "seed", default_value_t = 42)]
    seed: u64,
    /// Number of generated points when no endpoint is given.
    #[arg(long, value_name = "count", default_value_t = 20)]
    points: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let shell = Shell::assemble(&args)?;

    info!("loading trip data");
    shell.model.load().await?;

    run(&shell).await
}

struct Shell {
    model: Arc<TripModel>,
    url_params: Arc<UrlParamsStore>,
    navigator: Arc<MemoryNavigator>,
    brief: BriefPresenter,
    filter: FilterPresenter,
    sort: SortPresenter,
    list: ListPresenter,
    editor: EditorPresenter,
}

impl Shell {
    /// Wire the model, stores, and every presenter over console surfaces.
    ///
    /// Presenters mount before the initial load, exactly as the browser app
    /// mounts its components before kicking the model off; each surface
    /// first prints its empty state and reprints itself once data lands.
    fn assemble(args: &CliArgs) -> Result<Self> {
        let gateway = build_gateway(args)?;
        let navigator = Arc::new(MemoryNavigator::new());
        let model = Arc::new(TripModel::new(gateway, Arc::new(DefaultClock)));
        let url_params = Arc::new(UrlParamsStore::new(
            Arc::clone(&navigator) as Arc<dyn Navigator>
        ));

        let brief = BriefPresenter::mount(
            Arc::clone(&model),
            Arc::clone(&url_params),
            Arc::new(ConsoleBrief),
        )?;
        let filter = FilterPresenter::mount(
            Arc::clone(&model),
            Arc::clone(&url_params),
            Arc::new(ConsoleFilter),
        )?;
        let sort = SortPresenter::mount(
            Arc::clone(&model),
            Arc::clone(&url_params),
            Arc::new(ConsoleSort),
        )?;
        let list = ListPresenter::mount(
            Arc::clone(&model),
            Arc::clone(&url_params),
            Arc::new(ConsoleList),
        )?;
        let editor = EditorPresenter::mount(
            Arc::clone(&model),
            Arc::clone(&url_params),
            Arc::new(ConsoleEditor),
        )?;

        Ok(Self {
            model,
            url_params,
            navigator,
            brief,
            filter,
            sort,
            list,
            editor,
        })
    }

    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Filter(kind) => self.filter.select_filter(kind)?,
            Command::Sort(key) => self.sort.select_sort(key)?,
            Command::Favorite(id) => self.list.toggle_favorite(&id).await?,
            Command::Delete(id) => self.list.request_delete(&id).await?,
            Command::Add { kind, destination } => {
                let start = Utc::now();
                let draft = PointDraft {
                    kind,
                    destination_id: destination,
                    start_date_time: start,
                    end_date_time: start + TimeDelta::hours(1),
                    base_price: 100,
                    offer_ids: Vec::new(),
                    is_favorite: false,
                };
                self.editor.submit_new(draft).await?;
            }
            Command::Back => {
                if self.navigator.back().map_err(client::domain::Error::from)? {
                    self.url_params.sync_external()?;
                } else {
                    eprintln!("already at the oldest history entry");
                }
            }
            Command::Forward => {
                if self
                    .navigator
                    .forward()
                    .map_err(client::domain::Error::from)?
                {
                    self.url_params.sync_external()?;
                } else {
                    eprintln!("already at the newest history entry");
                }
            }
            Command::Refresh => {
                self.brief.refresh()?;
                self.filter.refresh()?;
                self.sort.refresh()?;
                self.list.refresh()?;
                self.editor.refresh()?;
            }
            Command::Quit => {}
        }
        Ok(())
    }
}

async fn run(shell: &Shell) -> Result<()> {
    println!("{USAGE}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_command(trimmed) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(error) = shell.dispatch(command).await {
                    eprintln!("error: {error}");
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }
    Ok(())
}

fn build_gateway(args: &CliArgs) -> Result<Arc<dyn ScheduleGateway>> {
    if let Some(endpoint) = args.endpoint.clone() {
        let gateway = HttpScheduleGateway::new(
            endpoint,
            args.authorization.clone(),
            Duration::from_secs(args.timeout_seconds),
        )?;
        return Ok(Arc::new(gateway));
    }
    offline_gateway(args)
}

#[cfg(feature = "example-data")]
fn offline_gateway(args: &CliArgs) -> Result<Arc<dyn ScheduleGateway>> {
    use client::outbound::MemoryScheduleGateway;

    let catalogue = example_data::generate_trip_catalogue(args.seed, Utc::now(), args.points);
    let gateway = MemoryScheduleGateway::from_catalogue(&catalogue)
        .map_err(|error| eyre!("generated catalogue rejected: {error}"))?;
    info!(
        seed = args.seed,
        points = args.points,
        "serving generated catalogue"
    );
    Ok(Arc::new(gateway))
}

#[cfg(not(feature = "example-data"))]
fn offline_gateway(_args: &CliArgs) -> Result<Arc<dyn ScheduleGateway>> {
    Err(eyre!(
        "no endpoint given and the example-data feature is disabled; pass --endpoint"
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Filter(FilterKind),
    Sort(SortKey),
    Favorite(PointId),
    Delete(PointId),
    Add {
        kind: PointKind,
        destination: DestinationId,
    },
    Back,
    Forward,
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let command = match head {
        "filter" => {
            let value = words.next().ok_or_else(|| usage_for("filter <kind>"))?;
            Command::Filter(
                FilterKind::from_param(value)
                    .ok_or_else(|| format!("unknown filter '{value}'"))?,
            )
        }
        "sort" => {
            let value = words.next().ok_or_else(|| usage_for("sort <key>"))?;
            Command::Sort(
                SortKey::from_param(value).ok_or_else(|| format!("unknown sort key '{value}'"))?,
            )
        }
        "favorite" => {
            let id = words.next().ok_or_else(|| usage_for("favorite <id>"))?;
            Command::Favorite(PointId::new(id))
        }
        "delete" => {
            let id = words.next().ok_or_else(|| usage_for("delete <id>"))?;
            Command::Delete(PointId::new(id))
        }
        "add" => {
            let kind = words.next().ok_or_else(|| usage_for("add <kind> <destination-id>"))?;
            let destination = words
                .next()
                .ok_or_else(|| usage_for("add <kind> <destination-id>"))?;
            Command::Add {
                kind: PointKind::from_wire(kind)
                    .ok_or_else(|| format!("unknown point kind '{kind}'"))?,
                destination: DestinationId::new(destination),
            }
        }
        "back" => Command::Back,
        "forward" => Command::Forward,
        "refresh" => Command::Refresh,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'; {USAGE}")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected trailing argument '{extra}'"));
    }
    Ok(command)
}

fn usage_for(form: &str) -> String {
    format!("usage: {form}")
}

struct ConsoleBrief;

impl View<BriefViewState> for ConsoleBrief {
    fn update(&self, state: &BriefViewState) -> Result<(), ViewError> {
        println!(
            "[brief] {} | {} | total {}",
            state.route, state.dates, state.total_cost
        );
        Ok(())
    }
}

struct ConsoleFilter;

impl View<FilterViewState> for ConsoleFilter {
    fn update(&self, state: &FilterViewState) -> Result<(), ViewError> {
        let rendered: Vec<String> = state
            .options
            .iter()
            .map(|option| {
                let mut label = option.value.to_string();
                if option.is_selected {
                    label.push('*');
                }
                if option.is_disabled {
                    label.push('!');
                }
                label
            })
            .collect();
        println!("[filter] {}", rendered.join(" "));
        Ok(())
    }
}

struct ConsoleSort;

impl View<SortViewState> for ConsoleSort {
    fn update(&self, state: &SortViewState) -> Result<(), ViewError> {
        let rendered: Vec<String> = state
            .options
            .iter()
            .map(|option| {
                let mut label = option.value.to_string();
                if option.is_selected {
                    label.push('*');
                }
                if option.is_disabled {
                    label.push('!');
                }
                label
            })
            .collect();
        println!("[sort] {}", rendered.join(" "));
        Ok(())
    }
}

struct ConsoleList;

impl View<ListViewState> for ConsoleList {
    fn update(&self, state: &ListViewState) -> Result<(), ViewError> {
        println!(
            "[list] {} point(s){}",
            state.items.len(),
            if state.is_busy { " (busy)" } else { "" }
        );
        for item in &state.items {
            let favourite = if item.is_favorite { " *" } else { "" };
            println!(
                "  {} {} {} {} ({}) {}{}",
                item.id,
                item.kind,
                item.destination,
                item.start_date_time.format("%Y-%m-%d %H:%M"),
                item.duration,
                item.base_price,
                favourite
            );
            for offer in &item.offers {
                println!("    + {} ({})", offer.title, offer.price);
            }
        }
        Ok(())
    }
}

struct ConsoleEditor;

impl View<EditorViewState> for ConsoleEditor {
    fn update(&self, state: &EditorViewState) -> Result<(), ViewError> {
        println!(
            "[editor] {} kinds, {} destinations, {} offer groups{}",
            state.kinds.len(),
            state.destinations.len(),
            state.offer_groups.len(),
            if state.is_busy { " (busy)" } else { "" }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for command parsing.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn filter_commands_parse_their_kind() {
        let command = parse_command("filter future").expect("command should parse");
        assert_eq!(command, Command::Filter(FilterKind::Future));
    }

    #[rstest]
    fn sort_commands_parse_their_key() {
        let command = parse_command("sort price").expect("command should parse");
        assert_eq!(command, Command::Sort(SortKey::Price));
    }

    #[rstest]
    fn add_commands_parse_kind_and_destination() {
        let command = parse_command("add check-in d-42").expect("command should parse");
        assert_eq!(
            command,
            Command::Add {
                kind: PointKind::CheckIn,
                destination: DestinationId::new("d-42"),
            }
        );
    }

    #[rstest]
    fn unknown_filters_are_rejected() {
        let error = parse_command("filter sideways").expect_err("parse should fail");
        assert!(error.contains("unknown filter"));
    }

    #[rstest]
    fn missing_arguments_name_the_expected_form() {
        let error = parse_command("favorite").expect_err("parse should fail");
        assert_eq!(error, "usage: favorite <id>");
    }

    #[rstest]
    fn trailing_arguments_are_rejected() {
        let error = parse_command("back now").expect_err("parse should fail");
        assert!(error.contains("unexpected trailing argument"));
    }

    #[rstest]
    fn quit_has_an_alias() {
        assert_eq!(parse_command("exit").expect("parse"), Command::Quit);
        assert_eq!(parse_command("quit").expect("parse"), Command::Quit);
    }
}
