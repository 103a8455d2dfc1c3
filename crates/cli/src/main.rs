// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod terminal;

use std::io::Stdout;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use defense_queue::{
    CoordinatorConfig, JoinCoordinator, JoinForm, JoinOutcome, SuggestionConfig,
    SuggestionSource, TeacherQueue, empty_queue_text, queue_row_cells,
};
use defense_queue_api::{
    ClientConfig, DEFAULT_API_ROOT, HttpQueueApi, QueueApi, RegionTimeResponse,
};
use defense_queue_domain::{CurrentUser, MskOffset, StatusLanguage, TimezoneVariant};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::terminal::TerminalSurface;

const CLOCK_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Defense Queue - terminal client for the classroom defense queue
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the versioned service API
    #[arg(long, env = "DEFENSE_QUEUE_API", default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Bearer token sent with every call except region search
    #[arg(long, env = "DEFENSE_QUEUE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Language of status messages (`en` or `ru`)
    #[arg(long, default_value = "en")]
    language: StatusLanguage,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Join a group's queue, optionally weighted by region
    Join {
        /// The group's join code
        #[arg(long)]
        code: String,
        /// Free-text region; leave empty for the general queue
        #[arg(long, default_value = "")]
        region: String,
        /// 1-based variant to pick if the region is ambiguous
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Show region suggestions, replaying each argument as a keystroke
    Suggest {
        /// Successive states of the region input
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Delay between replayed keystrokes, in milliseconds
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
    },
    /// Show a group's queue (teacher only)
    Queue {
        /// Group identifier
        #[arg(long)]
        group: i64,
        /// Print the table rows as HTML
        #[arg(long)]
        html: bool,
    },
    /// Show the signed-in user
    Me,
    /// Show the current Moscow and local time for a region
    Now {
        /// Region name
        #[arg(long)]
        region: Option<String>,
        /// Area code; takes precedence over the region on the server
        #[arg(long)]
        fias_code: Option<String>,
    },
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_root)
            .with_token(self.token.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

/// Converts a 1-based choice into a picker index.
fn pick_index(choice: usize, options: usize) -> Option<usize> {
    (1..=options).contains(&choice).then(|| choice - 1)
}

fn parse_pick(input: &str, options: usize) -> Option<usize> {
    pick_index(input.trim().parse().ok()?, options)
}

async fn prompt_pick(options: usize) -> std::io::Result<Option<usize>> {
    println!("Pick a variant [1-{options}]:");
    let mut line: String = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(parse_pick(&line, options))
}

async fn run_join(
    api: Arc<HttpQueueApi>,
    language: StatusLanguage,
    form: &JoinForm,
    pick: Option<usize>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config: CoordinatorConfig = CoordinatorConfig {
        language,
        ..CoordinatorConfig::default()
    };
    let mut coordinator: JoinCoordinator<HttpQueueApi> = JoinCoordinator::new(api, config);
    let mut surface: TerminalSurface<Stdout> = TerminalSurface::new(std::io::stdout());

    let options: Vec<String> = match coordinator.submit(form, &mut surface).await {
        Ok(JoinOutcome::Joined { response, .. }) => {
            if let Some(position) = response.position {
                println!("Position: {position}");
            }
            return Ok(ExitCode::SUCCESS);
        }
        Ok(JoinOutcome::AwaitingPick { options }) => options,
        Err(e) => {
            debug!(error = %e, "Join attempt ended without joining");
            return Ok(ExitCode::FAILURE);
        }
    };

    let index: Option<usize> = match pick {
        Some(choice) => pick_index(choice, options.len()),
        None => prompt_pick(options.len()).await?,
    };
    let Some(index) = index else {
        warn!(options = options.len(), "No valid variant picked");
        return Ok(ExitCode::FAILURE);
    };
    coordinator.choose(index)?;

    let joined: bool = coordinator.submit(form, &mut surface).await.is_ok();
    Ok(if joined {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_suggest(
    api: Arc<HttpQueueApi>,
    inputs: &[String],
    interval: Duration,
) -> ExitCode {
    let config: SuggestionConfig = SuggestionConfig::default();
    let wait: Duration = config.debounce + Duration::from_secs(30);
    let mut source: SuggestionSource<HttpQueueApi> = SuggestionSource::new(api, config);

    for (index, input) in inputs.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(interval).await;
        }
        source.input(input);
    }

    match tokio::time::timeout(wait, source.next_update()).await {
        Ok(Some(suggestions)) if suggestions.is_empty() => println!("No suggestions"),
        Ok(Some(suggestions)) => {
            for suggestion in suggestions {
                println!("{}", suggestion.region);
            }
        }
        Ok(None) | Err(_) => {
            warn!("Timed out waiting for suggestions");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

async fn run_queue(
    api: Arc<HttpQueueApi>,
    language: StatusLanguage,
    group_id: i64,
    html: bool,
) -> ExitCode {
    let mut view: TeacherQueue<HttpQueueApi> = TeacherQueue::new(api, language);
    let mut surface: TerminalSurface<Stdout> = TerminalSurface::new(std::io::stdout());

    let Ok(rows) = view.refresh(group_id, &mut surface).await else {
        return ExitCode::FAILURE;
    };
    if let Some(user) = view.current_user() {
        info!(teacher = %user.full_name, group_id, "Showing queue");
    }

    if html {
        println!("{rows}");
    } else if view.entries().is_empty() {
        println!("{}", empty_queue_text(language));
    } else {
        for (index, entry) in view.entries().iter().enumerate() {
            let [name, region, msk, position] = queue_row_cells(entry);
            println!("{:>3}  {name}  {region}  {msk}  {position}", index + 1);
        }
    }
    ExitCode::SUCCESS
}

async fn run_me(api: &HttpQueueApi) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let user: CurrentUser = CurrentUser::try_from(api.current_user().await?)?;
    println!("{} ({})", user.full_name, user.role);
    Ok(ExitCode::SUCCESS)
}

async fn run_now(
    api: &HttpQueueApi,
    region: Option<&str>,
    fias_code: Option<&str>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let now: RegionTimeResponse = api.region_time(region, fias_code).await?;
    println!("Region: {}", now.region);
    println!("MSK time: {}", now.msk_time);
    println!("Local time: {}", now.local_time);

    let variant: TimezoneVariant =
        TimezoneVariant::new(&now.region, MskOffset::new(now.msk_offset_hours));
    match clock_preview(&variant, OffsetDateTime::now_utc()) {
        Ok(preview) => {
            debug!(%preview, msk_offset = %variant.msk_offset(), "Local time computed");
            println!("Local time (this machine's clock): {preview}");
        }
        Err(e) => warn!(
            error = %e,
            msk_offset = %variant.msk_offset(),
            "Could not compute local time from this machine's clock"
        ),
    }
    Ok(ExitCode::SUCCESS)
}

/// Formats `now` in the variant's local time.
fn clock_preview(
    variant: &TimezoneVariant,
    now: OffsetDateTime,
) -> Result<String, Box<dyn std::error::Error>> {
    let local: OffsetDateTime = variant.local_time_at(now)?;
    Ok(local.format(CLOCK_FORMAT)?)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing; logs go to stderr so stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: ClientConfig = args.client_config();
    info!(
        api_root = %config.api_root,
        authenticated = config.token.is_some(),
        "Starting defense queue client"
    );
    let api: Arc<HttpQueueApi> = Arc::new(HttpQueueApi::new(config)?);

    match args.command {
        Command::Join { code, region, pick } => {
            run_join(api, args.language, &JoinForm::new(&code, &region), pick).await
        }
        Command::Suggest {
            inputs,
            interval_ms,
        } => Ok(run_suggest(api, &inputs, Duration::from_millis(interval_ms)).await),
        Command::Queue { group, html } => Ok(run_queue(api, args.language, group, html).await),
        Command::Me => run_me(&api).await,
        Command::Now { region, fias_code } => {
            run_now(&api, region.as_deref(), fias_code.as_deref()).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use defense_queue::{JoinSurface, StatusLine};

    #[test]
    fn test_pick_is_one_based_and_bounded() {
        assert_eq!(pick_index(2, 2), Some(1));
        assert_eq!(pick_index(3, 2), None);
        assert_eq!(parse_pick("1", 3), Some(0));
        assert_eq!(parse_pick(" 3\n", 3), Some(2));
        assert_eq!(parse_pick("0", 3), None);
        assert_eq!(parse_pick("4", 3), None);
        assert_eq!(parse_pick("two", 3), None);
    }

    #[test]
    fn test_join_arguments() {
        let args = Args::try_parse_from([
            "defense-queue",
            "--api-root",
            "http://queue.test/api/v1/",
            "--token",
            "secret",
            "--language",
            "ru",
            "join",
            "--code",
            "ABC123",
            "--region",
            "Якутия",
            "--pick",
            "2",
        ])
        .unwrap();

        assert_eq!(args.language, StatusLanguage::Russian);
        assert_eq!(
            args.command,
            Command::Join {
                code: String::from("ABC123"),
                region: String::from("Якутия"),
                pick: Some(2),
            }
        );
        let config = args.client_config();
        assert_eq!(config.api_root, "http://queue.test/api/v1");
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_region_defaults_to_general_queue() {
        let args =
            Args::try_parse_from(["defense-queue", "join", "--code", "ABC123"]).unwrap();

        let Command::Join { region, .. } = args.command else {
            panic!("expected join");
        };
        assert!(region.is_empty());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let result = Args::try_parse_from(["defense-queue", "--language", "de", "me"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_suggest_requires_input() {
        assert!(Args::try_parse_from(["defense-queue", "suggest"]).is_err());

        let args =
            Args::try_parse_from(["defense-queue", "suggest", "Мо", "Мос", "--interval-ms", "50"])
                .unwrap();
        assert_eq!(
            args.command,
            Command::Suggest {
                inputs: vec![String::from("Мо"), String::from("Мос")],
                interval_ms: 50,
            }
        );
    }

    #[test]
    fn test_timeout_is_applied() {
        let args =
            Args::try_parse_from(["defense-queue", "--timeout-secs", "5", "me"]).unwrap();

        assert_eq!(
            args.client_config().request_timeout,
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_terminal_surface_output() {
        let mut surface = TerminalSurface::new(Vec::new());

        surface.set_status("Looking up the region…");
        surface.set_status("");
        surface.show_picker(&[String::from("Якутск (MSK +6)"), String::from("Оймякон (MSK +7)")]);
        surface.set_region_text("Якутск");
        surface.set_fias_code("");
        surface.hide_picker();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(
            output,
            "Looking up the region…\n  1. Якутск (MSK +6)\n  2. Оймякон (MSK +7)\nRegion: Якутск\n"
        );
    }

    struct BrokenPipe;

    impl std::io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_terminal_surface_survives_write_failure() {
        let mut surface = TerminalSurface::new(BrokenPipe);

        surface.set_status("Looking up the region…");
        surface.set_region_text("Якутск");

        assert!(surface.show_picker(&[String::from("Якутск (MSK +6)")]));
    }

    #[test]
    fn test_clock_preview_rejects_out_of_range_offset() {
        let now = OffsetDateTime::UNIX_EPOCH;

        let moscow = TimezoneVariant::new("Москва", MskOffset::new(0));
        assert_eq!(clock_preview(&moscow, now).unwrap(), "1970-01-01 03:00:00");

        let broken = TimezoneVariant::new("Нигде", MskOffset::new(i32::MAX));
        assert!(clock_preview(&broken, now).is_err());
    }
}
