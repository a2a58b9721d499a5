use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use patchpulse::application::usecases::{
    CheckVersionsUseCase, DispatchNotificationsUseCase, RunOnceUseCase,
};
use patchpulse::application::StateStore;
use patchpulse::infrastructure::{
    blizztrack_source::{BlizzTrackSource, DEFAULT_BASE_URL, DEFAULT_REGION},
    composite_source::CompositeVersionSource,
    json_state_store::JsonFileStateStore,
    log_notifier::LogNotifier,
    multi_notifier::MultiNotifier,
    pushover_notifier::PushoverNotifier,
    scrape_source::ScrapeSource,
};
use patchpulse::interfaces::config::Settings;
use patchpulse::interfaces::logging::init_file_logging;

#[derive(Parser, Debug)]
#[command(name = "patchpulse", about = "Check game client versions once and notify on change")]
struct Args {
    /// Path to the state file (watched clients, credentials, counters)
    #[arg(long, env = "PATCHPULSE_STATE", default_value = "config.json")]
    state: PathBuf,

    /// Append-only log file
    #[arg(long, env = "PATCHPULSE_LOG", default_value = "patchpulse.log")]
    log_file: PathBuf,

    /// Directory relative paths are resolved against
    #[arg(long, env = "PATCHPULSE_WORKDIR")]
    workdir: Option<PathBuf>,

    /// Region whose version label is authoritative
    #[arg(long, env = "PATCHPULSE_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Timeout for every outgoing HTTP call
    #[arg(long, env = "PATCHPULSE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Version source base URL
    #[arg(long, env = "PATCHPULSE_SOURCE_URL", default_value = DEFAULT_BASE_URL)]
    source_url: String,

    /// Do not send push notifications (log only)
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn into_settings(self) -> anyhow::Result<Settings> {
        let workdir = self.workdir.clone();
        Settings {
            state_path: self.state,
            log_path: self.log_file,
            region: self.region,
            timeout: Duration::from_secs(self.timeout_secs),
            source_url: self.source_url,
            dry_run: self.dry_run,
        }
        .resolve(workdir.as_deref())
    }
}

#[tokio::main]
async fn main() {
    let start = Instant::now();
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let settings = match args.into_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid settings: {e}");
            std::process::exit(2);
        }
    };

    // nothing below writes to stdout; the log file is the only narration
    let guard = match init_file_logging(&settings.log_path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("failed to set up logging: {e:#}");
            std::process::exit(2);
        }
    };

    let code = run(&settings, start).await;
    drop(guard);
    std::process::exit(code);
}

async fn run(settings: &Settings, start: Instant) -> i32 {
    let store = JsonFileStateStore::new(&settings.state_path);

    // credentials live in the state file, so read it once up front
    let initial = match store.load().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to load state {}: {e}", settings.state_path.display());
            return 1;
        }
    };

    let api = match BlizzTrackSource::new(
        settings.source_url.as_str(),
        settings.region.as_str(),
        settings.timeout,
    ) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to build version source: {e}");
            return 1;
        }
    };
    let scrape = match ScrapeSource::new(settings.timeout) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to build page scraper: {e}");
            return 1;
        }
    };
    let source = CompositeVersionSource::new(Box::new(api), Box::new(scrape));

    let mut notifier = MultiNotifier::new().with_channel("log", Box::new(LogNotifier::new()));
    if settings.dry_run {
        tracing::warn!("--dry-run enabled: notifications go to the log only");
    } else {
        match PushoverNotifier::new(initial.notifier.clone(), settings.timeout) {
            Ok(n) => notifier = notifier.with_channel("pushover", Box::new(n)),
            Err(e) => {
                tracing::error!("failed to build pushover notifier: {e}");
                return 1;
            }
        }
    }

    let run_once = RunOnceUseCase {
        store: &store,
        check_versions: CheckVersionsUseCase { source: &source },
        dispatch: DispatchNotificationsUseCase {
            notifier: &notifier,
        },
    };

    let summary = match run_once.execute().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("run failed: {e}");
            return 1;
        }
    };

    let elapsed = start.elapsed();
    if summary.skipped {
        tracing::info!("service completed, service off, completed in {:?}", elapsed);
    } else if summary.changes > 0 {
        tracing::info!(
            changes = summary.changes,
            errors = summary.errors,
            notifications_failed = summary.notifications_failed,
            "service completed, changes found, completed in {:?}",
            elapsed
        );
    } else {
        tracing::info!(
            errors = summary.errors,
            "service completed, no changes found, completed in {:?}",
            elapsed
        );
    }

    if summary.persist_error.is_some() {
        return 1;
    }
    0
}
