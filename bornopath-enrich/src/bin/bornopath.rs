use bornopath::{DEFAULT_DICT_PATH, DictionaryStore, WordFilter};
use bornopath_enrich::http::build_client;
use bornopath_enrich::{
    EnrichConfig, Enricher, Interrupt, MockSource, SourceSet, extract_tokens, fetch_page,
};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Published copy of the dictionary, used when no local file exists yet
const REMOTE_DICT_URL: &str =
    "https://raw.githubusercontent.com/towfikahmed0/Bornopath/refs/heads/main/dictionary.json";

/// Number of added words echoed after each page
const SHOW_ADDED: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("bornopath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Harvest English words from web pages into the Bornopath English-Bengali dictionary")
        .arg(
            Arg::new("urls")
                .help("Pages to harvest words from")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("dict")
                .long("dict")
                .short('d')
                .help("Dictionary file")
                .default_value(DEFAULT_DICT_PATH),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .short('w')
                .help("Words enriched in parallel (overrides BORNOPATH_WORKERS)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .short('t')
                .help("Per-lookup timeout in seconds (overrides BORNOPATH_TIMEOUT_SECS)")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("page-timeout")
                .long("page-timeout")
                .help("Page download timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use a small built-in word table instead of the web sources")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-bootstrap")
                .long("no-bootstrap")
                .help("Start from an empty dictionary instead of downloading the published one")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every source lookup")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let mut config = EnrichConfig::from_env()?;
    if let Some(&workers) = matches.get_one::<usize>("workers") {
        config = config.with_workers(workers);
    }
    if let Some(&secs) = matches.get_one::<u64>("timeout") {
        config = config.with_call_timeout(Duration::from_secs(secs));
    }
    if let Some(&secs) = matches.get_one::<u64>("page-timeout") {
        config = config.with_page_timeout(Duration::from_secs(secs));
    }

    let client = build_client(config.page_timeout)?;
    let dict_path = matches
        .get_one::<String>("dict")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_PATH));
    let mut store = if dict_path.exists() || matches.get_flag("no-bootstrap") {
        DictionaryStore::load_or_empty(&dict_path)
    } else {
        bootstrap(&client, dict_path).await
    };

    let sources = if matches.get_flag("mock") {
        info!("Using the built-in word table; no dictionary lookups will be made");
        SourceSet::uniform(Arc::new(demo_source()))
    } else {
        SourceSet::http(&config)?
    };

    let interrupt = Interrupt::new();
    let enricher = Enricher::new(sources, &config).with_interrupt(interrupt.clone());
    let filter = WordFilter::default();

    tokio::spawn({
        let interrupt = interrupt.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted by user. Finishing lookups already in flight...");
                interrupt.trigger();
            }
        }
    });

    let urls: Vec<String> = matches
        .get_many::<String>("urls")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    for url in &urls {
        if interrupt.is_triggered() {
            break;
        }
        info!("Harvesting {}", url);

        let html = match fetch_page(&client, url, config.page_timeout).await {
            Ok(html) => html,
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                continue;
            }
        };

        let known = store.known_words();
        let words = filter.filter(extract_tokens(&html), &known);
        if words.is_empty() {
            warn!("No new candidate words after filtering {}", url);
            continue;
        }

        let report = enricher.enrich(words, &known).await;
        for (reason, count) in &report.rejected {
            info!("  {} words rejected: {}", count, reason);
        }
        if report.duplicates > 0 {
            info!("  {} duplicate headwords dropped", report.duplicates);
        }

        if let Err(e) = store.reload() {
            warn!("Could not re-read dictionary file, merging anyway: {}", e);
        }
        let added = store.merge(report.into_records());
        if added.is_empty() {
            println!("No new words to add from {}", url);
            continue;
        }

        match store.save() {
            Ok(()) => {
                let shown = added.iter().take(SHOW_ADDED).cloned().collect::<Vec<_>>().join(", ");
                let more = if added.len() > SHOW_ADDED { "..." } else { "" };
                println!(
                    "Added {} new words to {}: {}{}",
                    added.len(),
                    store.path().display(),
                    shown,
                    more
                );
            }
            Err(e) => error!("Failed to write dictionary file: {}", e),
        }
    }

    info!("Dictionary now holds {} entries", store.len());
    Ok(())
}

/// A handful of everyday words, so `--mock` runs produce visible records
fn demo_source() -> MockSource {
    MockSource::new()
        .with_translation("river", &["নদী", "তটিনী"])
        .with_headword("river", &["A large natural stream of water flowing to the sea."])
        .with_synonyms("river", &["stream", "waterway"])
        .with_translation("water", &["জল", "পানি"])
        .with_headword("water", &["A clear liquid that forms rain, rivers and seas."])
        .with_antonyms("water", &["land"])
        .with_translation("city", &["শহর", "নগর"])
        .with_headword("city", &["A large town."])
        .with_synonyms("city", &["town", "metropolis"])
        .with_antonyms("city", &["village"])
        .with_translation("book", &["বই", "পুস্তক"])
        .with_headword("book", &["A written work published as printed pages."])
        .with_translation("run", &["দৌড়ানো"])
        .with_headword("run", &["To move swiftly on foot."])
        .with_synonyms("run", &["sprint", "dash"])
        .with_antonyms("run", &["walk"])
}

/// Download the published dictionary into `path`, or start empty if that fails
async fn bootstrap(client: &reqwest::Client, path: PathBuf) -> DictionaryStore {
    let mut store = DictionaryStore::empty(path);
    let downloaded = match bornopath_enrich::http::get_text(client, REMOTE_DICT_URL).await {
        Ok(json) => store.replace_from_json(&json).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match downloaded.and_then(|()| store.save().map_err(|e| e.to_string())) {
        Ok(()) => info!("Downloaded published dictionary ({} entries)", store.len()),
        Err(e) => warn!(
            "Could not fetch published dictionary: {}. Continuing with {} entries",
            e,
            store.len()
        ),
    }
    store
}
