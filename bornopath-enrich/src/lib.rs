//! Multi-source enrichment for the Bornopath dictionary
//!
//! This crate looks up translations, definitions, synonyms and antonyms for
//! harvested words and decides which of them become dictionary records.
//!
//! # Workflow Example
//!
//! ```ignore
//! use bornopath::{DictionaryStore, WordFilter};
//! use bornopath_enrich::{EnrichConfig, Enricher, SourceSet, extract_tokens, fetch_page};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EnrichConfig::from_env()?;
//!     let mut store = DictionaryStore::load_or_empty("dictionary.json");
//!     let known = store.known_words();
//!
//!     // 1. Harvest and filter tokens
//!     let client = reqwest::Client::new();
//!     let html = fetch_page(&client, "https://example.com/article", config.page_timeout).await?;
//!     let words = WordFilter::default().filter(extract_tokens(&html), &known);
//!
//!     // 2. Enrich with bounded concurrency
//!     let enricher = Enricher::new(SourceSet::http(&config)?, &config);
//!     let report = enricher.enrich(words, &known).await;
//!
//!     // 3. Merge and persist
//!     let added = store.merge(report.into_records());
//!     store.save()?;
//!     println!("Added {} words", added.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod datamuse;
pub mod dictionary;
pub mod english_bangla;
pub mod error;
pub mod http;
pub mod interrupt;
pub mod mock;
pub mod orchestrator;
pub mod page;
pub mod policy;
pub mod source;
pub mod thesaurus;


pub use cache::TranslationCache;
pub use config::EnrichConfig;
pub use datamuse::DatamuseClient;
pub use dictionary::DictionaryClient;
pub use english_bangla::EnglishBanglaClient;
pub use error::{EnrichError, EnrichResult};
pub use interrupt::Interrupt;
pub use mock::{MockCall, MockSource};
pub use orchestrator::{EnrichReport, Enricher};
pub use page::{extract_tokens, fetch_page};
pub use policy::{AcceptancePolicy, Rejection, Resolution};
pub use source::{AntonymSource, DefinitionSource, SourceSet, SynonymSource, TranslationSource};
pub use thesaurus::ThesaurusClient;
