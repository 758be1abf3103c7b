//! Core of the Bornopath English to Bengali dictionary harvester
//!
//! This crate turns raw words scraped from web pages into a small set of new,
//! dictionary-shaped words, proposes plausible headwords for inflected forms, and
//! keeps the persisted dictionary free of duplicates. Network lookups live in the
//! `bornopath-enrich` crate.
//!
//! ```
//! use bornopath::{CandidateGenerator, KnownWords, WordFilter};
//!
//! let known: KnownWords = ["river"].into_iter().collect();
//! let words = WordFilter::default().filter(["Rivers", "river", "the", "Studies"], &known);
//! assert_eq!(words, vec!["rivers", "studies"]);
//!
//! let generator = CandidateGenerator::default();
//! assert_eq!(generator.generate(&words[1]), vec!["studies", "study"]);
//! ```

pub mod candidates;
pub mod error;
pub mod filter;
pub mod known;
pub mod record;
pub mod stoplist;
pub mod store;

pub use candidates::CandidateGenerator;
pub use error::{StoreError, StoreResult};
pub use filter::WordFilter;
pub use known::KnownWords;
pub use record::{EnrichedRecord, MAX_ITEMS, WordDetails};
pub use stoplist::{COMMON_WORDS, StopList, WordShape};
pub use store::{DEFAULT_DICT_PATH, DictionaryStore};
