//! Cross-resolver consistency checking.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use dns01_core::{Dns01Error, Result};

use crate::probe::{HickoryProbe, TxtObservation, TxtProbe};
use crate::resolver_set::ResolverSet;

/// Pause between poll rounds, and after the confirming round
pub const DEFAULT_INTERQUERY_DELAY: Duration = Duration::from_secs(5);

/// Per-resolver query timeout within a round
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// One resolver's answer within a round
#[derive(Debug, Clone)]
pub struct ResolverAnswer {
    /// Label of the answering resolver
    pub resolver: String,

    /// What it reported
    pub observation: TxtObservation,
}

/// Outcome of one parallel poll of every configured resolver
#[derive(Debug, Clone)]
pub struct RoundReport {
    answers: Vec<ResolverAnswer>,
}

impl RoundReport {
    /// True if at least one resolver answered and every answer matches
    /// `expected`. An empty report never counts as agreement.
    #[must_use]
    pub fn unanimous(&self, expected: &str) -> bool {
        !self.answers.is_empty()
            && self
                .answers
                .iter()
                .all(|answer| answer.observation.matches(expected))
    }

    /// Resolvers whose answer does not match `expected`
    #[must_use]
    pub fn dissenters(&self, expected: &str) -> Vec<&ResolverAnswer> {
        self.answers
            .iter()
            .filter(|answer| !answer.observation.matches(expected))
            .collect()
    }

    /// All answers, in resolver order
    #[must_use]
    pub fn answers(&self) -> &[ResolverAnswer] {
        &self.answers
    }
}

/// Successful confirmation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Number of poll rounds that ran, including the confirming one
    pub rounds: u32,
}

/// Polls every configured resolver until all of them serve the expected
/// TXT content.
///
/// Rounds are all-or-nothing: each one queries every probe in parallel
/// and completes only once all have answered, so a single fast resolver
/// can never confirm on its own. After a unanimous round the checker
/// waits one more inter-query delay as margin before reporting success.
pub struct ConsistencyChecker {
    probes: Vec<Arc<dyn TxtProbe>>,
    interquery_delay: Duration,
    query_timeout: Duration,
    max_rounds: Option<u32>,
}

impl ConsistencyChecker {
    /// Create a checker over explicit probes
    #[must_use]
    pub fn new(probes: Vec<Arc<dyn TxtProbe>>) -> Self {
        Self {
            probes,
            interquery_delay: DEFAULT_INTERQUERY_DELAY,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            max_rounds: None,
        }
    }

    /// Create a checker with one probe per endpoint of `set`
    #[must_use]
    pub fn from_resolvers(set: &ResolverSet) -> Self {
        let probes = set
            .endpoints()
            .iter()
            .map(|endpoint| Arc::new(HickoryProbe::new(endpoint)) as Arc<dyn TxtProbe>)
            .collect();
        Self::new(probes)
    }

    /// Create a checker over the default public resolver set
    #[must_use]
    pub fn default_public() -> Self {
        Self::from_resolvers(&ResolverSet::default_public())
    }

    /// Set the delay between rounds (also the post-confirmation margin)
    #[must_use]
    pub const fn interquery_delay(mut self, delay: Duration) -> Self {
        self.interquery_delay = delay;
        self
    }

    /// Set the per-resolver query timeout
    #[must_use]
    pub const fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Bound the number of rounds; unbounded by default
    #[must_use]
    pub const fn max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Poll until every resolver reports `expected` at `name`.
    ///
    /// Retries forever unless `max_rounds` was set, in which case the
    /// bound expiring surfaces as [`Dns01Error::PropagationTimeout`].
    pub async fn check(&self, name: &str, expected: &str) -> Result<Confirmation> {
        if self.probes.is_empty() {
            warn!(name, "no resolvers configured; agreement can never be reached");
        }

        let mut rounds: u32 = 0;
        loop {
            rounds += 1;
            let report = self.poll_once(name).await;

            if report.unanimous(expected) {
                info!(
                    name,
                    rounds,
                    resolvers = report.answers().len(),
                    "all resolvers agree"
                );
                tokio::time::sleep(self.interquery_delay).await;
                return Ok(Confirmation { rounds });
            }

            for answer in report.dissenters(expected) {
                warn!(
                    name,
                    resolver = %answer.resolver,
                    observed = %answer.observation,
                    expected,
                    "resolver not yet serving the expected content"
                );
            }

            if let Some(max) = self.max_rounds {
                if rounds >= max {
                    return Err(Dns01Error::PropagationTimeout {
                        name: name.to_string(),
                        rounds,
                    });
                }
            }

            tokio::time::sleep(self.interquery_delay).await;
        }
    }

    /// One parallel poll of every probe; no early exit
    async fn poll_once(&self, name: &str) -> RoundReport {
        let lookups = self.probes.iter().map(|probe| async move {
            let observation =
                match tokio::time::timeout(self.query_timeout, probe.observe(name)).await {
                    Ok(observation) => observation,
                    Err(_) => {
                        debug!(resolver = %probe.label(), name, "query timed out");
                        TxtObservation::NoAnswer
                    }
                };
            ResolverAnswer {
                resolver: probe.label().to_string(),
                observation,
            }
        });

        RoundReport {
            answers: join_all(lookups).await,
        }
    }
}
