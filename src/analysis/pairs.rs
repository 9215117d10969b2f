// Language pairs and per-pair running statistics.
//
// Two representations of a pair exist on purpose:
//   - `LanguagePair` keeps emission order ("en-fr" as produced from the
//     topic's language order) and is what appears in output records.
//   - `PairKey` is the canonical, order-independent key used for grouping.
//     Its fields are private, so a key can only be built sorted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered language pair as emitted in output ("a-b").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub first: String,
    pub second: String,
}

impl LanguagePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// The canonical grouping key for this pair.
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.first, &self.second)
    }

    pub fn reversed(&self) -> LanguagePair {
        LanguagePair::new(self.second.clone(), self.first.clone())
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl FromStr for LanguagePair {
    type Err = anyhow::Error;

    /// Splits on the first '-'. Region-tagged codes such as "zh-CN" therefore
    /// split ambiguously; lookups that must be exact use the full string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok(LanguagePair::new(a, b)),
            _ => anyhow::bail!("Invalid language pair {s:?}, expected \"lang-lang\""),
        }
    }
}

impl Serialize for LanguagePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguagePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Canonical unordered pair: the lexicographically smaller code comes first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    pub fn high(&self) -> &str {
        &self.high
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Every unordered pair of `languages`, in combination order
/// (l0-l1, l0-l2, ..., l1-l2, ...).
pub fn unordered_pairs(languages: &[String]) -> Vec<LanguagePair> {
    let mut pairs = Vec::new();
    for (i, a) in languages.iter().enumerate() {
        for b in &languages[i + 1..] {
            pairs.push(LanguagePair::new(a.clone(), b.clone()));
        }
    }
    pairs
}

/// Streaming mean and population standard deviation (Welford).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` until at least one sample has been pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    pub fn std_dev(&self) -> Option<f64> {
        (self.count > 0).then(|| (self.m2 / self.count as f64).max(0.0).sqrt())
    }
}

/// Running statistics per canonical language pair.
#[derive(Debug, Clone, Default)]
pub struct PairAccumulator {
    stats: BTreeMap<PairKey, RunningStats>,
}

impl PairAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pair: &LanguagePair, distance: f64) {
        self.stats.entry(pair.key()).or_default().push(distance);
    }

    pub fn get(&self, key: &PairKey) -> Option<&RunningStats> {
        self.stats.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &RunningStats)> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Round to four decimal places, the precision of every persisted metric.
/// Exact halves go to the even digit: 0.03125 -> 0.0312, 0.96875 -> 0.9688.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// `serialize_with` helper: persist a full-precision metric at four decimals.
pub fn serialize_round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round4(*value))
}
