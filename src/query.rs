/// Query string parsing and serialization
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Matches the first bracketed index in a parameter name, e.g. `list[0]` or `list[]`
static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]*)\]").expect("index pattern is valid"));

/// One value of a query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A name that appeared without `=`, e.g. `?debug`
    Flag,
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag => f.write_str("true"),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Flag => serializer.serialize_bool(true),
            ParamValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// Indexes further than this past the current end are appended instead
const MAX_INDEX_GAP: usize = 1024;

/// Where a repeated value lands in its parameter's sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Append,
    At(usize),
}

/// All values seen for one parameter name.
///
/// Every parameter is a sequence of slots; a name seen once is a sequence of
/// length one. Indexed placement past the end leaves empty slots behind it,
/// up to `MAX_INDEX_GAP` of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    slots: Vec<Option<ParamValue>>,
    /// Set once the name has been seen a second time
    repeated: bool,
}

impl Param {
    fn scalar(value: ParamValue) -> Param {
        Param {
            slots: vec![Some(value)],
            repeated: false,
        }
    }

    fn place(&mut self, value: ParamValue, placement: Placement) {
        self.repeated = true;

        let index = match placement {
            Placement::At(index) if index <= self.slots.len().saturating_add(MAX_INDEX_GAP) => index,
            _ => {
                self.slots.push(Some(value));
                return;
            }
        };

        if let Some(len) = index.checked_add(1) {
            if len > self.slots.len() {
                self.slots.resize(len, None);
            }
            self.slots[index] = Some(value);
        }
    }

    /// True while the name has only been seen once
    pub fn is_scalar(&self) -> bool {
        !self.repeated
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn first(&self) -> Option<&ParamValue> {
        self.slots.first().and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<ParamValue>] {
        &self.slots
    }

    /// Filled slots in order, skipping holes
    pub fn values(&self) -> impl Iterator<Item = &ParamValue> {
        self.slots.iter().flatten()
    }
}

/// Renders the way a loosely typed host coerces the value to text:
/// sequences are joined with `,` and holes render empty.
impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if let Some(value) = slot {
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Param {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_scalar() {
            if let Some(value) = self.first() {
                return value.serialize(serializer);
            }
        }
        let mut seq = serializer.serialize_seq(Some(self.slots.len()))?;
        for slot in &self.slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}

/// Parsed query parameters keyed by lower-cased name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Param>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.get(&name.to_lowercase())
    }

    pub fn first(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).and_then(Param::first)
    }

    pub fn all(&self, name: &str) -> Vec<&ParamValue> {
        self.get(name).map(|p| p.values().collect()).unwrap_or_default()
    }

    /// The parameter coerced to text, or `None` when the name is absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(|p| p.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.params.iter().map(|(name, param)| (name.as_str(), param))
    }

    fn insert(&mut self, name: String, value: ParamValue, placement: Placement) {
        match self.params.entry(name) {
            // The index is ignored on first sight; the value becomes the scalar.
            Entry::Vacant(slot) => {
                slot.insert(Param::scalar(value));
            }
            Entry::Occupied(mut slot) => slot.get_mut().place(value, placement),
        }
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.params.iter())
    }
}

/// Parse a raw query string (the part after `?`) into parameters.
///
/// Pairs are split on `&`, then on the first `=`. A pair without `=` is a
/// presence flag. Names and values are lower-cased. A name carrying a
/// bracketed index (`list[2]=x`) is stored under its base name, with the
/// value placed at that index once the name has been seen before.
///
/// Never fails: malformed pairs degrade to flags or odd names.
pub fn parse_query(query: &str) -> QueryParams {
    let mut params = QueryParams::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_name, value) = match pair.split_once('=') {
            Some((name, value)) => (name, ParamValue::Text(value.to_lowercase())),
            None => (pair, ParamValue::Flag),
        };

        let (name, placement) = split_index(raw_name);
        params.insert(name.to_lowercase(), value, placement);
    }

    params
}

/// Parse the query string of a full URL: everything after the first `?`.
/// A URL without `?` has no parameters.
pub fn parse_url_params(url: &str) -> QueryParams {
    match url.split_once('?') {
        Some((_, query)) => parse_query(query),
        None => QueryParams::new(),
    }
}

/// Strip the first `[n]` / `[]` group from a name
fn split_index(raw_name: &str) -> (String, Placement) {
    let Some(captures) = INDEX_PATTERN.captures(raw_name) else {
        return (raw_name.to_string(), Placement::Append);
    };

    let placement = captures
        .get(1)
        .and_then(|digits| digits.as_str().parse::<usize>().ok())
        .map_or(Placement::Append, Placement::At);

    (INDEX_PATTERN.replace(raw_name, "").into_owned(), placement)
}

/// Join ordered name/value pairs into a query string.
///
/// Values are inserted verbatim.
pub fn to_query_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<String>>()
        .join("&")
}
