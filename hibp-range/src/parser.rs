use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::client::RawResponse;
use crate::error::{MalformedLine, ParseError};
use crate::SUFFIX_LEN;

/// One `SUFFIX:COUNT` line of a range response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEntry {
    suffix: [u8; SUFFIX_LEN],
    count: u64,
}

impl RangeEntry {
    /// Parses a single non-empty response line.
    pub fn parse_line(line: &str) -> Result<Self, MalformedLine> {
        let (suffix, count) = line.split_once(':').ok_or(MalformedLine::MissingSeparator)?;

        let suffix: [u8; SUFFIX_LEN] = suffix
            .as_bytes()
            .try_into()
            .map_err(|_| MalformedLine::SuffixLength(suffix.len()))?;
        if !suffix.iter().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
            return Err(MalformedLine::SuffixNotHex);
        }

        let count = count.trim().parse::<u64>()?;

        Ok(Self { suffix, count })
    }

    #[inline]
    pub fn suffix(&self) -> &str {
        // SAFETY: parse_line only accepts ASCII hex digits
        unsafe { std::str::from_utf8_unchecked(&self.suffix) }
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Every entry the range API returned for one prefix, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeQueryResult {
    entries: Vec<RangeEntry>,
}

impl RangeQueryResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[RangeEntry] {
        &self.entries
    }
}

impl FromIterator<RangeEntry> for RangeQueryResult {
    fn from_iter<I: IntoIterator<Item = RangeEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a RangeQueryResult {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parses a range response body into its entries.
pub fn parse(raw: &RawResponse) -> Result<RangeQueryResult, ParseError> {
    let body = std::str::from_utf8(&raw.body)
        .map_err(|e| ParseError::NotUtf8 { valid_up_to: e.valid_up_to() })?;

    parse_body(body)
}

/// Parses the text of a range response.
///
/// Lines may end in `\n` or `\r\n`. Blank lines are skipped; any other line
/// that is not `SUFFIX:COUNT` fails the whole response, as does a suffix
/// listed twice.
pub fn parse_body(body: &str) -> Result<RangeQueryResult, ParseError> {
    // the padded API returns roughly 800-1000 lines per prefix
    let mut entries = Vec::with_capacity(1024);
    let mut seen: HashMap<[u8; SUFFIX_LEN], usize> = HashMap::with_capacity(1024);

    for (index, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let entry = RangeEntry::parse_line(line).map_err(|reason| ParseError::MalformedLine {
            line_number: index + 1,
            line: line.to_owned(),
            reason,
        })?;

        match seen.entry(entry.suffix) {
            Entry::Occupied(first) => {
                return Err(ParseError::DuplicateSuffix {
                    line_number: index + 1,
                    first_line_number: *first.get(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(index + 1);
            }
        }
        entries.push(entry);
    }

    Ok(RangeQueryResult { entries })
}
