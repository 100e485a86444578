use crate::error::MatchError;
use crate::parser::RangeQueryResult;

/// Whether a password appears in the breach corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureOutcome {
    NotExposed,
    /// Seen this many times; always positive.
    Exposed(u64),
}

impl ExposureOutcome {
    /// Padding entries carry a count of zero, so a zero count means not exposed.
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => ExposureOutcome::NotExposed,
            n => ExposureOutcome::Exposed(n),
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            ExposureOutcome::NotExposed => 0,
            ExposureOutcome::Exposed(n) => *n,
        }
    }

    pub fn is_exposed(&self) -> bool {
        matches!(self, ExposureOutcome::Exposed(_))
    }
}

/// Finds the entry for the local `suffix`.
///
/// The comparison is exact; both sides are uppercase hex by construction.
/// A suffix listed more than once is an error, never resolved by picking one.
pub fn match_suffix(
    suffix: &str,
    entries: &RangeQueryResult,
) -> Result<ExposureOutcome, MatchError> {
    let mut matches = entries.iter().filter(|entry| entry.suffix() == suffix);

    let Some(entry) = matches.next() else {
        return Ok(ExposureOutcome::NotExposed);
    };

    let extra = matches.count();
    if extra > 0 {
        return Err(MatchError { suffix: suffix.to_owned(), occurrences: extra + 1 });
    }

    Ok(ExposureOutcome::from_count(entry.count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RangeEntry, parse_body};

    const ZEROS: &str = "00000000000000000000000000000000000";

    #[test]
    fn test_exposed_count() {
        let entries =
            parse_body(&format!("0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n{ZEROS}:3\r\n"))
                .unwrap();
        assert_eq!(match_suffix(ZEROS, &entries), Ok(ExposureOutcome::Exposed(3)));
    }

    #[test]
    fn test_not_exposed() {
        let entries = parse_body(&format!("{ZEROS}:3\r\n")).unwrap();
        assert_eq!(
            match_suffix("0018A45C4D1DEF81644B54AB7F969B88D65", &entries),
            Ok(ExposureOutcome::NotExposed)
        );
        assert_eq!(
            match_suffix(ZEROS, &RangeQueryResult::default()),
            Ok(ExposureOutcome::NotExposed)
        );
    }

    #[test]
    fn test_padding_entry_is_not_exposed() {
        let entries = parse_body(&format!("{ZEROS}:0\r\n")).unwrap();
        assert_eq!(match_suffix(ZEROS, &entries), Ok(ExposureOutcome::NotExposed));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let upper = "0018A45C4D1DEF81644B54AB7F969B88D65";
        let entries = parse_body(&format!("{upper}:9")).unwrap();
        assert_eq!(
            match_suffix(&upper.to_lowercase(), &entries),
            Ok(ExposureOutcome::NotExposed)
        );
    }

    #[test]
    fn test_duplicate_suffix_is_ambiguous() {
        // built line by line; parse_body would reject the repeat itself
        let entries: RangeQueryResult = [format!("{ZEROS}:3"), format!("{ZEROS}:5")]
            .iter()
            .map(|line| RangeEntry::parse_line(line).unwrap())
            .collect();
        assert_eq!(
            match_suffix(ZEROS, &entries),
            Err(MatchError { suffix: ZEROS.to_owned(), occurrences: 2 })
        );
    }

    #[test]
    fn test_outcome_helpers() {
        assert_eq!(ExposureOutcome::from_count(0), ExposureOutcome::NotExposed);
        assert_eq!(ExposureOutcome::from_count(37).count(), 37);
        assert!(ExposureOutcome::Exposed(1).is_exposed());
        assert!(!ExposureOutcome::NotExposed.is_exposed());
    }
}
