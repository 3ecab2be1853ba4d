use game_types::{ImportError, WordPair};

const SEPARATORS: [char; 3] = ['\t', ';', ','];

/// Parse a plain-text vocabulary list, one `source<sep>target` pair per line.
///
/// The separator is the first tab, `;` or `,` on the line (checked in that order).
/// Blank lines and lines starting with `#` are skipped, as are lines with an empty side.
pub fn parse_word_list(text: &str) -> Result<Vec<WordPair>, ImportError> {
    let mut skipped = 0usize;

    let pairs: Vec<WordPair> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let pair = SEPARATORS
                .iter()
                .find_map(|sep| line.split_once(*sep))
                .and_then(|(source, target)| WordPair::new(source, target));
            if pair.is_none() {
                skipped += 1;
                tracing::debug!("Skipping vocabulary line without a usable pair: {:?}", line);
            }
            pair
        })
        .collect();

    if pairs.is_empty() {
        return Err(ImportError::NoValidPairs);
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} vocabulary lines without a usable pair", skipped);
    }

    Ok(pairs)
}
