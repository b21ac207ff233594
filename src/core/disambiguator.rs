use crate::domain::model::TargetRecord;
use std::collections::HashMap;

pub const ACCOUNT_PARAM: &str = "account";

/// Records after duplicate handling, plus per-URL occurrence counts.
#[derive(Debug, Clone, Default)]
pub struct Disambiguated {
    pub records: Vec<TargetRecord>,
    pub duplicates: Vec<TargetRecord>,
    pub url_counts: Vec<(String, usize)>,
}

/// Exact-string URL occurrence counter that remembers first-seen order.
#[derive(Debug, Default)]
struct UrlOccurrences {
    positions: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl UrlOccurrences {
    fn bump(&mut self, url: &str) -> usize {
        match self.positions.get(url) {
            Some(&pos) => {
                self.counts[pos].1 += 1;
                self.counts[pos].1
            }
            None => {
                self.positions.insert(url.to_string(), self.counts.len());
                self.counts.push((url.to_string(), 1));
                1
            }
        }
    }
}

/// Makes every repeated URL unique so all accounts survive import.
///
/// The first occurrence of a URL is left alone. Occurrence `n >= 2` gets an
/// `account=n` query parameter, a title suffix naming the account, and a note
/// line with the original URL; that mutated record is also collected into
/// `duplicates`. Records with an empty URL pass through untouched.
pub fn disambiguate(records: Vec<TargetRecord>) -> Disambiguated {
    let mut occurrences = UrlOccurrences::default();
    let mut duplicates = Vec::new();
    let mut output = Vec::with_capacity(records.len());

    for mut record in records {
        if !record.url.is_empty() {
            let count = occurrences.bump(&record.url);
            if count > 1 {
                mark_duplicate(&mut record, count);
                tracing::debug!("Duplicate URL #{} rewritten to {}", count, record.url);
                duplicates.push(record.clone());
            }
        }
        output.push(record);
    }

    Disambiguated {
        records: output,
        duplicates,
        url_counts: occurrences.counts,
    }
}

fn mark_duplicate(record: &mut TargetRecord, count: usize) {
    let original_url = std::mem::take(&mut record.url);
    let separator = if original_url.contains('?') { '&' } else { '?' };
    record.url = format!("{}{}{}={}", original_url, separator, ACCOUNT_PARAM, count);

    record.title = if record.username.is_empty() {
        format!("{} (Account {})", record.title, count)
    } else {
        format!("{} ({})", record.title, record.username)
    };

    record.notes = if record.notes.is_empty() {
        format!("Original URL: {}", original_url)
    } else {
        format!("Original URL: {}\n{}", original_url, record.notes)
    };
}
