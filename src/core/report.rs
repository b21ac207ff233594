use crate::domain::model::{
    CandidateLists, ColumnSample, ConversionResult, LoadedFiles, SourceRecord, TargetRecord,
};
use std::fmt;
use std::path::{Path, PathBuf};

pub const SAMPLE_ENTRIES: usize = 3;
const COLUMN_SAMPLE_CHARS: usize = 50;
const MASKED_PASSWORD_MAX: usize = 8;

/// Everything printed after a conversion. Building it never touches the output files.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub columns: Vec<ColumnSample>,
    pub total_entries: usize,
    pub missing_usernames: usize,
    pub primary_path: PathBuf,
    pub duplicates_path: Option<PathBuf>,
    pub duplicate_count: usize,
    pub sample: Vec<TargetRecord>,
    /// Site label and account count, most accounts first.
    pub multi_account_sites: Vec<(String, usize)>,
}

impl ConversionReport {
    pub fn new(
        columns: Vec<ColumnSample>,
        result: &ConversionResult,
        files: LoadedFiles,
    ) -> Self {
        Self {
            columns,
            total_entries: result.records.len(),
            missing_usernames: result.missing_usernames,
            primary_path: files.primary,
            duplicates_path: files.duplicates,
            duplicate_count: result.duplicates.len(),
            sample: result.records.iter().take(SAMPLE_ENTRIES).cloned().collect(),
            multi_account_sites: multi_account_sites(&result.url_counts),
        }
    }
}

impl ConversionReport {
    pub fn import_instructions(&self) -> String {
        import_instructions(&self.primary_path)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            writeln!(f, "📋 No data rows found in the export")?;
        } else {
            writeln!(f, "📋 Found columns:")?;
            for column in &self.columns {
                writeln!(f, "  - '{}': '{}'", column.header, column.sample)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "📊 Username statistics:")?;
        writeln!(f, "   Total entries: {}", self.total_entries)?;
        writeln!(f, "   Missing usernames: {}", self.missing_usernames)?;
        writeln!(
            f,
            "   With usernames: {}",
            self.total_entries - self.missing_usernames
        )?;

        writeln!(f)?;
        writeln!(f, "✅ Converted: {} entries", self.total_entries)?;
        writeln!(f, "📁 Main file: {}", self.primary_path.display())?;

        if !self.sample.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "🔍 Sample of output (first {} entries):",
                self.sample.len()
            )?;
            for (i, entry) in self.sample.iter().enumerate() {
                writeln!(f)?;
                writeln!(f, "Entry {}:", i + 1)?;
                writeln!(f, "  Title: {}", entry.title)?;
                writeln!(f, "  URL: {}", entry.url)?;
                writeln!(f, "  Username: {}", entry.username)?;
                writeln!(f, "  Password: {}", mask_password(&entry.password))?;
            }
        }

        if let Some(path) = &self.duplicates_path {
            writeln!(f)?;
            writeln!(
                f,
                "⚠️  Found {} duplicate URLs - modified for import",
                self.duplicate_count
            )?;
            writeln!(f, "📁 Duplicates saved to: {}", path.display())?;
        }

        if !self.multi_account_sites.is_empty() {
            writeln!(f)?;
            writeln!(f, "📊 Sites with multiple accounts:")?;
            for (site, count) in &self.multi_account_sites {
                writeln!(f, "  - {}: {} accounts", site, count)?;
            }
        }

        Ok(())
    }
}

/// URLs seen more than once, labelled by authority, sorted by count descending.
/// Ties keep first-seen order.
pub fn multi_account_sites(url_counts: &[(String, usize)]) -> Vec<(String, usize)> {
    let mut sites: Vec<(String, usize)> = url_counts
        .iter()
        .filter(|(_, count)| *count > 1)
        .map(|(url, count)| (site_label(url), *count))
        .collect();
    sites.sort_by(|a, b| b.1.cmp(&a.1));
    sites
}

/// Authority of a URL exactly as written (userinfo, host casing and port
/// kept), or the URL itself when it has none.
pub fn site_label(url: &str) -> String {
    let authority = url.split_once("://").map(|(_, rest)| {
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        &rest[..end]
    });

    match authority {
        Some(authority) if !authority.is_empty() => authority.to_string(),
        _ => url.to_string(),
    }
}

/// Post-import steps, pointing at the primary file actually written.
pub fn import_instructions(primary: &Path) -> String {
    format!(
        "\
⚠️  IMPORTANT:
1. Import '{}' in Safari → Settings → Passwords
2. For duplicate URLs: They have been modified with ?account=N
3. After import, edit entries in Apple Passwords to remove the URL parameter
4. DELETE all CSV files after import!
5. Passkeys must be recreated manually

❓ If usernames are missing:
   - Check the CSV structure analysis above
   - Run with --debug flag for more details
   - Ensure the Proton Pass export includes the username field",
        primary.display()
    )
}

/// Header plus a short sample value for every column of the first data row.
pub fn column_samples(
    first: Option<&SourceRecord>,
    candidates: &CandidateLists,
) -> Vec<ColumnSample> {
    let Some(record) = first else {
        return Vec::new();
    };

    record
        .iter()
        .map(|(header, value)| ColumnSample {
            header: header.to_string(),
            sample: safe_preview(header, value, COLUMN_SAMPLE_CHARS, candidates),
        })
        .collect()
}

/// Non-empty cells of a row as `(header, preview)` pairs, secrets masked.
pub fn row_preview(
    record: &SourceRecord,
    limit: usize,
    candidates: &CandidateLists,
) -> Vec<(String, String)> {
    record
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(header, value)| {
            let shown = safe_preview(header, value, limit, candidates);
            (header.to_string(), shown)
        })
        .collect()
}

fn safe_preview(header: &str, value: &str, limit: usize, candidates: &CandidateLists) -> String {
    if is_secret_header(header, candidates) && !value.is_empty() {
        mask_password(value)
    } else {
        truncate(value, limit)
    }
}

fn is_secret_header(header: &str, candidates: &CandidateLists) -> bool {
    let key = header.trim().to_lowercase();
    candidates
        .password
        .iter()
        .chain(candidates.otp.iter())
        .any(|name| name.trim().to_lowercase() == key)
}

/// First `limit` characters, with `...` appended when anything was cut.
pub fn truncate(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

pub fn mask_password(password: &str) -> String {
    if password.is_empty() {
        "(empty)".to_string()
    } else {
        "*".repeat(password.chars().count().min(MASKED_PASSWORD_MAX))
    }
}
