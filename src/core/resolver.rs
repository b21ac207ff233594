use crate::domain::model::{CandidateLists, SourceRecord, TargetRecord};

/// Header checked with its exact casing before any other username source.
pub const PREFERRED_USERNAME_HEADER: &str = "Username";
pub const OTPAUTH_PREFIX: &str = "otpauth://";
pub const FALLBACK_OTP_LABEL: &str = "Account";

const MAIL_MARKERS: [&str; 2] = ["email", "mail"];

fn fold(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Case-folded view of one record. When two headers fold to the same key
/// the later value replaces the earlier one in place.
struct HeaderIndex<'a> {
    entries: Vec<(String, &'a str)>,
}

impl<'a> HeaderIndex<'a> {
    fn build(record: &'a SourceRecord) -> Self {
        let mut entries: Vec<(String, &'a str)> = Vec::with_capacity(record.len());
        for (header, value) in record.iter() {
            let key = fold(header);
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        let key = fold(name);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn first_non_empty(&self, candidates: &[String]) -> Option<&'a str> {
        candidates
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }

    fn first_header_containing(&self, markers: &[&str]) -> Option<&'a str> {
        self.entries
            .iter()
            .filter(|(k, _)| markers.iter().any(|m| k.contains(m)))
            .map(|(_, v)| *v)
            .find(|value| !value.is_empty())
    }
}

/// Outcome of resolving a whole export.
#[derive(Debug, Clone, Default)]
pub struct ResolvedBatch {
    pub records: Vec<TargetRecord>,
    pub missing_usernames: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    candidates: CandidateLists,
}

impl FieldResolver {
    pub fn new(candidates: CandidateLists) -> Self {
        Self { candidates }
    }

    /// Resolves every record in order, warning about rows without a username.
    pub fn resolve_all(&self, records: &[SourceRecord]) -> ResolvedBatch {
        let mut batch = ResolvedBatch {
            records: Vec::with_capacity(records.len()),
            missing_usernames: 0,
        };

        for (index, record) in records.iter().enumerate() {
            let target = self.resolve(record);
            if target.username.is_empty() {
                batch.missing_usernames += 1;
                let label = if target.title.is_empty() {
                    &target.url
                } else {
                    &target.title
                };
                tracing::warn!("⚠️  Row {}: No username found for {}", index + 1, label);
            }
            batch.records.push(target);
        }

        batch
    }

    pub fn resolve(&self, record: &SourceRecord) -> TargetRecord {
        let index = HeaderIndex::build(record);
        let pick = |candidates: &[String]| {
            index
                .first_non_empty(candidates)
                .unwrap_or_default()
                .to_string()
        };

        let mut title = pick(&self.candidates.title);
        let url = pick(&self.candidates.url);
        let username = self.resolve_username(record, &index);
        let password = pick(&self.candidates.password);
        let notes = pick(&self.candidates.notes);
        let otp = pick(&self.candidates.otp);

        if title.is_empty() && !url.is_empty() {
            title = host_title(&url).to_string();
        }

        let otpauth = if otp.is_empty() {
            otp
        } else {
            otpauth_uri(&otp, &title)
        };

        TargetRecord {
            title,
            url,
            username,
            password,
            notes,
            otpauth,
        }
    }

    fn resolve_username(&self, record: &SourceRecord, index: &HeaderIndex<'_>) -> String {
        record
            .get_exact(PREFERRED_USERNAME_HEADER)
            .filter(|v| !v.is_empty())
            .or_else(|| {
                index
                    .get(PREFERRED_USERNAME_HEADER)
                    .filter(|v| !v.is_empty())
            })
            .or_else(|| index.first_non_empty(&self.candidates.username))
            .or_else(|| index.first_header_containing(&MAIL_MARKERS))
            .unwrap_or_default()
            .to_string()
    }
}

/// Host part of a URL used as a fallback title: scheme stripped, cut at the first `/`.
pub fn host_title(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

/// Wraps a raw TOTP secret into an `otpauth://` URI; full URIs pass through.
pub fn otpauth_uri(secret: &str, title: &str) -> String {
    if secret.starts_with(OTPAUTH_PREFIX) {
        return secret.to_string();
    }
    let label = if title.is_empty() {
        FALLBACK_OTP_LABEL
    } else {
        title
    };
    format!("{}totp/{}?secret={}", OTPAUTH_PREFIX, label, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(pairs: &[(&str, &str)]) -> TargetRecord {
        let record = SourceRecord::from_pairs(pairs.iter().copied());
        FieldResolver::default().resolve(&record)
    }

    #[test]
    fn test_resolves_proton_style_headers() {
        let target = resolve(&[
            ("type", "login"),
            ("name", "GitHub"),
            ("url", "https://github.com"),
            ("email", "me@example.com"),
            ("username", "octocat"),
            ("password", "hunter2"),
            ("note", "work account"),
            ("totp", "otpauth://totp/GitHub?secret=XYZ"),
        ]);

        assert_eq!(target.title, "GitHub");
        assert_eq!(target.url, "https://github.com");
        assert_eq!(target.username, "octocat");
        assert_eq!(target.password, "hunter2");
        assert_eq!(target.notes, "work account");
        assert_eq!(target.otpauth, "otpauth://totp/GitHub?secret=XYZ");
    }

    #[test]
    fn test_header_matching_is_case_insensitive_and_trimmed() {
        let target = resolve(&[
            (" Title ", "Bank"),
            ("WEBSITE", "https://bank.example"),
            ("Login Name", "jdoe"),
            ("PassWord", "s3cret"),
            ("Comments", "pin in safe"),
        ]);

        assert_eq!(target.title, "Bank");
        assert_eq!(target.url, "https://bank.example");
        assert_eq!(target.username, "jdoe");
        assert_eq!(target.password, "s3cret");
        assert_eq!(target.notes, "pin in safe");
        assert_eq!(target.otpauth, "");
    }

    #[test]
    fn test_candidate_order_skips_empty_values() {
        let target = resolve(&[("name", ""), ("title", "Fallback title"), ("url", "")]);
        assert_eq!(target.title, "Fallback title");
        assert_eq!(target.url, "");
    }

    #[test]
    fn test_exact_username_header_wins() {
        let target = resolve(&[
            ("email", "first@example.com"),
            ("login", "loginname"),
            ("Username", "exact"),
        ]);
        assert_eq!(target.username, "exact");
    }

    #[test]
    fn test_exact_case_username_beats_other_casing() {
        let target = resolve(&[("Username", "exact"), ("USERNAME", "shouty")]);
        assert_eq!(target.username, "exact");
    }

    #[test]
    fn test_empty_exact_username_falls_back_to_folded() {
        let target = resolve(&[("Username", ""), ("login", "fallback")]);
        assert_eq!(target.username, "fallback");

        let target = resolve(&[("USERNAME", "folded"), ("login", "other")]);
        assert_eq!(target.username, "folded");
    }

    #[test]
    fn test_username_falls_back_to_any_mail_header() {
        let target = resolve(&[
            ("name", "Forum"),
            ("Primary E-Mail", ""),
            ("Contact Mail", "me@forum.example"),
        ]);
        assert_eq!(target.username, "me@forum.example");
    }

    #[test]
    fn test_missing_username_stays_empty() {
        let target = resolve(&[("name", "Wifi"), ("password", "guest")]);
        assert_eq!(target.username, "");
    }

    #[test]
    fn test_title_derived_from_url_host() {
        let target = resolve(&[("url", "https://example.com/login")]);
        assert_eq!(target.title, "example.com");

        let target = resolve(&[("url", "http://intranet:8080/a/b")]);
        assert_eq!(target.title, "intranet:8080");

        let target = resolve(&[("url", "example.org")]);
        assert_eq!(target.title, "example.org");
    }

    #[test]
    fn test_raw_totp_secret_uses_title_label() {
        let target = resolve(&[("name", "GitHub"), ("totp", "ABC123")]);
        assert_eq!(target.otpauth, "otpauth://totp/GitHub?secret=ABC123");
    }

    #[test]
    fn test_raw_totp_secret_without_title_uses_fallback_label() {
        let target = resolve(&[("2FA", "ABC123")]);
        assert_eq!(target.otpauth, "otpauth://totp/Account?secret=ABC123");
    }

    #[test]
    fn test_totp_label_uses_derived_title() {
        let target = resolve(&[("url", "https://site.com/x"), ("mfa", "S3CR3T")]);
        assert_eq!(target.otpauth, "otpauth://totp/site.com?secret=S3CR3T");
    }

    #[test]
    fn test_repeated_folded_header_keeps_last_value() {
        let target = resolve(&[("Note", "first"), ("note", "second")]);
        assert_eq!(target.notes, "second");
    }

    #[test]
    fn test_custom_candidates() {
        let candidates = CandidateLists {
            username: vec!["Benutzer".to_string()],
            ..CandidateLists::default()
        };
        let record = SourceRecord::from_pairs([("benutzer", "hans"), ("login", "ignored")]);
        let target = FieldResolver::new(candidates).resolve(&record);
        assert_eq!(target.username, "hans");
    }

    #[test]
    fn test_resolve_all_counts_missing_usernames() {
        let records = vec![
            SourceRecord::from_pairs([("name", "A"), ("username", "alice")]),
            SourceRecord::from_pairs([("name", "B"), ("username", "")]),
            SourceRecord::from_pairs([("url", "https://c.example")]),
        ];
        let batch = FieldResolver::default().resolve_all(&records);

        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.missing_usernames, 2);
        assert_eq!(batch.records[0].username, "alice");
        assert_eq!(batch.records[2].title, "c.example");
    }
}
