use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const PRIMARY_OUTPUT: &str = "apple_import.csv";
pub const DUPLICATES_OUTPUT: &str = "duplicates_manual_import.csv";

/// One data row of the source export, keeping the column order of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    fields: Vec<(String, String)>,
}

impl SourceRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Builds a record from `(header, value)` string pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Exact-case header lookup. With repeated headers the last column wins.
    pub fn get_exact(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A row of the Apple Passwords import schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "OTPAuth")]
    pub otpauth: String,
}

impl TargetRecord {
    pub const HEADERS: [&'static str; 6] =
        ["Title", "URL", "Username", "Password", "Notes", "OTPAuth"];
}

/// Ordered header names tried, case-insensitively, for each target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateLists {
    pub title: Vec<String>,
    pub url: Vec<String>,
    pub username: Vec<String>,
    pub password: Vec<String>,
    pub notes: Vec<String>,
    pub otp: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for CandidateLists {
    fn default() -> Self {
        Self {
            title: names(&["name", "title", "item name", "itemname"]),
            url: names(&["url", "website", "urls", "web site", "web address"]),
            username: names(&[
                "username",
                "email",
                "login",
                "user",
                "user name",
                "loginname",
                "login name",
                "account",
                "userid",
                "user id",
            ]),
            password: names(&["password", "pass", "passwd", "pw"]),
            notes: names(&["note", "notes", "description", "comment", "comments"]),
            otp: names(&["totp", "otp", "2fa", "two-factor", "twofactor", "mfa"]),
        }
    }
}

impl CandidateLists {
    /// Every list paired with the target column it feeds.
    pub fn named(&self) -> [(&'static str, &[String]); 6] {
        [
            ("title", self.title.as_slice()),
            ("url", self.url.as_slice()),
            ("username", self.username.as_slice()),
            ("password", self.password.as_slice()),
            ("notes", self.notes.as_slice()),
            ("otp", self.otp.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub primary: String,
    pub duplicates: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            primary: PRIMARY_OUTPUT.to_string(),
            duplicates: DUPLICATES_OUTPUT.to_string(),
        }
    }
}

/// Header of a source column with a short, secret-masked sample value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSample {
    pub header: String,
    pub sample: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedData {
    pub headers: Vec<String>,
    pub records: Vec<SourceRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    pub records: Vec<TargetRecord>,
    pub duplicates: Vec<TargetRecord>,
    pub missing_usernames: usize,
    /// Occurrences per non-empty URL, in first-seen order.
    pub url_counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFiles {
    pub primary: PathBuf,
    pub duplicates: Option<PathBuf>,
}
