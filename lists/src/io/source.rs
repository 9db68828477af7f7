//! Sources that resolve a list URL to token list content.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::{Validator, validator_for};
use serde_json::Value;
use tracing::debug;

use crate::core::types::TokenList;

const TOKEN_LIST_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/token_list.schema.json"
));

/// Compiled once per process; the error is kept as text so it can be reported per fetch.
static TOKEN_LIST_VALIDATOR: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    let schema: Value = serde_json::from_str(TOKEN_LIST_SCHEMA)
        .map_err(|err| format!("parse token list schema: {}", err))?;
    validator_for(&schema).map_err(|err| format!("invalid token list schema: {}", err))
});

fn token_list_validator() -> Result<&'static Validator> {
    TOKEN_LIST_VALIDATOR
        .as_ref()
        .map_err(|err| anyhow!("{}", err))
}

/// Fetches the list published at a URL.
pub trait ListSource {
    fn fetch(&self, url: &str) -> Result<TokenList>;
}

/// Reads lists from local files: `file://` URLs or plain paths.
///
/// Relative paths resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_dir: PathBuf,
}

impl FileSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let raw = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl ListSource for FileSource {
    fn fetch(&self, url: &str) -> Result<TokenList> {
        let path = self.resolve(url);
        debug!(url, path = %path.display(), "reading list file");
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read list {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("parse list {}", path.display()))?;
        parse_token_list(value)
    }
}

/// Fetches lists over HTTP(S) with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl ListSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<TokenList> {
        debug!(url, "requesting list");
        let value: Value = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request {}", url))?
            .error_for_status()
            .with_context(|| format!("fetch {}", url))?
            .json()
            .with_context(|| format!("decode {}", url))?;
        parse_token_list(value)
    }
}

/// Routes `http(s)://` URLs to [`HttpSource`] and everything else to [`FileSource`].
#[derive(Debug, Clone)]
pub struct DefaultSource {
    file: FileSource,
    http: HttpSource,
}

impl DefaultSource {
    pub fn new(base_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            file: FileSource::new(base_dir),
            http: HttpSource::new(timeout)?,
        })
    }
}

impl ListSource for DefaultSource {
    fn fetch(&self, url: &str) -> Result<TokenList> {
        match url.split_once("://") {
            Some(("http" | "https", _)) => self.http.fetch(url),
            Some(("file", _)) | None => self.file.fetch(url),
            Some((scheme, _)) => bail!("unsupported list url scheme '{}'", scheme),
        }
    }
}

/// Validate a raw payload against the token list schema, then deserialize it.
pub fn parse_token_list(value: Value) -> Result<TokenList> {
    let validator = token_list_validator()?;
    let messages = validator
        .iter_errors(&value)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    if !messages.is_empty() {
        bail!("token list schema validation failed: {}", messages.join("; "));
    }
    serde_json::from_value(value).context("deserialize token list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{stub_token_list, token, write_list_file};

    #[test]
    fn file_source_reads_relative_and_file_urls() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut list = stub_token_list();
        list.tokens = vec![token(1, "0xa", "AAA")];
        let path = write_list_file(temp.path(), "list.json", &list).expect("write");

        let source = FileSource::new(temp.path());
        assert_eq!(source.fetch("list.json").expect("relative"), list);
        let url = format!("file://{}", path.display());
        assert_eq!(source.fetch(&url).expect("file url"), list);
    }

    #[test]
    fn missing_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = FileSource::new(temp.path())
            .fetch("nope.json")
            .expect_err("missing");
        assert!(format!("{err:#}").contains("nope.json"));
    }

    /// Every fetch shares one compiled schema.
    #[test]
    fn schema_is_compiled_once() {
        let first = token_list_validator().expect("bundled schema compiles");
        let second = token_list_validator().expect("bundled schema compiles");
        assert!(std::ptr::eq(first, second));
        assert!(parse_token_list(serde_json::to_value(stub_token_list()).expect("json")).is_ok());
    }

    #[test]
    fn schema_rejects_list_without_version() {
        let value = serde_json::json!({ "name": "x", "timestamp": "", "tokens": [] });
        let err = parse_token_list(value).expect_err("invalid");
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn default_source_rejects_unknown_scheme() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = DefaultSource::new(temp.path(), Duration::from_secs(1)).expect("source");
        let err = source.fetch("ipfs://abc").expect_err("unsupported");
        assert!(err.to_string().contains("ipfs"));
    }
}
