//! Optional parameters sent along with an image.

use std::collections::BTreeMap;

/// Query fields the client always sets itself.
pub const RESERVED_FIELDS: [&str; 4] = ["key", "method", "json", "body"];

/// Per-captcha hints for the workers solving it.
///
/// Only the fields below and non-reserved `extra` entries reach the
/// request; `key`, `method`, `json` and `body` are always the client's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// 1 if the answer has two or more words
    pub phrase: Option<u8>,
    /// 1 if the answer is case sensitive
    pub regsense: Option<u8>,
    /// 1 digits only, 2 letters only, 3 either, 4 both
    pub numeric: Option<u8>,
    /// 1 if the image asks for a calculation
    pub calc: Option<u8>,
    pub min_len: Option<u32>,
    pub max_len: Option<u32>,
    /// 0 any, 1 cyrillic only, 2 latin only
    pub language: Option<u8>,
    /// Language code such as "en" or "ru"
    pub lang: Option<String>,
    pub textinstructions: Option<String>,
    pub soft_id: Option<String>,
    pub header_acao: Option<u8>,
    /// Callback URL notified when the answer is ready
    pub pingback: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phrase(mut self, phrase: bool) -> Self {
        self.phrase = Some(phrase as u8);
        self
    }

    pub fn case_sensitive(mut self, regsense: bool) -> Self {
        self.regsense = Some(regsense as u8);
        self
    }

    pub fn numeric(mut self, numeric: u8) -> Self {
        self.numeric = Some(numeric);
        self
    }

    pub fn calc(mut self, calc: bool) -> Self {
        self.calc = Some(calc as u8);
        self
    }

    pub fn length(mut self, min_len: u32, max_len: u32) -> Self {
        self.min_len = Some(min_len);
        self.max_len = Some(max_len);
        self
    }

    pub fn language(mut self, language: u8) -> Self {
        self.language = Some(language);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn instructions(mut self, text: impl Into<String>) -> Self {
        self.textinstructions = Some(text.into());
        self
    }

    pub fn soft_id(mut self, soft_id: impl Into<String>) -> Self {
        self.soft_id = Some(soft_id.into());
        self
    }

    pub fn header_acao(mut self, enabled: bool) -> Self {
        self.header_acao = Some(enabled as u8);
        self
    }

    pub fn pingback(mut self, url: impl Into<String>) -> Self {
        self.pingback = Some(url.into());
        self
    }

    /// Any other service parameter. Reserved names are dropped at send time.
    pub fn extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Append these options after the required fields already in `query`.
    pub(crate) fn merge_into(&self, query: &mut Vec<(String, String)>) {
        fn push<T: ToString>(query: &mut Vec<(String, String)>, name: &str, value: &Option<T>) {
            if let Some(value) = value {
                query.push((name.to_string(), value.to_string()));
            }
        }

        push(query, "phrase", &self.phrase);
        push(query, "regsense", &self.regsense);
        push(query, "numeric", &self.numeric);
        push(query, "calc", &self.calc);
        push(query, "min_len", &self.min_len);
        push(query, "max_len", &self.max_len);
        push(query, "language", &self.language);
        push(query, "lang", &self.lang);
        push(query, "textinstructions", &self.textinstructions);
        push(query, "soft_id", &self.soft_id);
        push(query, "header_acao", &self.header_acao);
        push(query, "pingback", &self.pingback);

        for (name, value) in &self.extra {
            if RESERVED_FIELDS.contains(&name.as_str()) {
                tracing::warn!(field = %name, "ignoring option that overrides a required field");
                continue;
            }
            if query.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            query.push((name.clone(), value.clone()));
        }
    }
}
