//! HTTP transport used by the solver.
//!
//! The solver only needs three request shapes, so they are expressed as a
//! small trait. [`HttpTransport`] is the real implementation on top of
//! `rquest`; tests and embedders can substitute their own.

use crate::error::TransportError;
use async_trait::async_trait;
use rquest::{Client, Proxy};

/// Query-string or form fields, in send order.
pub type Params = [(String, String)];

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url?query` and return the body as text.
    async fn get_text(&self, url: &str, query: &Params) -> Result<String, TransportError>;

    /// GET `url` and return the raw body bytes.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// POST an urlencoded `form` to `url?query` and return the body as text.
    async fn post_form(
        &self,
        url: &str,
        query: &Params,
        form: &Params,
    ) -> Result<String, TransportError>;
}

/// [`Transport`] backed by an `rquest` client. Non-2xx responses are errors.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_proxy(None)
    }

    /// Route all traffic through an HTTP or SOCKS5 proxy.
    ///
    /// # Examples
    /// ```ignore
    /// HttpTransport::with_proxy(Some("socks5://127.0.0.1:1080"))
    /// ```
    pub fn with_proxy(proxy: Option<&str>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(proxy_url) = proxy {
            builder = builder.proxy(Proxy::all(proxy_url)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str, query: &Params) -> Result<String, TransportError> {
        let text = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }

    async fn post_form(
        &self,
        url: &str,
        query: &Params,
        form: &Params,
    ) -> Result<String, TransportError> {
        let text = self
            .client
            .post(url)
            .query(query)
            .form(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport that replays canned bodies and records every call.

    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub method: &'static str,
        pub url: String,
        pub query: Vec<(String, String)>,
        pub form: Vec<(String, String)>,
    }

    impl Call {
        pub fn param(&self, name: &str) -> Option<&str> {
            self.query
                .iter()
                .chain(self.form.iter())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<String, TransportError>>>,
        /// Served once `replies` runs dry
        fallback: Option<String>,
        images: HashMap<String, Vec<u8>>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, body: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(body.into()));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(TransportError::custom(message.to_string())));
            self
        }

        pub fn otherwise(mut self, body: impl Into<String>) -> Self {
            self.fallback = Some(body.into());
            self
        }

        pub fn image(mut self, url: &str, bytes: &[u8]) -> Self {
            self.images.insert(url.to_string(), bytes.to_vec());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of `action=get` requests seen.
        pub fn polls(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| c.param("action") == Some("get"))
                .count()
        }

        fn record(&self, method: &'static str, url: &str, query: &Params, form: &Params) {
            self.calls.lock().unwrap().push(Call {
                method,
                url: url.to_string(),
                query: query.to_vec(),
                form: form.to_vec(),
            });
        }

        fn next(&self) -> Result<String, TransportError> {
            match self.replies.lock().unwrap().pop_front() {
                Some(reply) => reply,
                None => self
                    .fallback
                    .clone()
                    .ok_or_else(|| TransportError::custom("no scripted reply left")),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get_text(&self, url: &str, query: &Params) -> Result<String, TransportError> {
            self.record("GET", url, query, &[]);
            self.next()
        }

        async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            self.record("GET", url, &[], &[]);
            self.images
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::custom(format!("wrong url: {}", url)))
        }

        async fn post_form(
            &self,
            url: &str,
            query: &Params,
            form: &Params,
        ) -> Result<String, TransportError> {
            self.record("POST", url, query, form);
            self.next()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let transport = ScriptedTransport::new().reply("a").reply("b").otherwise("z");
        assert_eq!(transport.get_text("u", &[]).await.unwrap(), "a");
        assert_eq!(transport.post_form("u", &[], &[]).await.unwrap(), "b");
        assert_eq!(transport.get_text("u", &[]).await.unwrap(), "z");
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_script_errors() {
        let transport = ScriptedTransport::new();
        assert!(matches!(
            transport.get_text("u", &[]).await,
            Err(TransportError::Custom(_))
        ));
    }
}
