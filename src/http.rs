// ============================================================================
// HTTP Port
// ============================================================================
// The wallhaven source only needs "GET this URL, give me status + body".
// Keeping that behind a trait lets the fetch logic run against a fake.
// ============================================================================

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;

pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Blocking reqwest client used by the real program
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("random-wallpaper/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(ReqwestClient { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{HttpClient, HttpResponse};
    use crate::error::Result;

    /// Answers GETs from a queue and remembers every URL asked for
    #[derive(Default)]
    pub struct ScriptedClient {
        responses: RefCell<VecDeque<HttpResponse>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl ScriptedClient {
        pub fn new() -> Self {
            ScriptedClient::default()
        }

        pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
            self.responses.borrow_mut().push_back(HttpResponse {
                status,
                body: body.into(),
            });
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl HttpClient for ScriptedClient {
        fn get(&self, url: &str) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(url.to_string());
            let next = self.responses.borrow_mut().pop_front();
            Ok(next.unwrap_or(HttpResponse {
                status: 599,
                body: Vec::new(),
            }))
        }
    }
}
