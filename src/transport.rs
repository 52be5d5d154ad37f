//! Blocking HTTP GET seam shared by the REST client and the schedule archive loader.

use std::time::Duration;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything able to perform a blocking GET. Network failures are errors; any received status,
/// successful or not, is a response.
pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl HttpTransport for reqwest::blocking::Client {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = reqwest::blocking::Client::get(self, url).send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

pub(crate) fn blocking_client(timeout: Option<Duration>, user_agent: &str) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(user_agent.to_owned());
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
