//! Shared helpers for tests that talk to a running Contented server.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use contented_client::{
    ClientConfig, ContainerSummary, ContentApi, ContentedClient, PaginationParams,
};

/// Skip the test when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_server {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Test context: a client pointed at `CONTENTED_BASE_URL`.
pub struct TestContext {
    pub client: Arc<dyn ContentApi>,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("CONTENTED_BASE_URL").ok()?;
        let client = ContentedClient::new(ClientConfig::with_base_url(base_url)).ok()?;
        Some(Self {
            client: Arc::new(client),
        })
    }

    /// First container on the server holding at least `min_total` items.
    pub async fn find_container(&self, min_total: usize) -> Option<ContainerSummary> {
        let response = self
            .client
            .list_containers(&PaginationParams::default())
            .await
            .ok()?;
        response.results.into_iter().find(|c| c.total >= min_total)
    }
}
