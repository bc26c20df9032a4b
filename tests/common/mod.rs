//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use notification_routes::config::ServiceConfig;
use notification_routes::notifications::NotificationHandlers;
use notification_routes::{HttpServer, RouteTable, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    /// Copy of the table the server dispatches through.
    pub table: RouteTable,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Absolute URL for a named route.
    pub fn url_for(&self, name: &str) -> String {
        self.url(&self.table.url_for(name, &[]).expect("route registered"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server for `config` with `handlers` bound to the notification endpoints.
pub async fn start_server(config: ServiceConfig, handlers: NotificationHandlers) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config, &handlers).expect("valid route table");
    let table = server.table().clone();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestServer {
        addr,
        shutdown,
        table,
    }
}

/// HTTP client without connection pooling or system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
