use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
use tracing::info;

use crate::config::Config;
use crate::log::LogStore;
use crate::routes;

/// A bound, not yet polled server and the addresses it listens on.
pub struct Running {
    pub server: Server,
    pub addrs: Vec<SocketAddr>,
}

/// Binds the service described by `config` around `store`.
///
/// The store is injected so tests and embedders can hold their own handle
/// to the collection.
pub fn bind(config: &Config, store: Arc<LogStore>) -> std::io::Result<Running> {
    let data = web::Data::from(store);
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    });
    if let Some(workers) = config.get_workers() {
        server = server.workers(workers);
    }

    let server = server.bind(config.bind_addr())?;
    let addrs = server.addrs();
    for addr in &addrs {
        info!("Server running in http://{}/", addr);
    }

    Ok(Running {
        server: server.run(),
        addrs,
    })
}
