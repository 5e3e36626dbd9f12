use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 19090;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug)]
pub struct Config {
    host: String,
    port: u16,
    workers: Option<usize>,
    log_level: String,
}

impl Config {
    pub fn get_host(&self) -> &str {
        &self.host
    }
    pub fn get_port(&self) -> u16 {
        self.port
    }
    /// `None` leaves the worker count to actix (one per physical core).
    pub fn get_workers(&self) -> Option<usize> {
        self.workers
    }
    pub fn get_log_level(&self) -> &str {
        &self.log_level
    }
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

pub struct ConfigBuilder {
    host: String,
    port: u16,
    workers: Option<usize>,
    log_level: String,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let defaults = Config::default();
        Self {
            host: defaults.host,
            port: defaults.port,
            workers: defaults.workers,
            log_level: defaults.log_level,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_addr(self, addr: SocketAddr) -> Self {
        self.with_host(addr.ip().to_string()).with_port(addr.port())
    }

    pub fn build(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            workers: self.workers,
            log_level: self.log_level,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
