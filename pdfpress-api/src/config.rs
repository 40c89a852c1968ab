use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Server settings, read from flags or the environment
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pdfpress-api",
    about = "HTTP endpoint that strips PDF metadata and repacks uploads",
    version
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "PDFPRESS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted request body, in megabytes
    #[arg(long, env = "PDFPRESS_MAX_UPLOAD_MB", default_value_t = 200)]
    pub max_upload_mb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            max_upload_mb: 200,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(BYTES_PER_MB)).unwrap_or(usize::MAX)
    }
}
