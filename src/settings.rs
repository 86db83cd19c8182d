use serde::{Deserialize, Serialize};

use layerconf::{Configurable, Walker};

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSettings {
    pub server: ServerSettings,
    pub tls: Option<TlsSettings>,
    pub log: LogSettings,
    pub allowed_origins: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TlsSettings {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_ms: 30_000,
            },
            tls: None,
            log: LogSettings {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            allowed_origins: Vec::new(),
            dry_run: false,
        }
    }
}

impl Configurable for ServiceSettings {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        walker.nested("Server", &mut self.server);
        walker.nested("TLS", &mut self.tls);
        walker.nested("Log", &mut self.log);
        walker.field_with_help(
            "AllowedOrigins",
            "JSON array of origins allowed by CORS",
            &mut self.allowed_origins,
        );
        walker.field_with_help("DryRun", "Report changes without applying them", &mut self.dry_run);
    }
}

impl Configurable for ServerSettings {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        walker.field_with_help("Host", "Address to bind", &mut self.host);
        walker.field_with_help("Port", "Port to listen on", &mut self.port);
        walker.field("RequestTimeoutMs", &mut self.request_timeout_ms);
    }
}

impl Configurable for TlsSettings {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        walker.field_with_help("CertPath", "PEM certificate chain", &mut self.cert_path);
        walker.field_with_help("KeyPath", "PEM private key", &mut self.key_path);
    }
}

impl Configurable for LogSettings {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        walker.field("Level", &mut self.level);
        walker.field_with_help("Format", "pretty or json", &mut self.format);
    }
}
