use std::env;

/// Which record store backs the application.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// The remote record-keeping API, reached over HTTP.
    Remote { base_url: String },
    /// An in-memory store standing in for the remote API.
    Memory { demo_data: bool },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend = match env::var("OUTLAY_STORE").as_deref() {
            Ok("remote") => {
                let base_url = match env::var("OUTLAY_API_BASE_URL") {
                    Ok(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
                    _ => panic!(
                        "OUTLAY_STORE=remote requires OUTLAY_API_BASE_URL to point at the \
                         record-keeping API (e.g. https://records.example.com)."
                    ),
                };
                StoreBackend::Remote { base_url }
            }
            Ok("memory") => StoreBackend::Memory {
                demo_data: env::var("OUTLAY_DEMO_DATA")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
            Ok(other) => panic!(
                "Invalid OUTLAY_STORE: expected 'remote' or 'memory', got '{}'.",
                other
            ),
            Err(_) => panic!(
                "OUTLAY_STORE environment variable is not set. Set 'remote' (with \
                 OUTLAY_API_BASE_URL) or 'memory' to pick a record store."
            ),
        };

        Self {
            host: env::var("OUTLAY_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("OUTLAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7080),
            backend,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
