use std::{env, fmt, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::{dates::DateLocale, error::AppError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    /// Base of every link we mail out, without a trailing slash.
    pub api_base_url: String,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub from_name: String,
    pub from_address: String,
    pub date_locale: DateLocale,
}

#[derive(Debug, Clone)]
pub enum MailTransport {
    Smtp {
        host: String,
        port: u16,
        credentials: Option<SmtpCredentials>,
        tls: bool,
    },
    /// Writes every message as an `.eml` file instead of delivering it.
    File { outbox_dir: PathBuf },
}

#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://planner.db?mode=rwc".to_string());
        let listen_addr: SocketAddr = var("APP_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3333".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let api_base_url =
            var("API_BASE_URL").unwrap_or_else(|| "http://localhost:3333".to_string());
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|err| AppError::Config(format!("invalid API_BASE_URL: {err}")))?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let mail = MailConfig::from_vars(&var)?;

        Ok(Self {
            database_url,
            listen_addr,
            api_base_url,
            mail,
        })
    }
}

impl MailConfig {
    fn from_vars<F>(var: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = match var("MAIL_TRANSPORT").as_deref().unwrap_or("file") {
            "file" => MailTransport::File {
                outbox_dir: var("MAIL_OUTBOX_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("outbox")),
            },
            "smtp" => {
                let host = var("SMTP_HOST").ok_or_else(|| {
                    AppError::Config("SMTP_HOST is required when MAIL_TRANSPORT=smtp".into())
                })?;
                let port = var("SMTP_PORT")
                    .map(|raw| raw.parse::<u16>())
                    .transpose()
                    .map_err(|err| AppError::Config(format!("invalid SMTP_PORT: {err}")))?
                    .unwrap_or(587);
                let credentials = match (var("SMTP_USERNAME"), var("SMTP_PASSWORD")) {
                    (Some(username), Some(password)) => Some(SmtpCredentials { username, password }),
                    (None, None) => None,
                    _ => {
                        return Err(AppError::Config(
                            "SMTP_USERNAME and SMTP_PASSWORD must be set together".into(),
                        ))
                    }
                };
                let tls = match var("SMTP_TLS").as_deref() {
                    None | Some("true") | Some("1") => true,
                    Some("false") | Some("0") => false,
                    Some(other) => {
                        return Err(AppError::Config(format!("invalid SMTP_TLS: {other}")))
                    }
                };
                MailTransport::Smtp {
                    host,
                    port,
                    credentials,
                    tls,
                }
            }
            other => {
                return Err(AppError::Config(format!(
                    "invalid MAIL_TRANSPORT: {other} (expected smtp or file)"
                )))
            }
        };

        let date_locale = var("MAIL_DATE_LOCALE")
            .map(|raw| raw.parse::<DateLocale>())
            .transpose()
            .map_err(|err| AppError::Config(format!("invalid MAIL_DATE_LOCALE: {err}")))?
            .unwrap_or_default();

        Ok(Self {
            transport,
            from_name: var("MAIL_FROM_NAME").unwrap_or_else(|| "Equipe plan.ner".to_string()),
            from_address: var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|| "planner@hausha.com".to_string()),
            date_locale,
        })
    }
}
