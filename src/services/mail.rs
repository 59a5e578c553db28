use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    config::{MailConfig, MailTransport, SmtpCredentials},
    error::AppError,
};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("outbox write failed: {0}")]
    File(#[from] lettre::transport::file::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub from: Sender,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl MailMessage {
    /// Builds the lettre message along with the Message-ID it was stamped with.
    pub fn to_lettre(&self) -> Result<(Message, String), MailError> {
        let from_address: Address = self.from.address.parse()?;
        let message_id = format!("<{}@{}>", Uuid::new_v4(), from_address.domain());
        let from = Mailbox::new(Some(self.from.name.clone()), from_address);
        let to: Mailbox = self.to.parse()?;

        let email = Message::builder()
            .message_id(Some(message_id.clone()))
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(self.html.clone())?;
        Ok((email, message_id))
    }
}

/// What the transport tells us about a message it accepted.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub message_id: String,
    /// Somewhere a developer can look at the message, if the transport keeps one.
    pub preview: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<Delivery, MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<&SmtpCredentials>,
        tls: bool,
    ) -> Result<Self, MailError> {
        let mut builder = if tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        builder = builder.port(port);
        if let Some(creds) = credentials {
            builder = builder.credentials(Credentials::new(
                creds.username.clone(),
                creds.password.clone(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<Delivery, MailError> {
        let (email, message_id) = message.to_lettre()?;
        let response = self.transport.send(email).await?;
        debug!(code = ?response.code(), "smtp server accepted {message_id}");
        Ok(Delivery {
            message_id,
            preview: None,
        })
    }
}

pub struct FileMailer {
    transport: AsyncFileTransport<Tokio1Executor>,
    outbox_dir: PathBuf,
}

impl FileMailer {
    pub fn new(outbox_dir: PathBuf) -> Self {
        Self {
            transport: AsyncFileTransport::new(&outbox_dir),
            outbox_dir,
        }
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, message: MailMessage) -> Result<Delivery, MailError> {
        let (email, message_id) = message.to_lettre()?;
        let file_id = self.transport.send(email).await?;
        let path = self.outbox_dir.join(format!("{file_id}.eml"));
        Ok(Delivery {
            message_id,
            preview: Some(path.display().to_string()),
        })
    }
}

/// Builds the transport selected in config.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match &config.transport {
        MailTransport::Smtp {
            host,
            port,
            credentials,
            tls,
        } => {
            info!("mail transport: smtp via {host}:{port}");
            let mailer = SmtpMailer::new(host, *port, credentials.as_ref(), *tls)?;
            Ok(Arc::new(mailer))
        }
        MailTransport::File { outbox_dir } => {
            std::fs::create_dir_all(outbox_dir)?;
            info!("mail transport: writing messages to {}", outbox_dir.display());
            Ok(Arc::new(FileMailer::new(outbox_dir.clone())))
        }
    }
}
