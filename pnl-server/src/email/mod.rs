use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outbound email delivery via SES
#[derive(Clone)]
pub struct EmailService {
    client: SesClient,
    from: String,
}

impl EmailService {
    pub fn new(client: SesClient, from: String) -> Self {
        Self { client, from }
    }

    /// Send a user login export to a recipient. `body_text` is the fully
    /// composed plain-text body, message plus user list.
    pub async fn send_user_logins(&self, to: &str, body_text: &str) -> Result<(), BoxError> {
        let subject = Content::builder().data("User Login Information").build()?;

        let body = Body::builder()
            .text(Content::builder().data(body_text).build()?)
            .build();

        let message = Message::builder().subject(subject).body(body).build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        tracing::info!(to = to, "User login export sent");
        Ok(())
    }
}
