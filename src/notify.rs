use anyhow::anyhow;

/// Outbound notification sink. Fire-and-forget from the caller's standpoint:
/// a failed send is reported once and never retried here.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, chat_id: &str, text: &str) -> Result<(), anyhow::Error>;
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    token: String,
}

impl TelegramNotifier {
    pub fn new(token: String) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow!("Failed to build Telegram client: {}", e))?;

        Ok(Self { client, token })
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, chat_id: &str, text: &str) -> Result<(), anyhow::Error> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        let response = self
            .client
            .get(&url)
            .query(&[("chat_id", chat_id), ("text", text)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API error {}: {}", status, body);
        }

        Ok(())
    }
}
