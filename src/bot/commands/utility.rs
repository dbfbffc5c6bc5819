//! Utility Discord commands - backend and database health.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        backend::client::describe_status,
        bot::{BotData, COLOR_ERROR, COLOR_SUCCESS},
        config::database,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::error;

    const STATUS_FOOTER: &str = "NerdHub Discord Bot";

    /// Short status label and error text for a failed health check.
    fn failure_details(error: &Error, timeout: Duration) -> (String, String) {
        match error {
            Error::Backend { status, message } => (
                status.to_string(),
                format!("HTTP {}: {message}", describe_status(*status)),
            ),
            Error::Http(e) if e.is_timeout() => (
                "Unknown".to_string(),
                format!("Connection timeout (>{}s)", timeout.as_secs()),
            ),
            Error::Http(e) if e.is_connect() => {
                ("Unknown".to_string(), "Network connection failed".to_string())
            }
            other => ("Unknown".to_string(), other.to_string()),
        }
    }

    /// Checks the connection between the bot and the NerdHub backend.
    #[poise::command(slash_command, rename = "connection-status")]
    pub async fn connection_status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let data = ctx.data();
        let backend_url = data.backend.base_url().to_string();
        let timeout = Duration::from_secs(data.config.backend.health_timeout_secs);

        let embed = match data.backend.health(timeout).await {
            Ok(check) => {
                let backend_time = check.report.timestamp.map_or_else(
                    || "Unknown".to_string(),
                    |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                );
                serenity::CreateEmbed::default()
                    .title("✅ Connection Status: Healthy")
                    .description("Successfully connected to NerdHub backend!")
                    .field("🌐 Backend URL", backend_url, true)
                    .field(
                        "⏱️ Response Time",
                        format!("{}ms", check.elapsed.as_millis()),
                        true,
                    )
                    .field("📊 Status Code", check.status_code.to_string(), true)
                    .field("🕐 Backend Timestamp", backend_time, true)
                    .field("🔧 Service", check.report.service, true)
                    .field(
                        "📋 Version",
                        check.report.version.unwrap_or_else(|| "Unknown".to_string()),
                        true,
                    )
                    .field("💚 Status", check.report.status, false)
                    .color(COLOR_SUCCESS)
            }
            Err(e) => {
                error!("Backend connection error: {}", e);
                let (status_code, message) = failure_details(&e, timeout);
                serenity::CreateEmbed::default()
                    .title("❌ Connection Status: Unhealthy")
                    .description("Failed to connect to NerdHub backend!")
                    .field("🌐 Backend URL", backend_url, true)
                    .field("📊 Status Code", status_code, true)
                    .field("❗ Error", message, false)
                    .field(
                        "🔧 Troubleshooting",
                        "• Check if backend is running\n• Verify BACKEND_URL in .env\n• Check network connectivity",
                        false,
                    )
                    .color(COLOR_ERROR)
            }
        }
        .footer(serenity::CreateEmbedFooter::new(STATUS_FOOTER))
        .timestamp(serenity::Timestamp::now());

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the current local database connection status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dbstatus(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let status = if database::is_connected(&ctx.data().database).await {
            "Connected"
        } else {
            "Disconnected"
        };

        ctx.say(format!("Current database connection status: {status}"))
            .await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_failure_details_for_backend_status() {
            let error = Error::Backend {
                status: 503,
                message: "down for maintenance".to_string(),
            };
            let (code, message) = failure_details(&error, Duration::from_secs(5));
            assert_eq!(code, "503");
            assert_eq!(message, "HTTP 503 Service Unavailable: down for maintenance");
        }

        #[test]
        fn test_failure_details_for_other_errors() {
            let error = Error::Config {
                message: "no url".to_string(),
            };
            let (code, message) = failure_details(&error, Duration::from_secs(5));
            assert_eq!(code, "Unknown");
            assert!(message.contains("no url"));
        }
    }
}

// Re-export all commands
pub use inner::*;
