use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use lrp_toolkit::compliance;
use lrp_toolkit::config::Config;
use lrp_toolkit::i18n::{
    FilePreferenceStore, FsLocaleLoader, HttpLocaleLoader, LocaleLoader, LoggingDocumentBinding,
    TranslationProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lrp_toolkit=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let document_path = std::env::args()
        .nth(1)
        .context("Usage: lrp-validate <document> [response]")?;
    let response_path = std::env::args().nth(2);

    // Build the translation provider for report output
    let loader: Arc<dyn LocaleLoader> = if config.locales_source.starts_with("http") {
        Arc::new(HttpLocaleLoader::new(
            reqwest::Client::new(),
            config.locales_source.clone(),
        ))
    } else {
        Arc::new(FsLocaleLoader::new(config.locales_source.clone()))
    };
    let provider = TranslationProvider::new(
        loader,
        Arc::new(FilePreferenceStore::new(config.preference_file.clone())),
        Arc::new(LoggingDocumentBinding),
    );
    provider.init(config.reported_language.as_deref()).await;
    info!("Report language: {}", provider.current_language().code());

    // Step 1: score the document against the core rule table
    let document = std::fs::read_to_string(&document_path)
        .with_context(|| format!("Failed to read document {}", document_path))?;
    let result = compliance::document::validate(&document);

    let score = result.score.to_string();
    if result.compliant {
        println!(
            "{}",
            provider.translate_with("report.compliant", &[("score", &score)])
        );
    } else {
        println!(
            "{}",
            provider.translate_with("report.not_compliant", &[("score", &score)])
        );
    }
    for violation in &result.violations {
        println!("  {}", violation);
    }

    // Step 2: optionally check a downstream response against the protocol
    if let Some(response_path) = response_path {
        let response = std::fs::read_to_string(&response_path)
            .with_context(|| format!("Failed to read response {}", response_path))?;
        let verdict = compliance::response::validate(&response);

        if verdict.valid {
            println!("{}", provider.translate("report.response_valid"));
        } else {
            println!("{}", provider.translate("report.response_invalid"));
            if let Some(error) = &verdict.error {
                println!("  {}", error);
            }
        }
    }

    if !result.compliant {
        warn!("Document is not compliant (score {})", result.score);
        std::process::exit(1);
    }

    Ok(())
}
