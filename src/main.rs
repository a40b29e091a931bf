use anyhow::Context;
use clap::Parser;
use portfolio_content::config::cli::Command;
use portfolio_content::domain::model::{ApiResponse, ContactForm, EventData};
use portfolio_content::utils::error::ErrorSeverity;
use portfolio_content::utils::{logger, validation::Validate};
use portfolio_content::{
    AnalyticsTracker, BundledContent, CliConfig, ContactService, ContentService, HttpTransport,
    PortfolioError,
};
use serde::Serialize;
use std::sync::Arc;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_with(e: &PortfolioError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium | ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        exit_with(&e);
    }
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let (store, credentials) = cli.stores(&config);

    let bundled = BundledContent::load(config.bundled_dir.as_deref())
        .context("failed to load bundled content")?;
    let remote = Arc::new(HttpTransport::new(&config, credentials)?);

    match cli.command {
        Command::Projects { featured } => {
            let content = ContentService::new(remote, store, bundled, &config);
            let projects = if featured {
                content.get_featured_projects().await
            } else {
                content.get_projects().await
            };
            print_json(&projects)?;
        }
        Command::Project { id } => {
            let content = ContentService::new(remote, store, bundled, &config);
            match content.get_project_by_id(id).await {
                Some(project) => print_json(&project)?,
                None => {
                    eprintln!("❌ No project with id {}", id);
                    std::process::exit(1);
                }
            }
        }
        Command::Experience => {
            let content = ContentService::new(remote, store, bundled, &config);
            print_json(&content.get_experience().await)?;
        }
        Command::Skills { grouped } => {
            let content = ContentService::new(remote, store, bundled, &config);
            if grouped {
                print_json(&content.get_skills_by_category().await)?;
            } else {
                print_json(&content.get_skills().await)?;
            }
        }
        Command::Health => {
            let content = ContentService::new(remote, store, bundled, &config);
            let healthy = content.check_api_health().await;
            print_json(&serde_json::json!({ "healthy": healthy }))?;
            if !healthy {
                std::process::exit(1);
            }
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let contact = ContactService::new(remote.clone(), &config);
            let tracker = AnalyticsTracker::new(remote, &config);
            let form = ContactForm {
                name,
                email,
                message,
            };

            match contact.submit(&form).await {
                Ok(ApiResponse::Success(ack)) => {
                    if let Some(handle) = tracker.track_contact_submit() {
                        handle.await?;
                    }
                    println!("✅ Message sent successfully!");
                    if !ack.message.is_empty() {
                        println!("{}", ack.message);
                    }
                }
                Ok(ApiResponse::Failure(failure)) => {
                    tracing::debug!("Contact submission failure: {}", failure);
                    eprintln!("❌ Failed to send message. Please try again later.");
                    std::process::exit(1);
                }
                Err(e) => exit_with(&e),
            }
        }
        Command::Track {
            event,
            page,
            project_id,
            project_title,
        } => {
            let tracker = AnalyticsTracker::new(remote, &config);
            let mut data = EventData::new();
            if let Some(page) = page {
                data.insert("page".to_string(), page.into());
            }
            if let Some(id) = project_id {
                data.insert("project_id".to_string(), id.into());
            }
            if let Some(title) = project_title {
                data.insert("project_title".to_string(), title.into());
            }
            let data = (!data.is_empty()).then_some(data);
            tracker.track_event(event.into(), data).await;
        }
    }

    Ok(())
}
