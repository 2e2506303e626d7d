use std::fs;

use anyhow::{Context, Result, bail};
use clap::Parser;

use skywatch_core::config::Config;
use skywatch_core::mail::{API_KEY_VAR, Mailer, Message};
use skywatch_core::report::{ToolInfo, render};
use skywatch_core::source::snapshot::SnapshotSource;

mod args;

fn main() -> Result<()> {
    env_logger::init();
    let args = args::Args::parse();

    let config = Config::load(&args.config)?;
    let source = SnapshotSource::from_path(&args.snapshot)?;

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let report = skywatch_core::run_report(&config, &source, tool)?;

    let output = match args.format {
        args::OutputFormat::Html => render::render_html(&report),
        args::OutputFormat::Text => render::render_text(&report),
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    if args.no_output {
        print!("{output}");
    } else {
        fs::write(&args.output, &output)
            .with_context(|| format!("failed to write report to {}", args.output.display()))?;
    }

    if args.email {
        send_report(&config, &report.title, render::render_html(&report))?;
    }

    Ok(())
}

fn send_report(config: &Config, subject: &str, html: String) -> Result<()> {
    let receivers = &config.general.receiver_emails.0;
    if receivers.is_empty() {
        bail!("no receiver addresses configured under general.receiver-email");
    }

    let api_key = std::env::var(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} must be set to send mail"))?;
    let mailer = Mailer::new(api_key);

    for to in receivers {
        let message = Message {
            from: config.general.sender_email.clone(),
            to: to.clone(),
            subject: subject.to_string(),
            html_body: html.clone(),
        };
        mailer.send(&message)?;
    }

    Ok(())
}
