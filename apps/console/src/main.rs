use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use catalog::{
    facet_options, filter_apps, filter_articles, render_article, seed, ArticleFilter,
    CatalogFilter, Facet, LearningPath,
};
use clap::{Parser, Subcommand};
use client_core::{
    DashboardEvent, HttpVerificationApi, PlaygroundOutcome, SectionView, VerificationDashboard,
};
use shared::verification::{BenchmarkResult, PrivacyAuditResult, VerificationResult};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "verify-console", version, about = "Certified app catalog and verification dashboard")]
struct Cli {
    /// Verification service base URL; overrides console.toml and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog apps matching the given search and facets.
    Apps {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "All")]
        category: String,
        #[arg(long, default_value = "All")]
        hardware: String,
        #[arg(long, default_value = "All")]
        status: String,
    },
    /// Show the values accepted by each catalog facet.
    Facets,
    Articles {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "All")]
        category: String,
    },
    /// Print one article with its learning-path neighbours.
    Read { slug: String },
    /// Load verification results and benchmark, with offline fallbacks.
    Dashboard,
    /// Trigger a fresh verification run.
    Rerun,
    /// Run the three-step privacy audit.
    Audit,
    /// Show the service's cached privacy audit.
    Privacy,
    /// Send a signal to the prediction endpoint.
    Predict {
        /// Inline JSON payload `{"eeg_raw": [[...]], "sfreq": ...}`.
        #[arg(long, conflicts_with = "payload_file")]
        payload: Option<String>,
        #[arg(long)]
        payload_file: Option<PathBuf>,
    },
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url.clone() {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Apps {
            query,
            category,
            hardware,
            status,
        } => {
            let source = seed::apps()?;
            let filter = CatalogFilter::default()
                .with_query(query)
                .with_category(&category)
                .with_hardware(&hardware)
                .with_status(&status);
            let apps = filter_apps(&source, &filter);
            if apps.is_empty() {
                println!("No apps match the current filters.");
            }
            for app in apps {
                let featured = if app.featured { " *featured*" } else { "" };
                println!(
                    "{:<24} {:<10} {:<16} {:<18} by {}{featured}",
                    app.name,
                    app.certification_tier.as_str(),
                    app.status.as_str(),
                    app.hardware,
                    app.builder
                );
            }
        }
        Command::Facets => {
            let options = facet_options(&seed::apps()?);
            println!("categories: {}", options.categories.join(", "));
            println!("hardware:   {}", options.hardware.join(", "));
            println!("status:     {}", options.statuses.join(", "));
        }
        Command::Articles { query, category } => {
            let filter = ArticleFilter {
                query,
                category: Facet::parse(&category),
            };
            for article in filter_articles(&seed::articles()?, &filter) {
                println!(
                    "{:>2}. {:<40} [{}] {}",
                    article.order, article.title, article.category, article.slug
                );
            }
        }
        Command::Read { slug } => {
            let path = LearningPath::new(seed::articles()?)?;
            let article = path
                .get(&slug)
                .with_context(|| format!("no article with slug '{slug}'"))?;
            println!("{}", render_article(article));
            if let Some((position, total)) = path.position(&slug) {
                println!("\n-- lesson {position} of {total}");
            }
            if let Some(prev) = path.previous(&slug) {
                println!("<- previous: {} ({})", prev.title, prev.slug);
            }
            if let Some(next) = path.next(&slug) {
                println!("-> next: {} ({})", next.title, next.slug);
            }
        }
        Command::Dashboard => {
            let dashboard = connect(&settings.api_base_url)?;
            dashboard.load().await;
            print_results(&dashboard.results_view().await);
            print_benchmark(&dashboard.benchmark_view().await);
        }
        Command::Rerun => {
            let dashboard = connect(&settings.api_base_url)?;
            match dashboard.rerun_verification().await {
                Ok(_) => print_results(&dashboard.results_view().await),
                Err(err) => println!("Verification run failed: {}", err.display_message()),
            }
        }
        Command::Audit => {
            let dashboard = connect(&settings.api_base_url)?;
            let mut events = dashboard.subscribe_events();
            let printer = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    match event {
                        DashboardEvent::AuditProgress { step, label } => {
                            println!("[{step}/3] {label}")
                        }
                        DashboardEvent::AuditFailed { step, message } => {
                            println!("Audit aborted at step {step}: {message}");
                            break;
                        }
                        DashboardEvent::AuditCompleted(_) => break,
                        _ => {}
                    }
                }
            });
            let outcome = dashboard.run_privacy_audit().await;
            let _ = printer.await;
            if let Ok(audit) = outcome {
                print_privacy(&audit);
            }
        }
        Command::Privacy => {
            let dashboard = connect(&settings.api_base_url)?;
            match dashboard.refresh_privacy_results().await {
                Ok(audit) => print_privacy(&audit),
                Err(err) => println!("Privacy results unavailable: {}", err.display_message()),
            }
        }
        Command::Predict {
            payload,
            payload_file,
        } => {
            let payload = match payload_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read payload '{}'", path.display()))?,
                ),
                None => payload,
            };
            let dashboard = connect(&settings.api_base_url)?;
            match dashboard.predict(payload.as_deref()).await {
                PlaygroundOutcome::Predicted {
                    prediction,
                    latency_ms,
                    model_status,
                    channels,
                    samples,
                    generated_signal,
                } => {
                    let origin = if generated_signal { "synthetic" } else { "provided" };
                    println!("signal: {channels} channels x {samples} samples ({origin})");
                    println!("prediction: {prediction:.4}");
                    println!("latency: {latency_ms:.1} ms");
                    println!("model status: {model_status}");
                }
                PlaygroundOutcome::Failed { message } => println!("Prediction failed: {message}"),
            }
        }
        Command::Health => {
            let dashboard = connect(&settings.api_base_url)?;
            match dashboard.health().await {
                Ok(health) => println!("service status: {}", health.status),
                Err(err) => println!("service unavailable: {}", err.display_message()),
            }
        }
    }

    Ok(())
}

fn connect(api_base_url: &str) -> Result<Arc<VerificationDashboard>> {
    let api = HttpVerificationApi::new(api_base_url)?;
    tracing::debug!("console: using verification service at {}", api.base_url());
    Ok(VerificationDashboard::new(Arc::new(api)))
}

fn source_tag<T>(view: &SectionView<T>) -> &'static str {
    if view.is_live() {
        "live"
    } else {
        "published snapshot, service unavailable"
    }
}

fn print_results(view: &SectionView<VerificationResult>) {
    let overall = &view.data.overall;
    println!("Verification results ({})", source_tag(view));
    println!("  normalized error: {:.4}", overall.normalized_error);
    println!("  correlation:      {:.4}", overall.correlation);
    println!("  rmse / mse:       {:.4} / {:.4}", overall.rmse, overall.mse);
    println!(
        "  samples:          {} across {} subjects",
        overall.total_samples, overall.total_subjects
    );
}

fn print_benchmark(view: &SectionView<BenchmarkResult>) {
    let benchmark = &view.data;
    println!(
        "Benchmark ({}) - {} teams",
        source_tag(view),
        benchmark.total_teams
    );
    for entry in &benchmark.leaderboard {
        println!("  #{:<3} {:<20} {:.4}", entry.rank, entry.team, entry.score);
    }
    println!(
        "  ours: {:.4} (would rank #{})",
        benchmark.paragondao.score,
        benchmark.projected_rank()
    );
}

fn print_privacy(audit: &PrivacyAuditResult) {
    println!(
        "membership inference: {} (accuracy {:.3}, AUC {:.3})",
        audit.membership_inference.grade,
        audit.membership_inference.attack_accuracy,
        audit.membership_inference.auc_roc
    );
    println!(
        "model inversion:      {} (correlation {:.3}, mse {:.3})",
        audit.model_inversion.grade,
        audit.model_inversion.reconstruction_correlation,
        audit.model_inversion.reconstruction_mse
    );
    println!(
        "attribute inference:  {} (advantage {:.1}%, accuracy {:.3})",
        audit.attribute_inference.grade,
        audit.attribute_inference.advantage_percent,
        audit.attribute_inference.attack_accuracy
    );
    let verdict = if audit.privacy_certified {
        "certified"
    } else {
        "not certified"
    };
    println!(
        "overall: {} - {verdict} (tested {})",
        audit.overall_grade,
        audit.tested_at.to_rfc3339()
    );
}
