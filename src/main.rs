use anyhow::Context;
use clap::Parser;
use trendspec::domain::ports::ConfigProvider;
use trendspec::utils::error::{ErrorSeverity, TrendError};
use trendspec::utils::{logger, validation::Validate};
use trendspec::{build_engine, CancellationToken, CliConfig, TomlConfig, TrendPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting trendspec");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail_validation(&e),
    };

    if let Err(e) = config.validate().and_then(|_| config.form().validate()) {
        fail_validation(&e);
    }

    tracing::info!("✅ Configuration loaded and validated");

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        print_dry_run(&config)?;
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("🔶 Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let engine = build_engine(&config);
    match engine.run_with_cancel(&config.form(), &cancel).await {
        Ok(report) => {
            println!(
                "✅ {} projects generated from {} ranked trends",
                report.payload.metadata.generated_count, report.payload.metadata.filtered
            );
            for file in &report.written {
                println!("📁 {}/{}", config.output_path(), file);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match (&e, e.severity()) {
                (TrendError::Cancelled, _) => 130,
                (_, ErrorSeverity::Low) => 0,
                (_, ErrorSeverity::Medium) => 2,
                (_, ErrorSeverity::High) => 1,
                (_, ErrorSeverity::Critical) => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn fail_validation(e: &TrendError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn print_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let form = config.form();
    let resolved =
        toml::to_string_pretty(config).context("failed to render resolved configuration")?;
    println!("📋 Resolved configuration:\n{}", resolved);

    let analysis = TrendPipeline::builtin().analyze_trends(&form);
    println!(
        "📈 {} of {} trends for '{}' in '{}':",
        analysis.trends.len(),
        analysis.total_found,
        form.domain,
        form.country
    );
    for (rank, trend) in analysis.trends.iter().enumerate() {
        let marker = if trend.trend.is_high_performing() {
            " ⭐"
        } else {
            ""
        };
        println!(
            "  {}. {} ({} -> {}, {}){}",
            rank + 1,
            trend.name(),
            trend.trend.score,
            trend.adjusted_score,
            trend.trend.growth_rate,
            marker
        );
    }

    let complexity = form.complexity();
    println!(
        "🗓️  {} complexity, about {} weeks ({})",
        complexity.as_str(),
        complexity.estimated_weeks(),
        complexity.timeline()
    );

    let written: Vec<String> = match config.bundle_filename() {
        Some(bundle) => vec![bundle.to_string()],
        None => config.formats().iter().map(|f| f.file_name()).collect(),
    };
    println!("💾 Would write to {}: {}", config.output_path(), written.join(", "));
    Ok(())
}
