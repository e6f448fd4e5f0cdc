use std::time::Instant;

use anyhow::Context;
use census_vuln::utils::arrow::{counties_to_record_batch, raw_schema};
use census_vuln::utils::io::write_parquet;
use census_vuln::utils::logging::console::{
    print_outliers, print_poverty_rates, print_schema_info, print_very_high_by_state,
    print_vulnerability,
};
use census_vuln::utils::logging::{create_spinner, finish_and_clear, finish_progress_bar};
use census_vuln::viz::{VizConfig, render_all};
use census_vuln::{AnalysisBuilder, CensusClient, CensusConfig};
use log::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = Instant::now();
    let config = CensusConfig::from_env().context("Failed to load configuration")?;
    debug!("{config}");

    // Fetch
    let client = CensusClient::new(&config)?;
    let spinner = create_spinner(Some("Fetching county census data..."));
    let response = client.fetch().await;
    finish_and_clear(&spinner);
    let response = response.with_context(|| format!("Failed to fetch {}", client.base_url()))?;

    println!("{}", response.status);
    println!("{}", response.preview);
    info!(
        "Fetched {} rows at {}",
        response.rows.len(),
        response.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(schema) = raw_schema(&response.rows)? {
        print_schema_info(&schema);
    }

    // Clean, derive, score, bucket, flag
    let spinner = create_spinner(Some("Scoring counties..."));
    let analysis = AnalysisBuilder::new()
        .with_config(config.analysis.clone())
        .build();
    let result = analysis.run(&response.rows);
    finish_progress_bar(&spinner, Some("Scoring complete"));
    let result = result.context("Vulnerability analysis failed")?;

    let batch = counties_to_record_batch(&result.counties)?;
    print_schema_info(&batch.schema());

    let n = config.preview_rows;
    print_poverty_rates(&batch, n)?;
    print_vulnerability(
        &format!("Top {n} most vulnerable counties:"),
        &batch,
        &result.top_vulnerable_indices(n),
    )?;
    print_vulnerability(
        "Priority scores:",
        &batch,
        &(0..n.min(batch.num_rows())).collect::<Vec<_>>(),
    )?;
    print_very_high_by_state(&result.very_high_by_state())?;
    print_outliers(&batch, &result.outlier_indices())?;
    debug!("\n{}", result.summary(n));

    if let Some(path) = &config.export_parquet {
        write_parquet(path, &batch)
            .with_context(|| format!("Failed to export {}", path.display()))?;
    }

    if config.render_plots {
        let viz = VizConfig {
            output_dir: config.output_dir.clone(),
            ..VizConfig::default()
        };
        let written = render_all(&result, &viz).context("Failed to render plots")?;
        info!("Rendered {} plots to {}", written.len(), viz.output_dir.display());
    }

    info!("Done in {:?}", start.elapsed());
    Ok(())
}
