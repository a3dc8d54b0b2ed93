// stockdb/src/main.rs

mod cli;
mod menu;

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let level: tracing::level_filters::LevelFilter = log_level
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", log_level, e))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    anyhow::Ok(())
}

fn main() -> anyhow::Result<()> {
    let start_time = std::time::Instant::now();

    let args = cli::Args::parse();
    let mut settings = match &args.config {
        Some(path) => stockdb_core::Settings::load(path)?,
        None => stockdb_core::Settings::default(),
    };
    if let Some(data) = &args.data {
        settings.data_path = data.display().to_string();
    }

    init_logging(&settings.log_level)?;

    let mut store = stockdb_core::StockStore::new();
    stockdb_core::load_csv(&settings.data_path, &mut store)?;
    tracing::info!(
        records = store.len(),
        "Dataset ready in {:.3} seconds",
        start_time.elapsed().as_secs_f64()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(&mut store, settings.limits, &mut stdin.lock(), &mut stdout.lock())?;

    anyhow::Ok(())
}
