use catalog_edit::{cli, config, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());
    let cfg = load_config();
    telemetry::init(telemetry::TelemetryConfig::new(
        cli.verbose,
        cfg.logging.clone(),
    ));

    if let Err(e) = cli::run(cli, cfg) {
        tracing::error!("error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> config::Config {
    match config::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config load failed, using defaults: {err}");
            let mut cfg = config::Config::default();
            config::apply_env_overrides(&mut cfg);
            cfg
        }
    }
}
