pub mod config;
pub mod feed;
pub mod ingest;
pub mod store;

/// EPSG code of the geographic reference system every parcel is stored in.
pub const WGS84: i32 = 4326;

/// Initialize logging to the terminal and a timestamped file under logs/.
/// Every binary calls this before anything else.
pub fn log() {
    use simplelog::ColorChoice;
    use simplelog::CombinedLogger;
    use simplelog::ConfigBuilder;
    use simplelog::LevelFilter;
    use simplelog::TermLogger;
    use simplelog::TerminalMode;
    use simplelog::WriteLogger;
    let seconds = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_secs();
    let path = format!("logs/{}.log", seconds);
    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    std::fs::create_dir_all("logs").expect("logs directory");
    let file = std::fs::File::create(&path).expect("log file");
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, config, file),
    ])
    .expect("logger");
}
