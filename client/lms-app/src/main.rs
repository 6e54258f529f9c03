use lms_app::{AppContext, logger};

use std::error::Error;

use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = lms_config::Config::load()?;
    config.validate()?;

    let log_file_path = match config.logging.file {
        Some(ref filename) => Some(lms_config::Config::config_dir()?.join(filename)),
        None => None,
    };

    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting lms-app v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let context = AppContext::bootstrap(&config).await?;
    let mut header = context.header_view();
    let panel = context.notification_panel_view();
    let profile = context.profile_summary_view();

    info!("{}", header.render());
    info!("{}", profile.render());
    info!("{}", panel.render());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            alive = header.changed() => {
                if !alive {
                    break;
                }
                info!("{}", header.render());
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
