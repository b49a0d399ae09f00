use backend::logging::{init_logging, LoggingConfig};
use backend::system::WindowConfig;

mod app;
mod scene;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut app = app::App::new();
    app.start(&WindowConfig::default())?;
    app.run()?;
    log::debug!("exiting in state {}", app.state());
    Ok(())
}
