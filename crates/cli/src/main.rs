use anyhow::Result;

use titanium_cli::{Config, Session};

fn main() -> Result<()> {
    let config = Config::from_env();
    titanium_observability::init(config.log_format);

    if let Some(raw) = config.rejected_log_format() {
        tracing::warn!(value = raw, "unknown log format; using the default");
    }

    tracing::info!(prefix = %config.prefix, "starting console session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&config, stdin.lock(), stdout.lock());
    session.run()?;

    tracing::info!(devices = session.registry().len(), "console session ended");
    Ok(())
}
