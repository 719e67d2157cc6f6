use anyhow::{Context, Result};

use excel_keywords::config::Config;
use excel_keywords::script::Script;
use excel_keywords::{DocumentSession, run_keyword};

fn main() -> Result<()> {
    // Parse configuration from command line
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.clone()),
    )
    .init();

    let script = Script::load(&config.script)?;
    log::info!(
        "running {} steps from {}",
        script.steps.len(),
        config.script.display()
    );

    let mut session = DocumentSession::new();
    for (idx, step) in script.steps.iter().enumerate() {
        log::info!("step {}: {}", idx + 1, step.keyword);
        let value = run_keyword(&mut session, &step.keyword, &step.args)
            .with_context(|| format!("step {} (`{}`) failed", idx + 1, step.keyword))?;
        if !config.quiet && !value.is_null() {
            println!("{}", value);
        }
    }

    log::info!("script finished, {} documents still open", session.document_count());
    Ok(())
}
