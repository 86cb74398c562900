use std::fs::{self, OpenOptions};
use std::sync::Arc;

use anyhow::Result;
use ai_monitor::ui::terminal_guard::install_panic_hook;
use ai_monitor::util::{self, SystemRunner, Tool, ToolAvailability};
use ai_monitor::{App, Config, GhCli, ProcessAgentDetector, Services};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to file (~/.ai-monitor/logs/ai-monitor.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    install_panic_hook();

    let config = Config::load();

    let tools = ToolAvailability::detect();
    for tool in tools.missing_tools() {
        tracing::warn!(tool = tool.binary_name(), hint = tool.install_hint(), "Tool not found");
    }
    for tool in Tool::all() {
        if let Some(path) = tools.path(*tool) {
            tracing::debug!(tool = tool.binary_name(), path = %path.display(), "Tool found");
        }
    }

    let runner = Arc::new(SystemRunner);
    let services = Services {
        agents: Arc::new(ProcessAgentDetector::new(
            config.agent_name.clone(),
            config.agent_pattern.clone(),
        )),
        tracker: Arc::new(GhCli::new(
            runner.clone(),
            config.owner.clone(),
            config.repo_limit,
            config.issue_limit,
        )),
        runner,
    };

    App::new(config, services).run().await
}
