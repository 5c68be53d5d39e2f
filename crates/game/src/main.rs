//! careermap - terminal driver for the career map, story and job-match screens.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use careermap::shell::{self, HELP};
use careermap::{App, AppConfig, Flow, LocationRegistry};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();
    let registry = LocationRegistry::load_or_builtin(config.locations_path.as_deref());
    log::info!(
        "Starting careermap: {} locations, {} Hz, job match at {}",
        registry.len(),
        config.tick_rate_hz,
        config.job_match.base_url
    );

    let mut app = App::new(config, registry);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{HELP}").context("writing to stdout")?;
    for line in app.render() {
        writeln!(stdout, "{line}").context("writing to stdout")?;
    }

    for line in stdin.lock().lines() {
        let line = line.context("reading command from stdin")?;
        let command = match shell::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{e}").context("writing to stdout")?;
                continue;
            }
        };
        let (output, flow) = app.execute(command);
        for out in output {
            writeln!(stdout, "{out}").context("writing to stdout")?;
        }
        stdout.flush().context("flushing stdout")?;
        if flow == Flow::Quit {
            break;
        }
    }

    log::info!("careermap exiting after {} frames", app.time().frame_count());
    Ok(())
}
