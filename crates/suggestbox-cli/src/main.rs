use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use suggestbox_core::error::ExitCode;
use suggestbox_core::{
    AppConfig, Messages, ResponsePolicy, StaticEngine, SuggestboxError, SuggestionEngine,
};
use suggestbox_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "suggestbox",
    about = "Debounced autocomplete over a fixed list of candidates",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format. Also enabled by setting SUGGESTBOX_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the standard location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override widget.debounce_ms.
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Override widget.lookup_delay_ms.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Override widget.policy (latest-only | last-resolved).
    #[arg(long, global = true)]
    policy: Option<ResponsePolicy>,

    /// Override logging.file (TUI mode only).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive widget (the default).
    Tui,

    /// Run one lookup and print the matches.
    Suggest {
        query: String,
        /// Skip the simulated lookup delay.
        #[arg(long)]
        no_delay: bool,
    },

    /// List the candidate set.
    Candidates,

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all config values.
    List,
    /// Get a specific config key.
    Get { key: String },
    /// Print the config file path.
    Path,
    /// Write the effective config to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("SUGGESTBOX_JSON").as_deref() == Ok("1");

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .unwrap_or_else(|err| invalid_config(&err, json_output));
    apply_overrides(&mut config, &cli);
    if let Err(err) = config.validate() {
        invalid_config(&err, json_output);
    }

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    if interactive {
        init_logging(&config, Some(&config.log_path()))?;
    } else {
        init_logging(&config, None)?;
    }
    debug!(path = %config_path.display(), "config loaded");

    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        None | Some(Commands::Tui) => {
            let _guard = runtime.enter();
            let tick = Duration::from_millis(config.ui.tick_ms.max(1));
            let mut app = App::new(config);
            suggestbox_tui::run_tui(&mut app, tick)?;
        }

        Some(Commands::Suggest { query, no_delay }) => {
            let delay = if no_delay {
                Duration::ZERO
            } else {
                config.lookup_delay()
            };
            let engine = StaticEngine::new(config.candidate_set(), delay);
            let matches = runtime.block_on(engine.suggest(&query))?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": matches, "total": matches.len(), "query": query },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if query.trim().is_empty() {
                println!("{}", Messages::default().start_typing());
            } else if matches.is_empty() {
                let messages = Messages::new(config.ui.title.clone(), config.candidates.noun.clone());
                println!("{}", messages.no_matches(&query));
            } else {
                for item in &matches {
                    println!("{item}");
                }
            }
        }

        Some(Commands::Candidates) => {
            let set = config.candidate_set();
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": set.items(), "total": set.len() },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                for item in set.items() {
                    println!("{item}");
                }
            }
        }

        Some(Commands::Config { action }) => {
            let dur = start.elapsed().as_millis();
            match action {
                ConfigAction::List => {
                    let kv = config_key_values(&config);
                    if json_output {
                        let data: serde_json::Map<String, serde_json::Value> = kv
                            .iter()
                            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                            .collect();
                        print_json(&serde_json::json!({"status":"ok","data":data,"meta":{"duration_ms":dur}}))?;
                    } else {
                        for (k, v) in &kv {
                            println!("{k} = {v}");
                        }
                    }
                }
                ConfigAction::Get { key } => {
                    let kv = config_key_values(&config);
                    match kv.iter().find(|(k, _)| *k == key) {
                        Some((_, val)) => {
                            if json_output {
                                print_json(&serde_json::json!({"status":"ok","data":{"key":key,"value":val},"meta":{"duration_ms":dur}}))?;
                            } else {
                                println!("{val}");
                            }
                        }
                        None => {
                            if json_output {
                                print_json(&serde_json::json!({"status":"error","error":"not_found","message":format!("Unknown config key: {key}"),"meta":{"duration_ms":dur}}))?;
                            } else {
                                eprintln!("Unknown config key: {key}");
                            }
                            std::process::exit(ExitCode::NotFound as i32);
                        }
                    }
                }
                ConfigAction::Path => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":config_path},"meta":{"duration_ms":dur}}))?;
                    } else {
                        println!("{}", config_path.display());
                    }
                }
                ConfigAction::Init { force } => {
                    if config_path.exists() && !force {
                        eprintln!(
                            "Config already exists at {}. Use --force to overwrite.",
                            config_path.display()
                        );
                        std::process::exit(ExitCode::GeneralError as i32);
                    }
                    config.save_to(&config_path)?;
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":config_path},"meta":{"duration_ms":dur}}))?;
                    } else {
                        println!("Wrote {}", config_path.display());
                    }
                }
            }
        }
    }

    Ok(())
}

/// Bad config file or override values: report and exit with `InvalidArgs`.
fn invalid_config(err: &SuggestboxError, json_output: bool) -> ! {
    if json_output {
        let _ = print_json(&serde_json::json!({"status":"error","error":"invalid_config","message":err.to_string()}));
    } else {
        eprintln!("Invalid configuration: {err}");
    }
    std::process::exit(ExitCode::InvalidArgs as i32);
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(ms) = cli.debounce_ms {
        config.widget.debounce_ms = ms;
    }
    if let Some(ms) = cli.delay_ms {
        config.widget.lookup_delay_ms = ms;
    }
    if let Some(policy) = cli.policy {
        config.widget.policy = policy;
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.to_string_lossy().to_string());
    }
}

/// Stderr for one-shot commands; a file in TUI mode so the screen stays clean.
fn init_logging(config: &AppConfig, file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env("SUGGESTBOX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let log = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(log)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn config_key_values(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("widget.debounce_ms", config.widget.debounce_ms.to_string()),
        ("widget.lookup_delay_ms", config.widget.lookup_delay_ms.to_string()),
        ("widget.blur_grace_ms", config.widget.blur_grace_ms.to_string()),
        ("widget.policy", config.widget.policy.to_string()),
        ("candidates.items", config.candidate_set().joined()),
        ("candidates.noun", config.candidates.noun.clone()),
        ("ui.title", config.ui.title.clone()),
        ("ui.max_visible", config.ui.max_visible.to_string()),
        ("ui.tick_ms", config.ui.tick_ms.to_string()),
        ("logging.level", config.logging.level.clone()),
        ("logging.file", config.log_path().to_string_lossy().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "suggestbox",
            "--debounce-ms",
            "50",
            "--policy",
            "last-resolved",
            "suggest",
            "an",
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.widget.debounce_ms, 50);
        assert_eq!(config.widget.policy, ResponsePolicy::LastResolved);
        assert!(matches!(cli.command, Some(Commands::Suggest { ref query, no_delay: false }) if query == "an"));
    }

    #[test]
    fn test_out_of_range_override_fails_validation() {
        let cli = Cli::parse_from(["suggestbox", "--debounce-ms", "600000", "candidates"]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);
        assert!(matches!(config.validate(), Err(SuggestboxError::ConfigError(_))));
        assert_eq!(ExitCode::InvalidArgs as i32, 3);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["suggestbox", "--policy", "newest"]).is_err());
    }

    #[test]
    fn test_config_key_values_cover_sections() {
        let kv = config_key_values(&AppConfig::default());
        let get = |key: &str| kv.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone());
        assert_eq!(get("widget.debounce_ms").as_deref(), Some("200"));
        assert_eq!(get("widget.policy").as_deref(), Some("latest-only"));
        assert_eq!(
            get("candidates.items").as_deref(),
            Some("apple, banana, cherry, date, elderberry, fig")
        );
    }
}
