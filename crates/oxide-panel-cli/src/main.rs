//! oxide-panel CLI
//!
//! Command-line tool for rendering and checking form definitions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_panel::{FormDefinition, OperationResult, RendererConfig, Values};

/// Back-office form rendering from declarative field trees.
#[derive(Parser)]
#[command(name = "oxide-panel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Renderer config file (JSON).
    #[arg(short, long, env = "OXIDE_PANEL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a form definition to HTML.
    Render {
        /// Form definition file (JSON).
        #[arg(short, long)]
        form: PathBuf,

        /// Values file (JSON object), replacing the definition's values.
        #[arg(long)]
        values: Option<PathBuf>,

        /// Render a success banner with this message.
        #[arg(long)]
        success: Option<String>,

        /// Render an error banner with this message (repeatable).
        #[arg(long = "error")]
        errors: Vec<String>,

        /// Run the definition's validators and render their outcome.
        #[arg(long)]
        validate: bool,

        /// Write the markup to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on unknown field types.
        #[arg(long)]
        strict: bool,
    },

    /// Report unknown field types in a form definition.
    Check {
        /// Form definition file (JSON).
        #[arg(short, long)]
        form: PathBuf,
    },
}

/// Banner requested on the command line.
#[derive(Debug, Default)]
struct BannerArgs {
    success: Option<String>,
    errors: Vec<String>,
    validate: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Render {
            form,
            values,
            success,
            errors,
            validate,
            output,
            strict,
        } => {
            let config = load_config(cli.config.as_deref(), strict)?;
            let banner = BannerArgs {
                success,
                errors,
                validate,
            };
            let html = render(&form, values.as_deref(), &banner, config)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Form written to {}", path.display());
                }
                None => println!("{html}"),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { form } => {
            let config = load_config(cli.config.as_deref(), true)?;
            let problems = check(&form, config)?;

            if problems.is_empty() {
                info!("{}: no problems found.", form.display());
                return Ok(ExitCode::SUCCESS);
            }
            for problem in &problems {
                warn!("{}: {problem}", form.display());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<RendererConfig> {
    let config = match path {
        Some(path) => RendererConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RendererConfig::default(),
    };
    // The flag only ever turns strict mode on.
    let strict = strict || config.strict;
    Ok(config.strict(strict))
}

fn load_definition(path: &Path) -> anyhow::Result<FormDefinition> {
    FormDefinition::from_path(path)
        .with_context(|| format!("failed to load form definition {}", path.display()))
}

fn load_values(path: &Path) -> anyhow::Result<Values> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read values {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid values in {}", path.display()))
}

/// Picks the banner: validation outcome, then explicit errors, then success.
fn operation_result(
    definition: &FormDefinition,
    values: &Values,
    banner: &BannerArgs,
) -> anyhow::Result<Option<OperationResult>> {
    if banner.validate {
        return Ok(Some(definition.validator_set()?.validate(values)));
    }
    if !banner.errors.is_empty() {
        return Ok(Some(OperationResult::failure(banner.errors.iter().cloned())));
    }
    Ok(banner.success.clone().map(OperationResult::success_with))
}

fn render(
    form: &Path,
    values: Option<&Path>,
    banner: &BannerArgs,
    config: RendererConfig,
) -> anyhow::Result<String> {
    let mut definition = load_definition(form)?;
    if let Some(path) = values {
        definition.values = load_values(path)?;
    }
    debug!(form = %definition.name, values = definition.values.len(), "loaded definition");

    let result = operation_result(&definition, &definition.values, banner)?;
    let renderer = definition.into_renderer(config)?;
    let html = renderer
        .render(result.as_ref(), None)
        .with_context(|| format!("failed to render {}", form.display()))?;

    for stylesheet in renderer.stylesheets() {
        debug!("form requires stylesheet {stylesheet}");
    }
    Ok(html)
}

/// Returns one line per problem found in the definition.
fn check(form: &Path, config: RendererConfig) -> anyhow::Result<Vec<String>> {
    let definition = load_definition(form)?;

    let mut problems: Vec<String> = definition
        .fields
        .unknown_types()
        .into_iter()
        .map(|(field, tag)| format!("unknown type `{tag}` for field {field}"))
        .collect();

    if problems.is_empty() {
        let renderer = definition.into_renderer(config)?;
        if let Err(e) = renderer.render(None, None) {
            problems.push(e.to_string());
        }
    }
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const FORM: &str = r#"{
        "name": "user",
        "action": "/admin/user.php",
        "fields": {
            "LOGIN": {"title": "Login"},
            "EMAIL": {"title": "Email"}
        },
        "values": {"LOGIN": "admin"},
        "validators": {"LOGIN": ["required"], "EMAIL": ["required", "email"]}
    }"#;

    fn write_json(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_render_plain() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(&dir, "form.json", FORM);

        let html = render(&form, None, &BannerArgs::default(), RendererConfig::default()).unwrap();
        assert!(html.contains(r#"name="user[LOGIN]""#));
        assert!(html.contains(r#"value="admin""#));
        assert!(!html.contains("adm-info-message-wrap"));
    }

    #[test]
    fn test_render_values_file_replaces_values() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(&dir, "form.json", FORM);
        let values = write_json(&dir, "values.json", r#"{"EMAIL": "a@b.example"}"#);

        let html = render(
            &form,
            Some(&values),
            &BannerArgs::default(),
            RendererConfig::default(),
        )
        .unwrap();
        assert!(html.contains(r#"value="a@b.example""#));
        assert!(!html.contains(r#"value="admin""#));
    }

    #[test]
    fn test_render_validate() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(&dir, "form.json", FORM);
        let banner = BannerArgs {
            validate: true,
            ..Default::default()
        };

        let html = render(&form, None, &banner, RendererConfig::default()).unwrap();
        assert!(html.contains(r#"data-type="ERROR""#));
        assert!(html.contains("EMAIL: "));
    }

    #[test]
    fn test_errors_win_over_success() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(&dir, "form.json", FORM);
        let banner = BannerArgs {
            success: Some("Saved".to_string()),
            errors: vec!["Login taken".to_string()],
            validate: false,
        };

        let html = render(&form, None, &banner, RendererConfig::default()).unwrap();
        assert!(html.contains("Login taken"));
        assert!(!html.contains("Saved"));
    }

    #[test]
    fn test_check_reports_unknown_types() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(
            &dir,
            "form.json",
            r#"{"name": "f", "fields": {"A": {"type": "colour"}, "B": {}}}"#,
        );

        let problems = check(&form, RendererConfig::default().strict(true)).unwrap();
        assert_eq!(problems, vec!["unknown type `colour` for field A".to_string()]);
    }

    #[test]
    fn test_check_clean_definition() {
        let dir = tempfile::tempdir().unwrap();
        let form = write_json(&dir, "form.json", FORM);

        assert!(check(&form, RendererConfig::default().strict(true))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_config_strict_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(&dir, "panel.json", r#"{"strict": true}"#);

        assert!(load_config(Some(&path), false).unwrap().strict);
        assert!(load_config(None, true).unwrap().strict);
        assert!(!load_config(None, false).unwrap().strict);
    }

    #[test]
    fn test_missing_form_has_context() {
        let err = render(
            Path::new("/nonexistent/form.json"),
            None,
            &BannerArgs::default(),
            RendererConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/form.json"));
    }
}
