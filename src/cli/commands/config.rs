use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::cli::app::{ConfigAction, SetupArgs};
use crate::config::{
    ConfigError, ConfigLoader, DEFAULT_LOCAL_PATH, EnvOverrides, ProcessEnv, RawConfig,
    RawConfluence, check_settings, load_dotenv, validate_config,
};

pub fn run(action: ConfigAction, config_path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init { force } => handle_init(config_path, force),
        ConfigAction::Setup(args) => handle_setup(config_path, args),
        ConfigAction::Show { json, reveal } => handle_show(config_path, json, reveal),
        ConfigAction::Validate => handle_validate(config_path),
    }
}

pub fn handle_init(config_path: &Path, force: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force && !confirm_overwrite(config_path)? {
        println!("Aborted.");
        return Ok(());
    }

    ConfigLoader::new(Some(config_path.to_path_buf())).save_template()?;

    println!("\x1b[32mConfig created at {}\x1b[0m", config_path.display());
    println!("Fill in your Confluence details, then run: confluence-sync config validate");

    Ok(())
}

pub fn handle_setup(config_path: &Path, args: SetupArgs) -> anyhow::Result<()> {
    if config_path.exists() && !args.force && !confirm_overwrite(config_path)? {
        println!("Aborted.");
        return Ok(());
    }

    let answers = collect_answers(args)?;

    let raw = RawConfig {
        confluence: Some(RawConfluence {
            url: Some(answers.url.clone()),
            api_token: Some(answers.api_token.clone()),
            space_key: Some(answers.space_key.clone()),
            username: answers.username.clone(),
        }),
        local_path: Some(answers.local_path.to_string_lossy().into_owned()),
        ignore_patterns: None,
    };
    if let Err(errors) = validate_config(raw) {
        eprintln!("\x1b[31mConfiguration errors:\x1b[0m");
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("refusing to write an invalid configuration");
    }

    ConfigLoader::new(Some(config_path.to_path_buf())).save_interactive_config(
        &answers.url,
        &answers.api_token,
        &answers.space_key,
        Some(answers.local_path.as_path()),
        answers.username.as_deref(),
    )?;

    println!("\x1b[32mConfig saved to {}\x1b[0m", config_path.display());
    Ok(())
}

pub fn handle_show(config_path: &Path, json: bool, reveal: bool) -> anyhow::Result<()> {
    load_dotenv();

    if !config_path.exists() {
        eprintln!(
            "No config file found at {}, using environment only",
            config_path.display()
        );
    }
    let overrides = EnvOverrides::from_source(&ProcessEnv)?;
    if !overrides.is_empty() {
        eprintln!(
            "Using environment overrides: {}",
            overrides.applied_vars().join(", ")
        );
    }

    let mut loader = ConfigLoader::new(Some(config_path.to_path_buf()));
    let settings = loader.load_with_env(&ProcessEnv)?;
    let shown = if reveal {
        settings.clone()
    } else {
        settings.redacted()
    };

    let output = if json {
        serde_json::to_string_pretty(&shown).context("Failed to render configuration as JSON")?
    } else {
        serde_yaml::to_string(&shown).context("Failed to render configuration as YAML")?
    };
    println!("{}", output.trim_end());

    Ok(())
}

pub fn handle_validate(config_path: &Path) -> anyhow::Result<()> {
    if !config_path.exists() {
        println!(
            "No config file found at {}, checking environment only",
            config_path.display()
        );
    }

    let mut loader = ConfigLoader::new(Some(config_path.to_path_buf()));
    match loader.load() {
        Ok(settings) => {
            let warnings = check_settings(settings);
            if !warnings.is_empty() {
                println!("\x1b[33mConfiguration warnings:\x1b[0m");
                for warning in &warnings {
                    println!("  - {}: {}", warning.field, warning.message);
                }
            }
            println!("\x1b[32mConfiguration valid\x1b[0m");
            Ok(())
        }
        Err(ConfigError::Validation { errors }) => {
            eprintln!("\x1b[31mConfiguration errors:\x1b[0m");
            for error in &errors {
                eprintln!("  - {error}");
            }
            bail!("{} configuration error(s)", errors.len());
        }
        Err(err) => Err(err.into()),
    }
}

struct SetupAnswers {
    url: String,
    api_token: String,
    space_key: String,
    local_path: PathBuf,
    username: Option<String>,
}

/// Prompts for every required value missing from the command line. The
/// optional values are only asked for when at least one prompt was needed.
/// Answers come back trimmed.
fn collect_answers(args: SetupArgs) -> anyhow::Result<SetupAnswers> {
    let theme = ColorfulTheme::default();
    let interactive = args.url.is_none() || args.api_token.is_none() || args.space_key.is_none();

    let url = match args.url {
        Some(url) => url,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Confluence URL")
            .interact_text()?,
    };
    let api_token = match args.api_token {
        Some(token) => token,
        None => Password::with_theme(&theme)
            .with_prompt("API token")
            .interact()?,
    };
    let space_key = match args.space_key {
        Some(key) => key,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Space key")
            .interact_text()?,
    };
    let local_path = match args.local_path {
        Some(path) => path.to_string_lossy().into_owned(),
        None if !interactive => DEFAULT_LOCAL_PATH.to_string(),
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Local docs directory")
            .default(DEFAULT_LOCAL_PATH.to_string())
            .interact_text()?,
    };
    let username = match args.username {
        Some(name) => Some(name),
        None if !interactive => None,
        None => {
            let answer = Input::<String>::with_theme(&theme)
                .with_prompt("Username (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(answer)
        }
    };

    Ok(SetupAnswers {
        url: url.trim().to_string(),
        api_token: api_token.trim().to_string(),
        space_key: space_key.trim().to_string(),
        local_path: PathBuf::from(local_path.trim()),
        username: username
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    })
}

fn confirm_overwrite(path: &Path) -> anyhow::Result<bool> {
    print!(
        "Config already exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let response = input.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}
