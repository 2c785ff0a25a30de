use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use omega_cheats_lib::Settings;
use omega_cheats_lib::settings::settings_path;

use crate::cli_types::ConfigAction;
use crate::error::CliError;

pub(crate) fn run_config(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => run_config_show(),
        ConfigAction::Path => {
            println!("{}", settings_path().display());
            Ok(())
        }
    }
}

fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    let settings = Settings::load_from(&path).map_err(|e| CliError::config(e.to_string()))?;

    println!(
        "{} {}",
        "Settings:".if_supports_color(Stdout, |t| t.bold()),
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
