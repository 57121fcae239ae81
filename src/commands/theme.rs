use anyhow::Result;
use tracing::info;

use crate::cli::{ThemeAction, ThemeArgs};
use crate::preferences::PreferenceStore;

pub fn run(args: ThemeArgs) -> Result<()> {
    let path = args
        .preferences_path
        .clone()
        .unwrap_or_else(|| args.cache_root.join("preferences.json"));
    let store = PreferenceStore::new(path);

    let theme = match (args.action, args.action.target_theme()) {
        (_, Some(theme)) => store.set_theme(theme)?.theme,
        (ThemeAction::Toggle, None) => store.toggle_theme()?,
        _ => store.load()?.theme,
    };

    info!(path = %store.path().display(), theme = theme.as_str(), "theme preference");
    println!("{}", theme.as_str());
    Ok(())
}
