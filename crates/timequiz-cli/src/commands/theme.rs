//! The `timequiz theme` command.

use std::path::PathBuf;

use anyhow::Result;

use timequiz_store::Theme;

use crate::ThemeAction;

pub fn execute(
    action: ThemeAction,
    store: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, store) = super::open_store(store, config_path.as_deref())?;

    match action {
        ThemeAction::Show => match store.theme()? {
            Some(theme) => println!("Theme: {theme}"),
            None => println!("Theme: {} (system default)", Theme::system_default()),
        },
        ThemeAction::Toggle => {
            let theme = store.toggle_theme()?;
            println!("Theme: {theme}");
        }
        ThemeAction::Dark => {
            store.set_theme(Theme::Dark)?;
            println!("Theme: dark");
        }
        ThemeAction::Light => {
            store.set_theme(Theme::Light)?;
            println!("Theme: light");
        }
    }

    Ok(())
}
