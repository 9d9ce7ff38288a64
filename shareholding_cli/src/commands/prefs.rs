use anyhow::Result;
use clap::Args;
use serde::Serialize;
use shareholding_lib::{FilePreferenceStore, UiPreferences};

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct PrefsArgs {
    /// Flip the sidebar collapsed flag and save it
    #[arg(long)]
    pub toggle_sidebar: bool,
}

#[derive(Serialize)]
struct PrefsReport<'a> {
    path: &'a str,
    sidebar_collapsed: bool,
}

pub fn run(args: &PrefsArgs, format: &OutputFormat) -> Result<()> {
    let mut prefs = UiPreferences::init(FilePreferenceStore::default_location());
    if args.toggle_sidebar {
        prefs.toggle_collapse()?;
    }

    let path = prefs.store().path().display().to_string();
    match format {
        OutputFormat::Json => print_json(&PrefsReport {
            path: &path,
            sidebar_collapsed: prefs.is_collapsed(),
        }),
        _ => {
            println!("preferences: {}", path);
            println!("sidebar collapsed: {}", prefs.is_collapsed());
        }
    }

    Ok(())
}
