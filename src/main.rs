// ==========================================
// Logistica ASN - terminal entry point
// ==========================================

use anyhow::{anyhow, Context};
use clap::Parser;
use logistica_asn::app::{get_default_data_dir, run_main_menu, AppPaths, AppState};
use logistica_asn::config::SettingsReader;
use logistica_asn::i18n::{current_locale, set_locale};
use logistica_asn::logging;
use logistica_asn::prompt::TerminalPrompter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logistica-asn", version, about = "Bultos, pallets, ASN y etiquetas por cliente")]
struct Args {
    /// Data directory (cajas.txt, coditem_db.json, client_db.json, logistica.db)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output directory for generated workbooks
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Message language: es | en (default: stored setting)
    #[arg(long)]
    locale: Option<String>,

    /// WMS extract used by client processes instead of asking for it
    #[arg(long)]
    wms: Option<PathBuf>,

    /// JSON log lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", logistica_asn::APP_NAME, logistica_asn::VERSION);
    tracing::info!("==================================================");

    let paths = AppPaths::new(
        args.data_dir.unwrap_or_else(get_default_data_dir),
        args.output_dir,
    );
    let state = AppState::new(paths).map_err(|e| anyhow!(e))?;

    let locale = match args.locale {
        Some(locale) => locale,
        None => state
            .config
            .locale()
            .map_err(|e| anyhow!(e.to_string()))
            .context("reading locale setting")?,
    };
    set_locale(&locale);
    tracing::info!(locale = %current_locale(), "operator locale");

    let mut prompter = TerminalPrompter::new();
    run_main_menu(&state, &mut prompter, args.wms.as_deref()).context("main menu")?;
    Ok(())
}
