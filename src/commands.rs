use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::Context;
use framestock::bot::{Bot, BotSettings, TelegramClient};
use framestock::config::{self, FramestockConfig};
use framestock::export::{self, ExportFormat, ExportOptions};
use framestock::format::{detail_lines, frame_lines, short_line, stats_rows, summary_line};
use framestock::prompt::Prompter;
use framestock::ui::{self, Icons};
use framestock::{fields, FrameStore, SearchCriteria};
use owo_colors::OwoColorize;

use crate::{ExportFormatArg, SearchFormat};

fn open_store(database: &Path) -> anyhow::Result<FrameStore> {
    FrameStore::open(database).with_context(|| format!("opening database {}", database.display()))
}

pub fn run_init_db(database: &Path, drop: bool) -> anyhow::Result<()> {
    let store = open_store(database)?;
    if drop {
        store.initialize(true)?;
        ui::warn("Existing frames table dropped");
    }
    ui::success(&format!("Database ready at {}", database.display()));
    Ok(())
}

pub fn run_add(database: &Path, pairs: &[String]) -> anyhow::Result<()> {
    let frame = if pairs.is_empty() {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        prompter.prompt_new_frame()?
    } else {
        fields::frame_from_pairs(&pairs.join(" "))?
    };

    let store = open_store(database)?;
    let id = store.insert(&frame)?;
    tracing::info!(id, model = %frame.model_code, "Frame added");
    ui::success(&framestock::format::added_line(id, &frame));
    Ok(())
}

pub fn run_search(database: &Path, filters: &[String], format: SearchFormat) -> anyhow::Result<()> {
    let criteria = if !filters.is_empty() {
        fields::criteria_from_pairs(&filters.join(" "))?
    } else if std::io::stdin().is_terminal() {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        prompter.prompt_criteria()?
    } else {
        SearchCriteria::default()
    };

    let store = open_store(database)?;
    let frames = store.query(&criteria.into_filter()?)?;

    match format {
        SearchFormat::Json => println!("{}", serde_json::to_string_pretty(&frames)?),
        _ if frames.is_empty() => println!("No frames found."),
        SearchFormat::Table => {
            println!("{}", ui::frames_table(&frames));
            println!("{}", ui::dim(&format!("{} frame(s)", frames.len())));
        }
        SearchFormat::Lines => {
            ui::header(Icons::SEARCH, &format!("Found {} frame(s)", frames.len()));
            println!("{}", frame_lines(&frames, frames.len(), summary_line));
        }
    }
    Ok(())
}

pub fn run_get(database: &Path, id: i64) -> anyhow::Result<()> {
    let store = open_store(database)?;
    match store.get(id)? {
        Some(frame) => {
            ui::header(Icons::GLASSES, &format!("Frame {}", frame.id));
            println!("{}", detail_lines(&frame));
        }
        None => println!("Not found"),
    }
    Ok(())
}

fn print_listing(title: &str, frames: &[framestock::Frame]) {
    if frames.is_empty() {
        println!("No frames yet.");
        return;
    }
    ui::header(Icons::PACKAGE, title);
    for frame in frames {
        println!("{}", short_line(frame).style(ui::theme().stock(frame.stock)));
    }
}

pub fn run_list(database: &Path, limit: usize) -> anyhow::Result<()> {
    let store = open_store(database)?;
    print_listing("Frames", &store.list(limit.max(1))?);
    Ok(())
}

pub fn run_recent(database: &Path, limit: usize) -> anyhow::Result<()> {
    let store = open_store(database)?;
    print_listing("Recent frames", &store.recent(limit.max(1))?);
    Ok(())
}

pub fn run_stats(database: &Path) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let stats = store.stats()?;
    ui::header(Icons::STATS, &format!("Inventory ({})", database.display()));
    println!("{}", ui::stats_table(&stats_rows(&stats)));

    let materials = store.material_counts(5)?;
    if !materials.is_empty() {
        ui::section("Top materials");
        for (material, count) in materials {
            ui::summary_row(&material, &count.to_string());
        }
    }
    Ok(())
}

pub fn export_options(
    format: ExportFormatArg,
    limit: usize,
    brand: Option<String>,
    since: Option<&str>,
) -> anyhow::Result<ExportOptions> {
    let format = match format {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Text => ExportFormat::Text,
        ExportFormatArg::Txt => ExportFormat::Txt,
    };
    Ok(ExportOptions {
        format,
        limit: export::clamp_limit(limit),
        brand: brand.filter(|b| !b.trim().is_empty()),
        since: since.map(export::parse_date).transpose()?,
    })
}

pub fn run_export(database: &Path, opts: &ExportOptions, output: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let frames = opts.fetch(&store)?;
    let bytes = export::render(&frames, opts.format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            ui::success(&format!("Exported {} frame(s) to {}", frames.len(), path.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            if !bytes.ends_with(b"\n") {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

pub fn run_bot(database: &Path, config: &FramestockConfig) -> anyhow::Result<()> {
    let token = config::load_token(&config.bot)?;
    let prefix: String = token.chars().take(8).collect();
    tracing::info!("Starting bot with token {}...", prefix);

    let settings = BotSettings {
        poll_timeout_secs: config.bot.poll_timeout_secs(),
        reply_limit: config.bot.reply_limit(),
    };
    let client = TelegramClient::new(token, settings.poll_timeout_secs)?;
    let store = open_store(database)?;

    ui::header(Icons::ROBOT, "Bot running (Ctrl+C to stop)");
    ui::info("Database", &database.display().to_string());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut bot = Bot::new(client, store, settings);
        bot.run().await
    })?;
    tracing::info!("Bot stopped");
    Ok(())
}
