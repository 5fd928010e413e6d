//! Command handlers: store access and reply text, no transport

use crate::bot::command::BotCommand;
use crate::export::{self, ExportFormat, ExportOptions};
use crate::fields::{self, FRAME_FIELDS, SEARCH_FIELDS};
use crate::format::{self, detail_lines, frame_lines, short_line, summary_line};
use crate::frame::FrameId;
use crate::storage::FrameStore;
use crate::{Error, Result};

/// Text exports longer than this go out as a file
const INLINE_EXPORT_CHARS: usize = 3500;
const TOP_MATERIALS: usize = 5;
const DUPLICATE_GROUPS: usize = 20;
const BRAND_ROWS: usize = 50;
const LOW_STOCK_ROWS: usize = 50;

/// Settings the handlers need from configuration
#[derive(Debug, Clone, Copy)]
pub struct BotSettings {
    pub poll_timeout_secs: u64,
    /// Search results shown before "... and N more"
    pub reply_limit: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 30,
            reply_limit: 20,
        }
    }
}

/// A reply to deliver to the chat
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Document { file_name: String, bytes: Vec<u8> },
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

pub fn help_text() -> String {
    [
        "Frame inventory bot",
        "",
        "/add model=RB1234 brand=RayBan material=plastic lens=52 bridge=18 temple=140 color=black price=120 stock=5",
        "/new - guided add, one question at a time (/cancel to abort)",
        "/search brand=ray material=plastic min_price=50 max_price=150",
        "/get <id> - full record",
        "/recent [n] (alias /ls), /list [n]",
        "/brand <name> - frames of one brand",
        "/lowstock [threshold] - frames at or below the threshold (default 5)",
        "/count (alias /c), /stats (alias /inv), /duplicates",
        "/export [n] or format=csv|json|text|txt limit=.. brand=.. since=YYYY-MM-DD",
        "/backup - download the database file",
        "/ping",
        "",
        "Values with spaces need quotes: notes=\"spring hinge\". /help fields lists every field.",
    ]
    .join("\n")
}

pub fn fields_help_text() -> String {
    let describe = |defs: &[fields::FieldDef]| {
        defs.iter()
            .map(|d| {
                if d.aliases.is_empty() {
                    format!("{} - {}", d.name, d.help)
                } else {
                    format!("{} ({}) - {}", d.name, d.aliases.join(", "), d.help)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Frame fields (/add, /new):\n{}\n\nSearch fields (/search):\n{}",
        describe(FRAME_FIELDS),
        describe(SEARCH_FIELDS)
    )
}

/// Parse an optional count argument, clamped to `1..=max`
fn count_arg(args: &str, default: usize, max: usize, what: &str) -> Result<usize> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(default);
    }
    let n = args
        .parse::<usize>()
        .map_err(|_| Error::validation(format!("{} must be a whole number, got '{}'", what, args)))?;
    Ok(n.clamp(1, max))
}

/// Run one command against the store
pub fn handle_command(store: &FrameStore, command: &BotCommand, settings: &BotSettings) -> Result<Reply> {
    let reply = match command {
        BotCommand::Help { fields: true } => Reply::Text(fields_help_text()),
        BotCommand::Help { fields: false } => Reply::Text(help_text()),
        BotCommand::Ping => Reply::text("pong"),

        BotCommand::Add(args) => {
            if args.trim().is_empty() {
                return Ok(Reply::text("Usage: /add model=RB1234 brand=RayBan stock=5 ... (see /help fields)"));
            }
            let frame = fields::frame_from_pairs(args)?;
            let id = store.insert(&frame)?;
            tracing::info!(id, model = %frame.model_code, "Frame added");
            Reply::Text(format::added_line(id, &frame))
        }

        BotCommand::Search(args) => {
            let criteria = fields::criteria_from_pairs(args)?;
            let frames = store.query(&criteria.into_filter()?)?;
            if frames.is_empty() {
                Reply::text("No matches.")
            } else {
                Reply::Text(format!(
                    "Found {}:\n{}",
                    frames.len(),
                    frame_lines(&frames, settings.reply_limit, summary_line)
                ))
            }
        }

        BotCommand::Get(args) => {
            let id = args
                .trim()
                .parse::<FrameId>()
                .map_err(|_| Error::validation("Usage: /get <id>"))?;
            match store.get(id)? {
                Some(frame) => Reply::Text(detail_lines(&frame)),
                None => Reply::text("Not found"),
            }
        }

        BotCommand::Count => {
            let total = store.count()?;
            let materials = store.material_counts(TOP_MATERIALS)?;
            Reply::Text(format::count_text(total, &materials))
        }

        BotCommand::Recent(args) => {
            let n = count_arg(args, 5, 50, "n")?;
            listing(store.recent(n)?, "Recent frames:")
        }

        BotCommand::List(args) => {
            let n = count_arg(args, 10, 100, "n")?;
            listing(store.list(n)?, "Frames:")
        }

        BotCommand::Brand(args) => {
            let brand = args.trim();
            if brand.is_empty() {
                return Ok(Reply::text("Usage: /brand <name>"));
            }
            let frames = store.by_brand(brand, BRAND_ROWS)?;
            if frames.is_empty() {
                Reply::Text(format!("No frames for brand '{}'.", brand))
            } else {
                listing(frames, &format!("Brand {}:", brand))
            }
        }

        BotCommand::LowStock(args) => {
            let args = args.trim();
            let threshold = if args.is_empty() {
                5
            } else {
                args.parse::<i64>().map_err(|_| {
                    Error::validation(format!("threshold must be a whole number, got '{}'", args))
                })?
            };
            let frames = store.low_stock(threshold, LOW_STOCK_ROWS)?;
            if frames.is_empty() {
                Reply::Text(format!("No frames with stock <= {}.", threshold))
            } else {
                listing(frames, &format!("Stock <= {}:", threshold))
            }
        }

        BotCommand::Stats => Reply::Text(format::stats_text(&store.stats()?)),
        BotCommand::Duplicates => Reply::Text(format::duplicates_text(&store.duplicates(DUPLICATE_GROUPS)?)),

        BotCommand::Export(args) => {
            let opts = ExportOptions::parse_args(args)?;
            let frames = opts.fetch(store)?;
            if frames.is_empty() {
                return Ok(Reply::text("Nothing to export."));
            }
            let bytes = export::render(&frames, opts.format)?;
            if opts.format == ExportFormat::Text && bytes.len() <= INLINE_EXPORT_CHARS {
                Reply::Text(String::from_utf8_lossy(&bytes).into_owned())
            } else {
                Reply::Document {
                    file_name: export::file_name(opts.format, frames.len()),
                    bytes,
                }
            }
        }

        BotCommand::Backup => match store.path() {
            Some(path) if path.is_file() => {
                let bytes = std::fs::read(path)?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "frames.db".to_string());
                Reply::Document { file_name, bytes }
            }
            _ => Reply::text("No database file found."),
        },

        BotCommand::Unknown(name) => Reply::Text(format!("Unknown command /{}. Try /help.", name)),

        BotCommand::New | BotCommand::Cancel => {
            return Err(Error::validation("guided add is handled by the conversation"));
        }
    };
    Ok(reply)
}

fn listing(frames: Vec<crate::Frame>, title: &str) -> Reply {
    if frames.is_empty() {
        return Reply::text("No frames yet.");
    }
    Reply::Text(format!("{}\n{}", title, frame_lines(&frames, frames.len(), short_line)))
}
