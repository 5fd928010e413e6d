//! Plain-text rendering shared by the CLI and the chat bot

use crate::frame::{Frame, FrameId, NewFrame};
use crate::storage::{BrandTally, DuplicateGroup, InventoryStats};

/// Placeholder for absent values
pub const ABSENT: &str = "-";

pub fn price_label(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| ABSENT.to_string())
}

fn text_label(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(ABSENT)
}

/// One-line summary used by search results
pub fn summary_line(frame: &Frame) -> String {
    format!(
        "ID={} | {} {} | {} | {} | Color: {} | Stock: {} | Price: {}",
        frame.id,
        frame.brand_label(),
        frame.model_code,
        frame.material_label(),
        frame.size_label(),
        text_label(&frame.color),
        frame.stock,
        price_label(frame.price),
    )
}

/// Short line used by listings: id, brand, model and stock
pub fn short_line(frame: &Frame) -> String {
    format!(
        "{}: {} {} stock={}",
        frame.id,
        frame.brand_label(),
        frame.model_code,
        frame.stock
    )
}

/// Summary lines for up to `limit` frames, noting how many were left out
pub fn frame_lines(frames: &[Frame], limit: usize, line: fn(&Frame) -> String) -> String {
    let mut out: Vec<String> = frames.iter().take(limit).map(line).collect();
    if frames.len() > limit {
        out.push(format!("... and {} more", frames.len() - limit));
    }
    out.join("\n")
}

/// Every field of a frame, one `name: value` per line
pub fn detail_lines(frame: &Frame) -> String {
    let num = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| ABSENT.to_string());
    [
        format!("id: {}", frame.id),
        format!("brand: {}", text_label(&frame.brand)),
        format!("model_code: {}", frame.model_code),
        format!("material: {}", text_label(&frame.material)),
        format!("lens_width: {}", num(frame.lens_width)),
        format!("bridge_size: {}", num(frame.bridge_size)),
        format!("temple_length: {}", num(frame.temple_length)),
        format!("color: {}", text_label(&frame.color)),
        format!("shape: {}", text_label(&frame.shape)),
        format!("gender: {}", text_label(&frame.gender)),
        format!("price: {}", price_label(frame.price)),
        format!("stock: {}", frame.stock),
        format!("notes: {}", text_label(&frame.notes)),
        format!("created_at: {}", frame.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ]
    .join("\n")
}

/// Confirmation after a successful insert
pub fn added_line(id: FrameId, frame: &NewFrame) -> String {
    format!(
        "Added frame ID={} -> {} {} (stock {})",
        id,
        frame.brand_label(),
        frame.model_code,
        frame.stock
    )
}

/// Draft fields as `name=value` lines, skipping absent ones
pub fn draft_lines(frame: &NewFrame) -> String {
    let mut lines = vec![format!("model_code={}", frame.model_code)];
    let mut push = |name: &str, value: Option<String>| {
        if let Some(v) = value {
            lines.push(format!("{}={}", name, v));
        }
    };
    push("brand", frame.brand.clone());
    push("material", frame.material.clone());
    push("lens_width", frame.lens_width.map(|v| v.to_string()));
    push("bridge_size", frame.bridge_size.map(|v| v.to_string()));
    push("temple_length", frame.temple_length.map(|v| v.to_string()));
    push("color", frame.color.clone());
    push("shape", frame.shape.clone());
    push("gender", frame.gender.clone());
    push("price", frame.price.map(|p| format!("{:.2}", p)));
    push("stock", Some(frame.stock.to_string()));
    push("notes", frame.notes.clone());
    lines.join("\n")
}

fn tally_label(tally: &Option<BrandTally>, unit: &str) -> String {
    match tally {
        Some(t) => format!(
            "{} ({} {})",
            t.brand.as_deref().unwrap_or("NoBrand"),
            t.value,
            unit
        ),
        None => ABSENT.to_string(),
    }
}

/// Statistics as label/value pairs, in display order
pub fn stats_rows(stats: &InventoryStats) -> Vec<(&'static str, String)> {
    vec![
        ("Frames", stats.frames.to_string()),
        ("Brands", stats.brands.to_string()),
        ("Top Brand (frames)", tally_label(&stats.top_brand_by_frames, "frames")),
        ("Top Brand (stock)", tally_label(&stats.top_brand_by_stock, "units")),
        ("Total Stock Units", stats.total_stock.to_string()),
        (
            "Avg Stock / Frame",
            stats
                .avg_stock_per_frame()
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| ABSENT.to_string()),
        ),
        ("Avg Price", price_label(stats.avg_price)),
    ]
}

pub fn stats_text(stats: &InventoryStats) -> String {
    let mut out = String::from("Stats:");
    for (label, value) in stats_rows(stats) {
        out.push_str(&format!("\n{}: {}", label, value));
    }
    out
}

pub fn count_text(total: usize, materials: &[(String, usize)]) -> String {
    let top = if materials.is_empty() {
        "(none)".to_string()
    } else {
        materials
            .iter()
            .map(|(m, c)| format!("{}:{}", m, c))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("Total frames: {}\nTop materials: {}", total, top)
}

pub fn duplicates_text(groups: &[DuplicateGroup]) -> String {
    if groups.is_empty() {
        return "No duplicates detected.".to_string();
    }
    let lines: Vec<String> = groups
        .iter()
        .map(|g| {
            format!(
                "{} {} -> {} entries",
                g.brand.as_deref().unwrap_or("NoBrand"),
                g.model_code,
                g.count
            )
        })
        .collect();
    format!("Possible duplicates:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn frame() -> Frame {
        Frame {
            id: 7,
            attrs: NewFrame::builder("RB1234")
                .brand("RayBan")
                .material("plastic")
                .lens_width(52)
                .bridge_size(18)
                .color("black")
                .price(120.0)
                .stock(5)
                .build()
                .unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&frame()),
            "ID=7 | RayBan RB1234 | plastic | 52-18-- | Color: black | Stock: 5 | Price: 120.00"
        );
    }

    #[test]
    fn test_detail_lines_cover_every_field() {
        let text = detail_lines(&frame());
        assert!(text.starts_with("id: 7\nbrand: RayBan\nmodel_code: RB1234"));
        assert!(text.contains("temple_length: -"));
        assert!(text.ends_with("created_at: 2025-06-01 09:30:00 UTC"));
        assert_eq!(text.lines().count(), 14);
    }

    #[test]
    fn test_frame_lines_truncates() {
        let frames = vec![frame(), frame(), frame()];
        let text = frame_lines(&frames, 2, short_line);
        assert_eq!(text, "7: RayBan RB1234 stock=5\n7: RayBan RB1234 stock=5\n... and 1 more");
    }

    #[test]
    fn test_count_text() {
        assert_eq!(count_text(0, &[]), "Total frames: 0\nTop materials: (none)");
        let text = count_text(3, &[("metal".to_string(), 2), ("unknown".to_string(), 1)]);
        assert!(text.ends_with("metal:2, unknown:1"));
    }
}
