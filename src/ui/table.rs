use tabled::{settings::Style, Table, Tabled};
use crate::format::{price_label, ABSENT};
use crate::frame::Frame;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// One search result row
#[derive(Tabled)]
pub struct FrameRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Brand")]
    pub brand: String,
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Material")]
    pub material: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Stock")]
    pub stock: i64,
    #[tabled(rename = "Price")]
    pub price: String,
}

impl From<&Frame> for FrameRow {
    fn from(frame: &Frame) -> Self {
        Self {
            id: frame.id,
            brand: frame.brand_label().to_string(),
            model: frame.model_code.clone(),
            material: frame.material_label().to_string(),
            size: frame.size_label(),
            color: frame.color.clone().unwrap_or_else(|| ABSENT.to_string()),
            stock: frame.stock,
            price: price_label(frame.price),
        }
    }
}

pub fn frames_table(frames: &[Frame]) -> String {
    let rows: Vec<FrameRow> = frames.iter().map(FrameRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::NewFrame;
    use chrono::Utc;

    #[test]
    fn test_frames_table_has_header_and_rows() {
        let frame = Frame {
            id: 3,
            attrs: NewFrame::builder("RB1234").brand("RayBan").stock(5).build().unwrap(),
            created_at: Utc::now(),
        };
        let table = frames_table(&[frame]);
        assert!(table.contains("Model"));
        assert!(table.contains("RB1234"));
        assert!(!table.contains("NoBrand"));
        assert_eq!(table.lines().count(), 5);
    }

    #[test]
    fn test_empty_stats_table() {
        assert!(TableBuilder::new().build().is_empty());
        let table = stats_table(&[("Frames", "2".to_string())]);
        assert!(table.contains("Metric"));
        assert!(table.contains("Frames"));
    }
}
