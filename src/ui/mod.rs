pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, section, success, summary_row, warn};
pub use table::{FrameRow, TableBuilder, frames_table, stats_table};
pub use theme::{Theme, theme};
