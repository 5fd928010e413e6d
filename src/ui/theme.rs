use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Stock at or below this is highlighted in listings
pub const LOW_STOCK_HIGHLIGHT: i64 = 2;

/// Terminal styles, by role
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    /// Listing rows that are nearly out of stock
    pub low_stock: Style,
}

impl Theme {
    /// Honors `NO_COLOR`, `CLICOLOR`/`CLICOLOR_FORCE` and whether stdout is a terminal
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && console::colors_enabled())
    }

    pub fn new(colored: bool) -> Self {
        if !colored {
            return Self {
                header: Style::new(),
                success: Style::new(),
                error: Style::new(),
                warn: Style::new(),
                info: Style::new(),
                dim: Style::new(),
                low_stock: Style::new(),
            };
        }
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            low_stock: Style::new().yellow(),
        }
    }

    /// Style for a listing row with `stock` units on hand
    pub fn stock(&self, stock: i64) -> Style {
        if stock <= LOW_STOCK_HIGHLIGHT {
            self.low_stock.clone()
        } else {
            Style::new()
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_adds_no_escapes() {
        let theme = Theme::new(false);
        assert_eq!("RB1234".style(theme.header.clone()).to_string(), "RB1234");
        assert_eq!("RB1234".style(theme.stock(0)).to_string(), "RB1234");
    }

    #[test]
    fn test_low_stock_rows_are_highlighted() {
        let theme = Theme::new(true);
        assert!("x".style(theme.stock(LOW_STOCK_HIGHLIGHT)).to_string().contains('\u{1b}'));
        assert_eq!("x".style(theme.stock(LOW_STOCK_HIGHLIGHT + 1)).to_string(), "x");
    }
}
