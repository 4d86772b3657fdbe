use crate::card::Card;
use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub name_line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub min_box_width: f64,
    pub min_box_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
            name_line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            min_box_width: 140.0,
            min_box_height: 50.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    pub fn card_size(&self, card: &Card) -> (f64, f64) {
        let content_width = card
            .lines()
            .map(|line| self.text_width(line))
            .fold(0.0, f64::max)
            + self.padding_x * 2.0;
        let width = content_width.max(self.min_box_width);

        let height = self.name_line_height
            + card.details.len() as f64 * self.line_height
            + self.padding_y * 2.0;

        (width, height.max(self.min_box_height))
    }

    /// Size of a single-line box such as a descendant summary.
    pub fn label_size(&self, label: &str) -> (f64, f64) {
        let width = (self.text_width(label) + self.padding_x * 2.0).max(self.min_box_width);
        let height = (self.name_line_height + self.padding_y * 2.0).max(self.min_box_height);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, details: &[&str]) -> Card {
        Card {
            name: name.to_string(),
            details: details.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("Anna"), 4.0 * 7.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("山田"), 4.0 * 7.0);
    }

    #[test]
    fn test_card_size_minimum() {
        let m = TextMetrics::default();
        let (w, h) = m.card_size(&card("Al", &[]));
        assert_eq!(w, m.min_box_width);
        assert_eq!(h, m.min_box_height);
    }

    #[test]
    fn test_card_size_grows_with_content() {
        let m = TextMetrics::default();
        let long = "Info: emigrated to Buenos Aires in 1921 with three brothers";
        let (w, h) = m.card_size(&card("Ana", &["Gender: Female", "Born: 1900", long]));

        assert_eq!(w, m.text_width(long) + m.padding_x * 2.0);
        assert!(h > m.min_box_height);
    }
}
