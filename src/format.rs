use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Number formatting options
// ---------------------------------------------------------------------------

/// Locale presets for displayed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "id-ID")]
    IdId,
}

/// Separators used when rendering metrics. Passed explicitly to the UI
/// instead of living in process-wide locale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::for_locale(Locale::default())
    }
}

impl NumberFormat {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::EnUs => NumberFormat {
                grouping_separator: ',',
                decimal_separator: '.',
            },
            Locale::IdId => NumberFormat {
                grouping_separator: '.',
                decimal_separator: ',',
            },
        }
    }

    /// Integer with a separator every three digits: `1234567` → `1,234,567`.
    pub fn format_count(&self, n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(ch);
        }
        out
    }

    /// One decimal place and a percent sign: `80.0` → `80.0%`.
    pub fn format_percent(&self, percent: f64) -> String {
        let text = format!("{percent:.1}%");
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}
