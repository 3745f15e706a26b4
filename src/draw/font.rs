//! Font selection for the text tool.

/// Family, weight and style used when committing text.
///
/// Size is kept separately on the brush style so `+`/`-` style adjustments do
/// not have to rebuild the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Installed font family name, e.g. "Sans" or "JetBrains Mono".
    pub family: String,
    /// "normal", "bold", "light", ... or a numeric weight.
    pub weight: String,
    /// "normal", "italic" or "oblique".
    pub style: String,
}

impl FontDescriptor {
    pub fn new(
        family: impl Into<String>,
        weight: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            style: style.into(),
        }
    }

    /// Builds the Pango description string, e.g. `"Sans Italic Bold 24"`.
    ///
    /// "normal" style/weight words are omitted since Pango treats them as the
    /// default anyway.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];
        for word in [&self.style, &self.weight] {
            if !word.trim().is_empty() && !word.eq_ignore_ascii_case("normal") {
                parts.push(capitalize_first(word.trim()));
            }
        }
        parts.push(format!("{}", size.round().max(1.0) as i32));
        parts.join(" ")
    }

    pub fn to_pango(&self, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size))
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Sans", "normal", "normal")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_omits_normal_words() {
        assert_eq!(FontDescriptor::default().to_pango_string(24.0), "Sans 24");
    }

    #[test]
    fn style_and_weight_are_capitalized() {
        let font = FontDescriptor::new("Monospace", "bold", "italic");
        assert_eq!(font.to_pango_string(18.4), "Monospace Italic Bold 18");
    }

    #[test]
    fn size_never_rounds_to_zero() {
        let font = FontDescriptor::new("Serif", "light", "normal");
        assert_eq!(font.to_pango_string(0.2), "Serif Light 1");
    }
}
