//! Construction options for [`Grid`](crate::Grid).

/// Controls how a [`Grid`](crate::Grid) classifies and reads its cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOptions {
    /// Background glyph left out of the glyph index. Default: `Some('.')`.
    ///
    /// `None` indexes every glyph.
    pub default_glyph: Option<char>,
    /// When set, only these glyphs are indexed. A glyph listed here is
    /// indexed even if it is the default glyph. Default: `None`.
    pub glyphs: Option<Vec<char>>,
    /// Index the default glyph as well. Default: `false`.
    pub include_default: bool,
    /// Read decimal digit cells back as integers through
    /// [`Grid::value`](crate::Grid::value). Default: `false`.
    pub integer_values: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            default_glyph: Some('.'),
            glyphs: None,
            include_default: false,
            integer_values: false,
        }
    }
}

impl GridOptions {
    /// Options for a digit-valued grid (height maps and the like):
    /// every glyph is indexed and digits read back as integers.
    pub fn digits() -> Self {
        Self {
            default_glyph: None,
            integer_values: true,
            ..Self::default()
        }
    }

    /// Restrict indexing to `glyphs`.
    pub fn only(glyphs: impl IntoIterator<Item = char>) -> Self {
        Self {
            glyphs: Some(glyphs.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Whether cells bearing `glyph` belong in the index.
    pub(crate) fn indexes(&self, glyph: char) -> bool {
        match &self.glyphs {
            Some(filter) => filter.contains(&glyph),
            None => self.include_default || self.default_glyph != Some(glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skips_dot() {
        let o = GridOptions::default();
        assert!(!o.indexes('.'));
        assert!(o.indexes('#'));
    }

    #[test]
    fn include_default_indexes_dot() {
        let o = GridOptions {
            include_default: true,
            ..GridOptions::default()
        };
        assert!(o.indexes('.'));
    }

    #[test]
    fn filter_is_exclusive_and_explicit() {
        let o = GridOptions::only(['#', '.']);
        assert!(o.indexes('#'));
        assert!(o.indexes('.'));
        assert!(!o.indexes('S'));
    }

    #[test]
    fn digits_indexes_everything() {
        let o = GridOptions::digits();
        assert!(o.indexes('.'));
        assert!(o.indexes('7'));
        assert!(o.integer_values);
    }
}
