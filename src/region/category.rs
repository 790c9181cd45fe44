//! Layout categories emitted by the region detector.

use serde::{Deserialize, Serialize};

/// Layout class of a detected region.
///
/// The numeric ids are the detector's class indices and are what appears in
/// serialized regions (`category_id`). Ids the crate does not know survive
/// as [`Category::Unknown`] so that a newer detector never breaks parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Category {
    /// Section or document title (0)
    Title,
    /// Body text block (1)
    PlainText,
    /// Headers, footers, page numbers and other page furniture (2)
    Abandon,
    /// Picture or chart (3)
    Figure,
    /// Caption under a figure (4)
    FigureCaption,
    /// Table body (5)
    Table,
    /// Caption above a table (6)
    TableCaption,
    /// Notes below a table (7)
    TableFootnote,
    /// Display formula on its own line (8)
    IsolateFormula,
    /// Equation number next to a display formula (9)
    FormulaCaption,
    /// Any other class id
    Unknown(u8),
}

impl Category {
    /// Numeric class id.
    pub fn id(&self) -> u8 {
        match self {
            Category::Title => 0,
            Category::PlainText => 1,
            Category::Abandon => 2,
            Category::Figure => 3,
            Category::FigureCaption => 4,
            Category::Table => 5,
            Category::TableCaption => 6,
            Category::TableFootnote => 7,
            Category::IsolateFormula => 8,
            Category::FormulaCaption => 9,
            Category::Unknown(id) => *id,
        }
    }

    /// Human-readable label, as used in the detector's class table.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::PlainText => "plain text",
            Category::Abandon => "abandon",
            Category::Figure => "figure",
            Category::FigureCaption => "figure_caption",
            Category::Table => "table",
            Category::TableCaption => "table_caption",
            Category::TableFootnote => "table_footnote",
            Category::IsolateFormula => "isolate_formula",
            Category::FormulaCaption => "formula_caption",
            Category::Unknown(_) => "unknown",
        }
    }

    /// Whether the region's crop is meant to be sent to text recognition.
    ///
    /// Figures, page furniture and equation numbers carry no text worth
    /// recognizing.
    pub fn is_ocr_target(&self) -> bool {
        matches!(
            self,
            Category::Title
                | Category::PlainText
                | Category::FigureCaption
                | Category::Table
                | Category::TableCaption
                | Category::TableFootnote
                | Category::IsolateFormula
        )
    }
}

impl From<u8> for Category {
    fn from(id: u8) -> Self {
        match id {
            0 => Category::Title,
            1 => Category::PlainText,
            2 => Category::Abandon,
            3 => Category::Figure,
            4 => Category::FigureCaption,
            5 => Category::Table,
            6 => Category::TableCaption,
            7 => Category::TableFootnote,
            8 => Category::IsolateFormula,
            9 => Category::FormulaCaption,
            other => Category::Unknown(other),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.id()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Unknown(id) => write!(f, "unknown({})", id),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_u8() {
        for id in 0..=12u8 {
            assert_eq!(Category::from(id).id(), id);
        }
        assert_eq!(Category::from(1), Category::PlainText);
        assert_eq!(Category::from(42), Category::Unknown(42));
    }

    #[test]
    fn test_ocr_targets() {
        assert!(Category::Title.is_ocr_target());
        assert!(Category::Table.is_ocr_target());
        assert!(Category::IsolateFormula.is_ocr_target());
        assert!(!Category::Figure.is_ocr_target());
        assert!(!Category::Abandon.is_ocr_target());
        assert!(!Category::FormulaCaption.is_ocr_target());
        assert!(!Category::Unknown(12).is_ocr_target());
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::PlainText.to_string(), "plain text");
        assert_eq!(Category::Unknown(11).to_string(), "unknown(11)");
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&Category::Table).unwrap(), "5");
        let parsed: Category = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, Category::FormulaCaption);
    }
}
