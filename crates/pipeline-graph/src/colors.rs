//! Color palette for the pipeline canvas.
//!
//! Accent colors per component type and stroke colors per connection type.

use egui::Color32;
use pipeline_types::{ComponentType, ConnectionType};

// =============================================================================
// CANVAS CHROME
// =============================================================================

pub const CANVAS_BG: Color32 = Color32::from_rgb(24, 26, 32);
pub const GRID_LINE: Color32 = Color32::from_rgb(38, 41, 50);
pub const CARD_BG: Color32 = Color32::from_rgb(40, 44, 54);
pub const CARD_BORDER: Color32 = Color32::from_rgb(62, 67, 80);
pub const CARD_SELECTED: Color32 = Color32::from_rgb(96, 165, 250);
pub const CARD_BROKEN: Color32 = Color32::from_rgb(239, 68, 68);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(229, 231, 235);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 155, 168);
pub const PORT_INPUT: Color32 = Color32::from_rgb(96, 165, 250);
pub const PORT_OUTPUT: Color32 = Color32::from_rgb(74, 222, 128);
pub const PORT_ELIGIBLE: Color32 = Color32::from_rgb(250, 204, 21);

// =============================================================================
// COMPONENT ACCENTS
// =============================================================================

/// Accent color for a component type's card chip and header.
pub fn component_accent(component: ComponentType) -> Color32 {
    match component {
        ComponentType::VectorDb => Color32::from_rgb(99, 102, 241), // Indigo
        ComponentType::Embedding => Color32::from_rgb(59, 130, 246), // Blue
        ComponentType::Llm => Color32::from_rgb(16, 185, 129),      // Emerald
        ComponentType::Prompt => Color32::from_rgb(245, 158, 11),   // Amber
        ComponentType::Rag => Color32::from_rgb(139, 92, 246),      // Violet
        ComponentType::Chunking => Color32::from_rgb(244, 63, 94),  // Rose
        ComponentType::FineTuning => Color32::from_rgb(6, 182, 212), // Cyan
        ComponentType::Temperature => Color32::from_rgb(249, 115, 22), // Orange
    }
}

// =============================================================================
// CONNECTION STROKES
// =============================================================================

/// Stroke color for a connection type.
pub fn connection_color(kind: ConnectionType) -> Color32 {
    match kind {
        ConnectionType::Data => Color32::from_rgb(148, 163, 184),    // Slate
        ConnectionType::Control => Color32::from_rgb(168, 85, 247),  // Purple
        ConnectionType::Text => Color32::from_rgb(245, 158, 11),     // Amber
        ConnectionType::Embedding => Color32::from_rgb(59, 130, 246), // Blue
        ConnectionType::Vector => Color32::from_rgb(99, 102, 241),   // Indigo
        ConnectionType::Query => Color32::from_rgb(236, 72, 153),    // Pink
        ConnectionType::Result => Color32::from_rgb(34, 197, 94),    // Green
        ConnectionType::Document => Color32::from_rgb(234, 179, 8),  // Yellow
        ConnectionType::Config => Color32::from_rgb(100, 116, 139),  // Gray slate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_connection_type_has_a_distinct_color() {
        let all = [
            ConnectionType::Data,
            ConnectionType::Control,
            ConnectionType::Text,
            ConnectionType::Embedding,
            ConnectionType::Vector,
            ConnectionType::Query,
            ConnectionType::Result,
            ConnectionType::Document,
            ConnectionType::Config,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(connection_color(*a), connection_color(*b));
            }
        }
    }

    #[test]
    fn every_component_has_a_distinct_accent() {
        let all = ComponentType::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(component_accent(*a), component_accent(*b));
            }
        }
    }
}
