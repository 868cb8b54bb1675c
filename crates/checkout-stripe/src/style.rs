//! Card Element Styling
//!
//! The fixed cosmetic style map handed to `elements.create("card", …)`.
//! Purely visual; no behavioral effect.

use serde::{Deserialize, Serialize};

/// Options object for `elements.create("card", …)`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardElementOptions {
    pub style: CardStyle,
}

/// Style map keyed by element state
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardStyle {
    pub base: BaseStyle,
}

/// Base-state visual configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStyle {
    pub font_size: String,
    pub color: String,
    #[serde(rename = "::placeholder")]
    pub placeholder: PlaceholderStyle,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceholderStyle {
    pub color: String,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            font_size: "16px".into(),
            color: "#424770".into(),
            placeholder: PlaceholderStyle {
                color: "#aab7c4".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_map_matches_the_sdk_shape() {
        let value = serde_json::to_value(CardElementOptions::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "style": {
                    "base": {
                        "fontSize": "16px",
                        "color": "#424770",
                        "::placeholder": { "color": "#aab7c4" }
                    }
                }
            })
        );
    }
}
