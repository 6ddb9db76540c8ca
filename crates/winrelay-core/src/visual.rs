/// Transparency level that means "fully opaque, layered style disabled".
pub const OPAQUE: u8 = 1;

/// Transparency and color-key state of the controlled window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualState {
    /// Level sent as the layered alpha byte (0–255). [`OPAQUE`] disables layering.
    pub transparency: u8,
    /// Color key as 24-bit `0xRRGGBB`.
    pub color_key: u32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            transparency: OPAQUE,
            color_key: 0x000000,
        }
    }
}

/// Attributes handed to the platform when enabling the layered style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayeredAttributes {
    /// Color key as 24-bit `0xRRGGBB`.
    pub color_key: u32,
    pub alpha: u8,
}

/// A partial transparency change. `None` fields keep their cached value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransparencyUpdate {
    pub transparency: Option<u8>,
    pub color_key: Option<u32>,
}

impl VisualState {
    pub fn is_opaque(&self) -> bool {
        self.transparency == OPAQUE
    }

    /// Merges the supplied fields into the current state.
    pub fn apply(&mut self, update: &TransparencyUpdate) {
        if let Some(transparency) = update.transparency {
            self.transparency = transparency;
        }
        if let Some(color_key) = update.color_key {
            self.color_key = color_key;
        }
    }

    /// Layered attributes for the current state, or `None` when opaque.
    pub fn layered(&self) -> Option<LayeredAttributes> {
        if self.is_opaque() {
            return None;
        }
        Some(LayeredAttributes {
            color_key: self.color_key,
            alpha: self.transparency,
        })
    }
}
