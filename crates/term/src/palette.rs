//! Identity colors.
//!
//! Building a palette is the frontend's "asset loading": each identity gets its
//! swatch and is reported to the [`ReadinessGate`] as it does.

use crate::engine::ReadinessGate;
use crate::fb::{CellStyle, Rgb};
use crate::types::Identity;

/// How one identity is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Rgb,
    pub letter: char,
}

impl Swatch {
    /// Letter on a colored block.
    pub fn style(&self) -> CellStyle {
        CellStyle::new(Rgb::new(20, 20, 28), self.color).bold()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Swatches evenly spaced around the hue wheel, one per identity.
    pub fn build(identities: u8, gate: &mut ReadinessGate) -> Self {
        let mut swatches = Vec::with_capacity(identities as usize);
        for index in 0..identities {
            let identity = Identity::new(index);
            let hue = index as u32 * 360 / identities.max(1) as u32;
            swatches.push(Swatch {
                color: hue_to_rgb(hue),
                letter: identity.letter(),
            });
            gate.mark_ready(identity);
        }
        Self { swatches }
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Swatch for `identity`; unknown identities draw grey.
    pub fn swatch(&self, identity: Identity) -> Swatch {
        self.swatches
            .get(identity.index() as usize)
            .copied()
            .unwrap_or(Swatch {
                color: Rgb::new(128, 128, 128),
                letter: identity.letter(),
            })
    }
}

/// Fully saturated, bright color for `hue` degrees.
fn hue_to_rgb(hue: u32) -> Rgb {
    let hue = hue % 360;
    let sector = hue / 60;
    // Rising edge within the sector, 0..=255.
    let x = ((hue % 60) * 255 / 60) as u8;
    let (r, g, b) = match sector {
        0 => (255, x, 0),
        1 => (255 - x, 255, 0),
        2 => (0, 255, x),
        3 => (0, 255 - x, 255),
        4 => (x, 0, 255),
        _ => (255, 0, 255 - x),
    };
    // Soften toward white so dark letters stay readable.
    Rgb::new(
        (r as u16 * 3 / 4 + 60) as u8,
        (g as u16 * 3 / 4 + 60) as u8,
        (b as u16 * 3 / 4 + 60) as u8,
    )
}
