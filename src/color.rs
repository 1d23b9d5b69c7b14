/*
 * Copyright (C) 2025 The PharmaStudy Authors
 *
 * This file is part of PharmaStudy.
 *
 * PharmaStudy is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * PharmaStudy is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with PharmaStudy.  If not, see <http://www.gnu.org/licenses/>.
 */

use ratatui::style::Color as RatColor;

use crate::catalog::ItemType;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    //Badge palette: emerald for molecules, amber for enzymes, rose for
    //medications
    pub const MOLECULE: Color = Color::new(0x05, 0x96, 0x69);
    pub const ENZYME: Color = Color::new(0xd9, 0x77, 0x06);
    pub const MEDICATION: Color = Color::new(0xe1, 0x1d, 0x48);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    ///Parses a `#rrggbb` display color, as stored on chapters.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    pub fn for_item_type(kind: ItemType) -> Self {
        match kind {
            ItemType::Molecule => Self::MOLECULE,
            ItemType::Enzyme => Self::ENZYME,
            ItemType::Medication => Self::MEDICATION,
        }
    }
}

impl From<Color> for RatColor {
    fn from(value: Color) -> Self {
        RatColor::Rgb(value.r, value.g, value.b)
    }
}
