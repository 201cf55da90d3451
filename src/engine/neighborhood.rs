//! Moore neighborhood offsets and neighbor mask helpers

use crate::io::error::{Result, invalid_parameter};

/// Which of the eight Moore offsets count as neighbors, in [`MOORE_OFFSETS`] order
pub type Neighborhood = [bool; 8];

/// The eight Moore offsets `(dx, dy)`, row by row from top-left
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// All eight offsets enabled
pub const MOORE: Neighborhood = [true; 8];

/// Only the four orthogonal offsets enabled
pub const VON_NEUMANN: Neighborhood = [false, true, false, true, true, false, true, false];

/// Number of enabled offsets
pub fn size(neighborhood: &Neighborhood) -> usize {
    neighborhood.iter().filter(|&&enabled| enabled).count()
}

/// Parse a mask of exactly eight `0`/`1` characters in offset order
///
/// # Errors
///
/// Returns `InvalidParameter` if the text is not eight binary digits
pub fn parse_mask(text: &str) -> Result<Neighborhood> {
    let trimmed = text.trim();
    if trimmed.chars().count() != MOORE_OFFSETS.len() {
        return Err(invalid_parameter(
            "neighborhood",
            &text,
            &"mask must have exactly 8 digits",
        ));
    }

    let mut mask = [false; 8];
    for (slot, ch) in mask.iter_mut().zip(trimmed.chars()) {
        *slot = match ch {
            '1' => true,
            '0' => false,
            _ => {
                return Err(invalid_parameter(
                    "neighborhood",
                    &text,
                    &format!("unexpected character '{ch}', only 0 and 1 are allowed"),
                ));
            }
        };
    }
    Ok(mask)
}

/// Format a mask as eight `0`/`1` characters
pub fn format_mask(neighborhood: &Neighborhood) -> String {
    neighborhood
        .iter()
        .map(|&enabled| if enabled { '1' } else { '0' })
        .collect()
}
