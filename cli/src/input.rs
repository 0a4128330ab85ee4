use pairup_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseCoordsError {
    #[error("expected input of the form row,column")]
    Malformed,
    #[error("position out of range, the board is {0} by {1}")]
    OutOfRange(Coord, Coord),
}

/// Parses `"row,column"` into board coordinates, checked against `size`.
///
/// Retrying on bad input is the caller's business; this never touches game
/// state.
pub fn parse_coords(input: &str, size: Coord2) -> Result<Coord2, ParseCoordsError> {
    let (row, column) = input.trim().split_once(',').ok_or(ParseCoordsError::Malformed)?;
    let row: Coord = row.trim().parse().map_err(|_| ParseCoordsError::Malformed)?;
    let column: Coord = column
        .trim()
        .parse()
        .map_err(|_| ParseCoordsError::Malformed)?;

    if row < size.0 && column < size.1 {
        Ok((row, column))
    } else {
        Err(ParseCoordsError::OutOfRange(size.0, size.1))
    }
}
