//! Match quality scoring.

/// Score a match from the positions of the matched characters in the keyword.
///
/// The score is the sum of the squared positions, so matches that sit early
/// and close together in the keyword score lower. Lower ranks first.
///
/// For example, query `"p"`:
/// - `"py"` matches at position 0 → score 0
/// - `"kpt"` matches at position 1 → score 1
pub fn squared_position_score(positions: impl IntoIterator<Item = usize>) -> u64 {
    positions
        .into_iter()
        .map(|pos| {
            let pos = pos as u64;
            pos * pos
        })
        .sum()
}
