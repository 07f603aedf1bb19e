#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    /// Replicate the edge element (`aaa|abcd|ddd`).
    Nearest,
    Constant(T),
    /// Mirror around the edge element without repeating it (`dcb|abcd|cba`).
    Mirror,
}

/// Maps a possibly out-of-range index onto `0..len`.
///
/// Returns `None` for constant borders outside the range and for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Nearest => Some(if i < 0 { 0 } else { len - 1 }),
        BorderMode::Mirror => {
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { period as usize - r })
        }
    }
}
