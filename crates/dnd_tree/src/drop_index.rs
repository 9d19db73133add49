/// Derive a child index from the pointer's vertical offset inside a container.
///
/// This is a row-height heuristic, not hit testing: the result is not clamped to the
/// container's child count, insertion clamps it instead. Offsets above the container
/// and non-finite input map to `0`.
pub fn drop_index_from_offset(offset_y: f32, row_height: f32) -> usize {
    if !offset_y.is_finite() || !row_height.is_finite() || row_height <= 0. || offset_y <= 0. {
        return 0;
    }
    (offset_y / row_height).floor() as usize
}

/// Clamp an insertion index so that indices past the end append.
pub(crate) fn insertion_index(index: usize, len: usize) -> usize {
    index.min(len)
}

/// Clamp a target index into `[0, len - 1]`.
pub(crate) fn target_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_offset_by_row_height() {
        assert_eq!(drop_index_from_offset(0., 30.), 0);
        assert_eq!(drop_index_from_offset(29.9, 30.), 0);
        assert_eq!(drop_index_from_offset(30., 30.), 1);
        assert_eq!(drop_index_from_offset(95., 30.), 3);
    }

    #[test]
    fn does_not_clamp_to_child_count() {
        assert_eq!(drop_index_from_offset(3000., 30.), 100);
    }

    #[test]
    fn degenerate_input_maps_to_zero() {
        assert_eq!(drop_index_from_offset(-12., 30.), 0);
        assert_eq!(drop_index_from_offset(f32::NAN, 30.), 0);
        assert_eq!(drop_index_from_offset(40., 0.), 0);
    }

    #[test]
    fn clamps() {
        assert_eq!(insertion_index(7, 3), 3);
        assert_eq!(insertion_index(1, 3), 1);
        assert_eq!(target_index(7, 3), 2);
        assert_eq!(target_index(0, 0), 0);
    }
}
