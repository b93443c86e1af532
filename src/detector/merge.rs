//! Merging of nearby refined seams and the final minimum-slice filter.

/// Group sorted rows whose distance to the previous row in the group is at
/// most `min_gap`, collapsing each group to its rounded mean.
pub(crate) fn merge_close(sorted: &[usize], min_gap: usize) -> Vec<usize> {
    let mut merged = Vec::new();
    let mut group: Vec<usize> = Vec::new();
    for &y in sorted {
        match group.last() {
            Some(&last) if y - last > min_gap => {
                merged.push(rounded_mean(&group));
                group.clear();
            }
            _ => {}
        }
        group.push(y);
    }
    if !group.is_empty() {
        merged.push(rounded_mean(&group));
    }
    merged
}

/// Mean rounded half up, in integer arithmetic.
fn rounded_mean(values: &[usize]) -> usize {
    let n = values.len();
    let sum: usize = values.iter().sum();
    (2 * sum + n) / (2 * n)
}

/// Keep seams that leave at least `min_slice` rows to the previous kept
/// boundary, starting from row 0 and closing with `height`.
///
/// When the bottom band would come out short, the last kept seam is dropped
/// instead, so no returned seam lies within `min_slice` of either edge.
pub(crate) fn enforce_min_slice(merged: &[usize], height: usize, min_slice: usize) -> Vec<usize> {
    let mut kept = Vec::with_capacity(merged.len());
    let mut prev = 0usize;
    for &y in merged {
        if y >= height {
            break;
        }
        if y >= prev + min_slice {
            kept.push(y);
            prev = y;
        }
    }
    if height < prev + min_slice {
        kept.pop();
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_merge_through_the_last_member() {
        // 100→110→125 chain within a gap of 15; 200 stands alone
        let merged = merge_close(&[100, 110, 125, 200], 15);
        assert_eq!(merged, vec![112, 200]);
    }

    #[test]
    fn rounded_mean_rounds_half_up() {
        assert_eq!(merge_close(&[10, 11], 5), vec![11]);
        assert_eq!(merge_close(&[10, 10, 11], 5), vec![10]);
        assert!(merge_close(&[], 5).is_empty());
    }

    #[test]
    fn drops_seams_too_close_to_the_top() {
        assert_eq!(enforce_min_slice(&[10, 50, 120], 300, 30), vec![50, 120]);
    }

    #[test]
    fn drops_seams_too_close_together() {
        assert_eq!(enforce_min_slice(&[100, 120, 140], 300, 30), vec![100, 140]);
    }

    #[test]
    fn short_bottom_band_removes_last_seam() {
        assert_eq!(enforce_min_slice(&[100, 280], 300, 30), vec![100]);
        assert_eq!(enforce_min_slice(&[270], 300, 30), vec![270]);
        assert_eq!(enforce_min_slice(&[271], 300, 30), Vec::<usize>::new());
    }
}
